//! Student Mentor - Console Entry Point
//!
//! Interactive chat with the mentor on stdin/stdout. Logs go to stderr.

use std::sync::Arc;

use student_mentor::{
    agent::AgentFactory,
    config::Config,
    console,
    mentor::{Mentor, Session},
};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "student_mentor=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    println!("{}", console::banner());

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("{}", console::config_failure(&e));
            std::process::exit(1);
        }
    };
    println!("✅ API keys loaded successfully!");
    info!("Loaded configuration: model={}", config.model.model);

    println!("\n🤖 Initializing AI Mentor agent...");
    let mentor = Mentor::new(Arc::new(AgentFactory::new(config)));
    let mut session = Session::new();
    if let Err(e) = mentor.ensure_ready(&mut session) {
        println!("\n❌ Failed to initialize agent: {}", e);
        std::process::exit(1);
    }
    println!("✅ AI Mentor ready!\n");
    println!("{}", console::EXAMPLES);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    console::run(&mentor, &mut session, stdin, &mut stdout).await?;

    Ok(())
}
