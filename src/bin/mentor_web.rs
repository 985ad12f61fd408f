//! Student Mentor - HTTP Server Entry Point
//!
//! Serves the browser chat UI and the JSON API.

use student_mentor::{
    api::{self, AppState},
    config::Config,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ADDR: &str = "127.0.0.1:8501";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "student_mentor=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; a missing key still starts the server in setup mode
    let config = Config::from_env();
    let addr = match &config {
        Ok(config) => {
            info!("Loaded configuration: model={}", config.model.model);
            format!("{}:{}", config.host, config.port)
        }
        Err(e) => {
            warn!("Configuration incomplete: {}", e);
            DEFAULT_ADDR.to_string()
        }
    };

    info!("Starting server on {}", addr);
    api::serve(AppState::new(config), &addr).await?;

    Ok(())
}
