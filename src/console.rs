//! Interactive console session.
//!
//! Reads one line at a time and either handles a command or forwards the
//! line to the mentor. Generic over the reader and writer so tests can
//! drive it with in-memory buffers.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::{ConfigError, GROQ_API_KEY_VAR, TAVILY_API_KEY_VAR};
use crate::mentor::{Mentor, Session};

pub const FAREWELL: &str = "Take care! Remember, I'm always here when you need guidance. 🎓";
pub const HISTORY_CLEARED: &str = "✅ Chat history cleared!";
pub const REPLY_PREFIX: &str = "🎓 AI Mentor: ";

/// What a line of input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Blank line.
    Skip,
    Quit,
    Clear,
    Ask(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Skip;
        }
        match line.to_lowercase().as_str() {
            "quit" | "exit" | "q" => Self::Quit,
            "clear" => Self::Clear,
            _ => Self::Ask(line),
        }
    }
}

/// Startup banner naming the required keys.
pub fn banner() -> String {
    let rule = "=".repeat(70);
    format!(
        "{rule}\n🎓 AI Mentor for First-Generation College Students\n{rule}\n\n📋 Loading API keys from .env file...\n\nRequired API Keys:\n- {} (for LLM)\n- {} (for web search)\n{rule}",
        GROQ_API_KEY_VAR, TAVILY_API_KEY_VAR
    )
}

/// Message shown when the configuration cannot be loaded.
pub fn config_failure(error: &ConfigError) -> String {
    format!("\n⚠️  {}\n\n{}", error, error.remediation())
}

/// Usage hints printed before the first prompt.
pub const EXAMPLES: &str = "Chat with your AI Mentor (type 'quit' to exit):

Examples:
- 'I want to learn Python programming from scratch'
- 'Help me find internships in data science'
- 'Draft an email to a professor for research opportunity'
- 'How do I register for courses?'
";

/// Run the read-respond loop until quit or end of input.
pub async fn run<R, W>(
    mentor: &Mentor,
    session: &mut Session,
    input: R,
    output: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            output
                .write_all(format!("\n\n{}\n", FAREWELL).as_bytes())
                .await?;
            break;
        };

        match Command::parse(&line) {
            Command::Skip => continue,
            Command::Quit => {
                output.write_all(format!("\n{}\n", FAREWELL).as_bytes()).await?;
                break;
            }
            Command::Clear => {
                mentor.reset(session);
                output
                    .write_all(format!("\n{}\n\n", HISTORY_CLEARED).as_bytes())
                    .await?;
            }
            Command::Ask(text) => {
                let reply = mentor.respond(text, session).await;
                output
                    .write_all(format!("\n{}{}\n\n", REPLY_PREFIX, reply).as_bytes())
                    .await?;
            }
        }
    }

    output.flush().await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::agent::fake::{FakeFactory, ScriptedLoop};

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("   "), Command::Skip);
        assert_eq!(Command::parse("QUIT"), Command::Quit);
        assert_eq!(Command::parse(" Exit "), Command::Quit);
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse("Clear"), Command::Clear);
        assert_eq!(Command::parse("  clear the air "), Command::Ask("clear the air"));
    }

    #[test]
    fn banner_names_both_keys() {
        let banner = banner();
        assert!(banner.contains("- GROQ_API_KEY (for LLM)"));
        assert!(banner.contains("- TAVILY_API_KEY (for web search)"));
    }

    #[test]
    fn config_failure_includes_env_lines() {
        let text = config_failure(&ConfigError::MissingEnvVar("GROQ_API_KEY".to_string()));
        assert!(text.contains("GROQ_API_KEY=gsk-your-groq-key-here"));
        assert!(text.contains("TAVILY_API_KEY=tvly-your-tavily-key-here"));
    }

    async fn drive(script: &str) -> (String, Session, Arc<FakeFactory>) {
        let factory = Arc::new(FakeFactory::new(ScriptedLoop::answering("You've got this!")));
        let mentor = Mentor::new(factory.clone());
        let mut session = Session::new();
        let mut out = Vec::new();

        tokio_test::assert_ok!(run(&mentor, &mut session, script.as_bytes(), &mut out).await);

        (String::from_utf8(out).unwrap(), session, factory)
    }

    #[tokio::test]
    async fn replies_are_prefixed_and_blank_lines_skipped() {
        let (out, session, _) = drive("\n   \nHow do I find a mentor?\nquit\n").await;

        assert!(out.contains("\n🎓 AI Mentor: You've got this!\n\n"));
        assert!(out.ends_with(&format!("\n{}\n", FAREWELL)));
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn clear_resets_history() {
        let (out, session, _) = drive("hello\nclear\n").await;

        assert!(out.contains(HISTORY_CLEARED));
        assert!(session.history().is_empty());
        assert!(out.ends_with(&format!("\n\n{}\n", FAREWELL)));
    }

    #[tokio::test]
    async fn quit_stops_before_remaining_lines() {
        let (out, session, factory) = drive("q\nthis is never sent\n").await;

        assert!(!out.contains(REPLY_PREFIX));
        assert!(session.history().is_empty());
        assert_eq!(
            factory.builds.load(std::sync::atomic::Ordering::SeqCst),
            0
        );
    }
}
