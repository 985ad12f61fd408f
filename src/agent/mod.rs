//! Agent module - the tool-calling loop behind every mentor reply.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with the mentor instruction, prior turns and the new message
//! 2. Call the model with the tool catalog
//! 3. If the model requests tool calls, execute them and feed results back
//! 4. Repeat until the model produces final text, the round ceiling is hit,
//!    or the time budget runs out
//!
//! The orchestrator only sees the [`ConversationLoop`] and [`LoopFactory`]
//! traits, so tests and alternative runtimes can stand in for [`Agent`].

mod agent_loop;
mod prompt;

pub use agent_loop::{Agent, AgentFactory};
pub use prompt::{build_system_prompt, MENTOR_PERSONA};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::llm::{ChatMessage, LlmError};

/// What a loop hands back for one exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentResponse {
    /// The loop produced nothing at all.
    Absent,
    /// A result object with a named output field.
    Structured { output: Option<String> },
    /// Plain text.
    Text(String),
    /// Anything else; stringified on display.
    Other(Value),
}

/// Input for one exchange.
#[derive(Debug, Clone, Copy)]
pub struct LoopRequest<'a> {
    /// Persona system text.
    pub instruction: &'a str,
    /// Prior turns, oldest first.
    pub history: &'a [ChatMessage],
    /// The new user message.
    pub message: &'a str,
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("failed to start the mentor agent: {0}")]
    Construction(String),

    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("no final answer after {0} tool rounds")]
    IterationLimit(usize),

    #[error("exchange exceeded the {0:?} time budget")]
    Timeout(Duration),
}

/// A model-calling loop that turns one user message into a response.
#[async_trait]
pub trait ConversationLoop: Send + Sync {
    async fn invoke(&self, request: LoopRequest<'_>) -> Result<AgentResponse, AgentError>;
}

/// Builds the loop a session uses. Called lazily; failures are retried on the next exchange.
pub trait LoopFactory: Send + Sync {
    fn build(&self) -> Result<Arc<dyn ConversationLoop>, AgentError>;
}
