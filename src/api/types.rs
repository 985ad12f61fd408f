//! API request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mentor::Turn;

/// Form posted by the chat page.
#[derive(Debug, Clone, Deserialize)]
pub struct SendForm {
    #[serde(default)]
    pub message: String,
}

/// Query string of the chat page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatPageQuery {
    /// Index into the quick actions; anything unparsable is ignored
    pub prefill: Option<String>,
}

impl ChatPageQuery {
    pub fn prefill_index(&self) -> Option<usize> {
        self.prefill.as_deref()?.trim().parse().ok()
    }
}

/// Request to send a message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRequest {
    /// The student's message
    pub content: String,
}

/// Reply to a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub reply: String,

    /// Turns in the mentor history after this exchange
    pub history_len: usize,
}

/// Response after creating a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,

    /// Whether the mentor loop could be built
    pub ready: bool,
}

/// Full session state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub ready: bool,
    pub history: Vec<Turn>,
    pub last_error: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" or "unconfigured"
    pub status: String,

    pub version: String,

    /// Live sessions
    pub sessions: usize,
}

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(prefill: Option<&str>) -> ChatPageQuery {
        ChatPageQuery {
            prefill: prefill.map(str::to_string),
        }
    }

    #[test]
    fn prefill_index_parses_leniently() {
        assert_eq!(query(Some("2")).prefill_index(), Some(2));
        assert_eq!(query(Some(" 0 ")).prefill_index(), Some(0));
        assert_eq!(query(Some("abc")).prefill_index(), None);
        assert_eq!(query(Some("-1")).prefill_index(), None);
        assert_eq!(query(None).prefill_index(), None);
    }
}
