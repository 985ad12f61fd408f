//! Per-conversation state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::History;
use crate::agent::ConversationLoop;

/// One student's conversation: history plus the loop built for it.
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    pub(super) history: History,
    pub(super) runner: Option<Arc<dyn ConversationLoop>>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            history: History::new(),
            runner: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether the loop has been built for this session.
    pub fn is_ready(&self) -> bool {
        self.runner.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .field("history_len", &self.history.len())
            .field("ready", &self.is_ready())
            .finish()
    }
}
