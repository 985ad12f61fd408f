//! Rolling conversation history.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::llm::ChatMessage;

/// Maximum number of turns kept; the oldest go first.
pub const HISTORY_CAP: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Human,
    Assistant,
}

/// One message in the conversation. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    role: TurnRole,
    text: String,
    timestamp: DateTime<Utc>,
}

impl Turn {
    fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Ordered turns, oldest first, never longer than [`HISTORY_CAP`].
#[derive(Debug, Clone, Default)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Record one completed exchange, then drop the oldest turns beyond the cap.
    pub fn push_exchange(&mut self, user_text: &str, reply: &str) {
        self.turns.push(Turn::new(TurnRole::Human, user_text));
        self.turns.push(Turn::new(TurnRole::Assistant, reply));
        if self.turns.len() > HISTORY_CAP {
            let excess = self.turns.len() - HISTORY_CAP;
            self.turns.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Role-tagged messages for the model. Blank assistant turns are skipped.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        self.turns
            .iter()
            .filter_map(|turn| match turn.role {
                TurnRole::Human => Some(ChatMessage::user(turn.text.as_str())),
                TurnRole::Assistant if turn.text.trim().is_empty() => None,
                TurnRole::Assistant => Some(ChatMessage::assistant(turn.text.as_str())),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn length_is_twice_exchanges_up_to_cap() {
        let mut history = History::new();
        for n in 1..=20 {
            history.push_exchange(&format!("q{}", n), &format!("a{}", n));
            assert_eq!(history.len(), (2 * n).min(HISTORY_CAP));
        }
    }

    #[test]
    fn oldest_turns_are_dropped_first() {
        let mut history = History::new();
        for n in 1..=16 {
            history.push_exchange(&format!("q{}", n), &format!("a{}", n));
        }
        assert_eq!(history.len(), 30);
        assert_eq!(history.turns()[0].text(), "q2");
        assert_eq!(history.turns()[0].role(), TurnRole::Human);
        assert_eq!(history.turns()[29].text(), "a16");
    }

    #[test]
    fn messages_alternate_roles_and_skip_blank_replies() {
        let mut history = History::new();
        history.push_exchange("hello", "hi!");
        history.push_exchange("still there?", "   ");

        let messages = history.to_messages();
        let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(messages[2].content.as_deref(), Some("still there?"));
    }

    #[test]
    fn clear_empties_history() {
        let mut history = History::new();
        history.push_exchange("a", "b");
        history.clear();
        assert!(history.is_empty());
        assert!(history.to_messages().is_empty());
    }
}
