//! Conversation orchestrator.
//!
//! [`Mentor::respond`] turns one student message into one reply string. It
//! formats the session history for the loop, invokes it, normalizes whatever
//! comes back and records the exchange. It never fails: every error path ends
//! in a friendly reply.

mod history;
mod session;

pub use history::{History, Turn, TurnRole, HISTORY_CAP};
pub use session::Session;

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::agent::{
    AgentError, AgentResponse, ConversationLoop, LoopFactory, LoopRequest, MENTOR_PERSONA,
};

/// Reply for a loop that returned nothing.
pub const REPHRASE_REPLY: &str = "I'm here to help! Could you please rephrase your question or tell me more about what you need assistance with?";

/// Reply for a structured result with an empty output field.
pub const MORE_DETAILS_REPLY: &str = "I'm having a bit of trouble understanding. Could you provide more details about what you need help with?";

/// Reply when normalization leaves nothing to show.
pub const ENCOURAGEMENT_REPLY: &str =
    "I want to help you! Could you tell me more about what you're looking for?";

/// Reply when the exchange itself blew up.
pub const TECHNICAL_ISSUE_REPLY: &str = "I'm having a technical issue, but please try asking your question again. I'm here to support you!";

/// Output some runtimes emit instead of an answer; never recorded.
pub const NO_RESPONSE_SENTINEL: &str = "No response generated";

/// Reply for a failed loop invocation, carrying the error detail.
pub fn loop_failure_reply(error: &AgentError) -> String {
    format!(
        "I encountered a technical issue, but I'm still here to help! Could you try rephrasing your question? Error: {}",
        error
    )
}

/// Collapse a loop response into display text.
pub fn normalize(response: AgentResponse) -> String {
    let candidate = match response {
        AgentResponse::Absent => REPHRASE_REPLY.to_string(),
        AgentResponse::Structured { output } => match output {
            Some(text) if !text.is_empty() => text,
            _ => MORE_DETAILS_REPLY.to_string(),
        },
        AgentResponse::Text(text) => text,
        AgentResponse::Other(value) if value.is_null() => REPHRASE_REPLY.to_string(),
        AgentResponse::Other(value) => match value {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        },
    };

    if candidate.trim().is_empty() {
        ENCOURAGEMENT_REPLY.to_string()
    } else {
        candidate
    }
}

/// Drives conversations for any number of sessions.
pub struct Mentor {
    factory: Arc<dyn LoopFactory>,
    instruction: String,
}

impl Mentor {
    pub fn new(factory: Arc<dyn LoopFactory>) -> Self {
        Self {
            factory,
            instruction: MENTOR_PERSONA.to_string(),
        }
    }

    /// Replace the persona system text.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Answer `user_text` within `session`. Always returns a reply.
    pub async fn respond(&self, user_text: &str, session: &mut Session) -> String {
        let outcome = AssertUnwindSafe(self.exchange(user_text, session))
            .catch_unwind()
            .await;

        match outcome {
            Ok(reply) => reply,
            Err(panic) => {
                tracing::error!(
                    session = %session.id(),
                    panic = panic_message(&*panic),
                    "Exchange panicked"
                );
                TECHNICAL_ISSUE_REPLY.to_string()
            }
        }
    }

    /// Forget the conversation so far. The built loop is kept.
    pub fn reset(&self, session: &mut Session) {
        session.history.clear();
        tracing::info!(session = %session.id(), "History cleared");
    }

    /// Build the loop for `session` once; a failed build is retried next time.
    pub fn ensure_ready(&self, session: &mut Session) -> Result<Arc<dyn ConversationLoop>, AgentError> {
        if let Some(runner) = &session.runner {
            return Ok(runner.clone());
        }
        let runner = self.factory.build()?;
        session.runner = Some(runner.clone());
        Ok(runner)
    }

    async fn exchange(&self, user_text: &str, session: &mut Session) -> String {
        let runner = match self.ensure_ready(session) {
            Ok(runner) => runner,
            Err(e) => {
                tracing::warn!(session = %session.id(), error = %e, "Could not build mentor agent");
                return loop_failure_reply(&e);
            }
        };

        let history = session.history.to_messages();
        let request = LoopRequest {
            instruction: &self.instruction,
            history: &history,
            message: user_text,
        };

        let response = match runner.invoke(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(session = %session.id(), error = %e, "Mentor loop failed");
                return loop_failure_reply(&e);
            }
        };

        let reply = normalize(response);
        if !reply.is_empty() && reply != NO_RESPONSE_SENTINEL {
            session.history.push_exchange(user_text, &reply);
        }
        tracing::debug!(
            session = %session.id(),
            history_len = session.history.len(),
            "Exchange complete"
        );
        reply
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use serde_json::json;

    use super::*;
    use crate::agent::fake::{FakeFactory, ScriptedLoop, Step};
    use crate::llm::Role;

    fn mentor_with(runner: ScriptedLoop) -> (Mentor, Arc<FakeFactory>) {
        let factory = Arc::new(FakeFactory::new(runner));
        (Mentor::new(factory.clone()), factory)
    }

    #[test]
    fn normalization_precedence() {
        assert_eq!(normalize(AgentResponse::Absent), REPHRASE_REPLY);
        assert_eq!(
            normalize(AgentResponse::Structured {
                output: Some("Try Internshala.".to_string())
            }),
            "Try Internshala."
        );
        assert_eq!(normalize(AgentResponse::Structured { output: None }), MORE_DETAILS_REPLY);
        assert_eq!(
            normalize(AgentResponse::Structured {
                output: Some(String::new())
            }),
            MORE_DETAILS_REPLY
        );
        assert_eq!(normalize(AgentResponse::Text("plain".to_string())), "plain");
        assert_eq!(normalize(AgentResponse::Text("  \n".to_string())), ENCOURAGEMENT_REPLY);
        assert_eq!(normalize(AgentResponse::Other(json!(null))), REPHRASE_REPLY);
        assert_eq!(normalize(AgentResponse::Other(json!({"a": 1}))), r#"{"a":1}"#);
        assert_eq!(normalize(AgentResponse::Other(json!(""))), ENCOURAGEMENT_REPLY);
    }

    #[tokio::test]
    async fn history_grows_two_turns_per_exchange_up_to_cap() {
        let (mentor, _) = mentor_with(ScriptedLoop::answering("Keep going!"));
        let mut session = Session::new();

        for n in 1..=20 {
            let reply = mentor.respond(&format!("question {}", n), &mut session).await;
            assert_eq!(reply, "Keep going!");
            assert_eq!(session.history().len(), (2 * n).min(HISTORY_CAP));
        }
        assert_eq!(session.history().turns()[0].text(), "question 6");
    }

    #[tokio::test]
    async fn loop_error_yields_apology_and_keeps_history() {
        let (mentor, _) = mentor_with(ScriptedLoop::new(vec![
            Step::Reply(AgentResponse::Text("first".to_string())),
            Step::Fail("connection reset".to_string()),
        ]));
        let mut session = Session::new();
        mentor.respond("hi", &mut session).await;

        let reply = mentor.respond("again", &mut session).await;

        assert!(reply.starts_with("I encountered a technical issue, but I'm still here to help!"));
        assert!(reply.contains("connection reset"));
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn panicking_loop_is_contained() {
        let (mentor, _) = mentor_with(ScriptedLoop::new(vec![Step::Panic]));
        let mut session = Session::new();

        let reply = mentor.respond("hello", &mut session).await;

        assert_eq!(reply, TECHNICAL_ISSUE_REPLY);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn empty_output_is_recorded_with_default_text() {
        let (mentor, _) = mentor_with(ScriptedLoop::new(vec![Step::Reply(AgentResponse::Structured {
            output: None,
        })]));
        let mut session = Session::new();

        let reply = mentor.respond("hmm", &mut session).await;

        assert_eq!(reply, MORE_DETAILS_REPLY);
        assert_eq!(session.history().turns()[1].text(), MORE_DETAILS_REPLY);
    }

    #[tokio::test]
    async fn sentinel_reply_is_not_recorded() {
        let (mentor, _) = mentor_with(ScriptedLoop::new(vec![Step::Reply(AgentResponse::Text(
            NO_RESPONSE_SENTINEL.to_string(),
        ))]));
        let mut session = Session::new();

        let reply = mentor.respond("?", &mut session).await;

        assert_eq!(reply, NO_RESPONSE_SENTINEL);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn prior_turns_are_passed_to_the_loop() {
        let (mentor, factory) = mentor_with(ScriptedLoop::answering("ok"));
        let mut session = Session::new();
        mentor.respond("one", &mut session).await;
        mentor.respond("two", &mut session).await;

        let seen = factory.runner.last_history();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, Role::User);
        assert_eq!(seen[0].content.as_deref(), Some("one"));
        assert_eq!(seen[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn reset_after_twenty_exchanges_sends_empty_history() {
        let (mentor, factory) = mentor_with(ScriptedLoop::answering("sure"));
        let mut session = Session::new();
        for n in 0..20 {
            mentor.respond(&format!("q{}", n), &mut session).await;
        }

        mentor.reset(&mut session);
        assert!(session.history().is_empty());
        assert!(session.is_ready());

        mentor.respond("fresh start", &mut session).await;
        let seen = factory.runner.seen_history.lock().unwrap();
        assert!(seen.last().unwrap().is_empty());
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn failed_build_is_retried_and_success_is_cached() {
        let factory = Arc::new(FakeFactory::failing_first(ScriptedLoop::answering("hi"), 1));
        let mentor = Mentor::new(factory.clone());
        let mut session = Session::new();

        let first = mentor.respond("hello", &mut session).await;
        assert!(first.contains("provider unavailable"));
        assert!(!session.is_ready());
        assert!(session.history().is_empty());

        assert_eq!(mentor.respond("hello", &mut session).await, "hi");
        assert_eq!(mentor.respond("again", &mut session).await, "hi");
        assert!(session.is_ready());
        assert_eq!(factory.builds.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn sessions_do_not_share_history() {
        let (mentor, _) = mentor_with(ScriptedLoop::answering("ok"));
        let mut alice = Session::new();
        let mut bob = Session::new();

        mentor.respond("a", &mut alice).await;
        mentor.respond("b", &mut alice).await;
        mentor.respond("c", &mut bob).await;

        assert_eq!(alice.history().len(), 4);
        assert_eq!(bob.history().len(), 2);
    }
}
