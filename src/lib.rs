//! # Student Mentor
//!
//! A tool-augmented AI mentor for first-generation college students.
//!
//! This library provides:
//! - A conversation orchestrator with a capped rolling history
//! - A catalog of mentoring tools (internships, scholarships, roadmaps, emails, ...)
//! - A tool-calling agent loop over an OpenAI-compatible model API
//! - A console REPL and a web chat UI with a JSON API
//!
//! ## Architecture
//!
//! Every reply flows the same way:
//! 1. A surface hands the student's message to [`mentor::Mentor::respond`]
//! 2. The mentor formats the session history and invokes the loop
//! 3. The loop calls the model, executes requested tools, feeds results back
//! 4. The mentor normalizes the result, records the exchange and returns text
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use student_mentor::{agent::AgentFactory, config::Config, mentor::{Mentor, Session}};
//!
//! let config = Config::from_env()?;
//! let mentor = Mentor::new(Arc::new(AgentFactory::new(config)));
//! let mut session = Session::new();
//! let reply = mentor.respond("Help me find internships in data science", &mut session).await;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod console;
pub mod llm;
pub mod mentor;
pub mod search;
pub mod tools;

pub use config::Config;
