//! Web surface: the browser chat page and a small JSON API.
//!
//! ## Endpoints
//!
//! - `GET /` - Open a new session and redirect to its page
//! - `GET /chat/:id` - Chat page (`?prefill=N` fills in a quick action)
//! - `POST /chat/:id/send` - Form post of `message`
//! - `POST /chat/:id/reset` - Clear the conversation
//! - `POST /api/sessions` - Create a session
//! - `GET /api/sessions/:id` - Session state and history
//! - `POST /api/sessions/:id/messages` - Send `{content}`, get `{reply, history_len}`
//! - `POST /api/sessions/:id/reset` - Clear the conversation
//! - `GET /api/health` - Health check

mod chat;
pub mod hub;
mod routes;
mod sessions;
pub mod types;
pub mod ui;

pub use routes::{router, serve, AppState};
pub use sessions::ApiError;
