//! Browser chat pages.
//!
//! `GET /` opens a new session, `GET /chat/:id` renders it, and the form
//! posts redirect back to the page once the exchange is done.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use uuid::Uuid;

use super::routes::AppState;
use super::types::{ChatPageQuery, SendForm};
use super::ui;
use crate::config::ConfigError;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/chat/:id", get(chat_page))
        .route("/chat/:id/send", post(send))
        .route("/chat/:id/reset", post(reset))
}

fn page_url(id: Uuid) -> String {
    format!("/chat/{}", id)
}

fn config_error(error: &ConfigError) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Html(ui::config_error_page(error)),
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(ui::not_found_page())).into_response()
}

async fn index(State(state): State<Arc<AppState>>) -> Response {
    let mentor = match state.mentor() {
        Ok(mentor) => mentor,
        Err(error) => return config_error(error),
    };

    let (id, session) = state.hub.create().await;
    session.lock().await.warm_up(mentor);
    Redirect::to(&page_url(id)).into_response()
}

async fn chat_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ChatPageQuery>,
) -> Response {
    let mentor = match state.mentor() {
        Ok(mentor) => mentor,
        Err(error) => return config_error(error),
    };
    let Some(session) = state.hub.get(&id).await else {
        return not_found();
    };

    let mut web = session.lock().await;
    web.warm_up(mentor);
    let prefill = query.prefill_index().and_then(ui::quick_action_text);
    Html(ui::chat_page(&web, prefill, state.dev_mode)).into_response()
}

async fn send(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Form(form): Form<SendForm>,
) -> Response {
    let mentor = match state.mentor() {
        Ok(mentor) => mentor,
        Err(error) => return config_error(error),
    };
    let Some(session) = state.hub.get(&id).await else {
        return not_found();
    };

    let text = form.message.trim();
    if !text.is_empty() {
        session.lock().await.ask(mentor, text).await;
    }
    Redirect::to(&page_url(id)).into_response()
}

async fn reset(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Response {
    let mentor = match state.mentor() {
        Ok(mentor) => mentor,
        Err(error) => return config_error(error),
    };
    let Some(session) = state.hub.get(&id).await else {
        return not_found();
    };

    session.lock().await.reset(mentor);
    Redirect::to(&page_url(id)).into_response()
}
