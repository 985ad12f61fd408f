//! JSON session API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use thiserror::Error;
use uuid::Uuid;

use super::hub::SharedSession;
use super::routes::AppState;
use super::types::{
    CreateSessionResponse, ErrorResponse, HealthResponse, MessageRequest, MessageResponse,
    SessionView,
};
use crate::mentor::Mentor;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/messages", post(send_message))
        .route("/api/sessions/:id/reset", post(reset_session))
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unconfigured(String),

    #[error("session {0} not found")]
    SessionNotFound(Uuid),

    #[error("message content must not be empty")]
    EmptyMessage,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unconfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::EmptyMessage => StatusCode::BAD_REQUEST,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

fn configured_mentor(state: &AppState) -> Result<&Mentor, ApiError> {
    state
        .mentor()
        .map_err(|e| ApiError::Unconfigured(format!("{}. {}", e, e.remediation())))
}

async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, ApiError> {
    state
        .hub
        .get(&id)
        .await
        .ok_or(ApiError::SessionNotFound(id))
}

async fn health(State(state): State<Arc<AppState>>) -> Response {
    let configured = state.mentor().is_ok();
    let body = HealthResponse {
        status: if configured { "ok" } else { "unconfigured" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions: state.hub.len().await,
    };
    let status = if configured {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body)).into_response()
}

async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), ApiError> {
    let mentor = configured_mentor(&state)?;
    let (id, session) = state.hub.create().await;

    let mut web = session.lock().await;
    web.warm_up(mentor);

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            id,
            created_at: web.session.created_at(),
            ready: web.session.is_ready(),
        }),
    ))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    configured_mentor(&state)?;
    let session = find_session(&state, id).await?;
    let web = session.lock().await;

    Ok(Json(SessionView {
        id,
        created_at: web.session.created_at(),
        ready: web.session.is_ready(),
        history: web.session.history().turns().to_vec(),
        last_error: web.last_error.clone(),
    }))
}

async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    configured_mentor(&state)?;
    if state.hub.remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mentor = configured_mentor(&state)?;
    let session = find_session(&state, id).await?;

    let text = req.content.trim();
    if text.is_empty() {
        return Err(ApiError::EmptyMessage);
    }

    let mut web = session.lock().await;
    let reply = web.ask(mentor, text).await;

    Ok(Json(MessageResponse {
        reply,
        history_len: web.session.history().len(),
    }))
}

async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mentor = configured_mentor(&state)?;
    let session = find_session(&state, id).await?;
    session.lock().await.reset(mentor);
    Ok(StatusCode::NO_CONTENT)
}
