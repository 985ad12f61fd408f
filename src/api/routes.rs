//! HTTP route definitions and server startup.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::hub::SessionHub;
use super::{chat, sessions};
use crate::agent::AgentFactory;
use crate::config::{Config, ConfigError};
use crate::mentor::Mentor;

/// Shared application state.
pub struct AppState {
    mentor: Result<Mentor, ConfigError>,
    pub hub: SessionHub,
    pub dev_mode: bool,
}

impl AppState {
    /// State for a loaded configuration, or a blocking error state when it failed.
    pub fn new(config: Result<Config, ConfigError>) -> Self {
        match config {
            Ok(config) => {
                let dev_mode = config.dev_mode;
                let hub = SessionHub::with_idle_timeout(config.session_idle_timeout);
                let mentor = Mentor::new(Arc::new(AgentFactory::new(config)));
                Self::with_mentor(mentor, dev_mode).with_hub(hub)
            }
            Err(error) => Self::unconfigured(error),
        }
    }

    pub fn with_mentor(mentor: Mentor, dev_mode: bool) -> Self {
        Self {
            mentor: Ok(mentor),
            hub: SessionHub::new(),
            dev_mode,
        }
    }

    pub fn with_hub(mut self, hub: SessionHub) -> Self {
        self.hub = hub;
        self
    }

    pub fn unconfigured(error: ConfigError) -> Self {
        Self {
            mentor: Err(error),
            hub: SessionHub::new(),
            dev_mode: cfg!(debug_assertions),
        }
    }

    /// The mentor, or the configuration error that prevents building one.
    pub fn mentor(&self) -> Result<&Mentor, &ConfigError> {
        self.mentor.as_ref()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(chat::routes())
        .merge(sessions::routes())
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server.
pub async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
    if let Err(error) = state.mentor() {
        tracing::warn!(%error, "Serving without credentials; every page shows setup instructions");
    }

    let sweeper = state.hub.spawn_sweeper();
    info!(
        idle_timeout_secs = state.hub.idle_timeout().as_secs(),
        "Session sweeper started"
    );

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    let served = axum::serve(listener, app).await;
    sweeper.abort();
    served?;
    Ok(())
}
