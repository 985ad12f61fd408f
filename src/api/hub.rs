//! Per-browser chat sessions held in memory.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::mentor::{Mentor, Session, TurnRole};

/// One rendered chat bubble.
#[derive(Debug, Clone)]
pub struct DisplayMessage {
    pub role: TurnRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl DisplayMessage {
    fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A web visitor's conversation plus what the page shows.
///
/// The transcript keeps every bubble, including fallback replies that the
/// mentor history leaves out.
#[derive(Debug, Default)]
pub struct WebSession {
    pub session: Session,
    pub transcript: Vec<DisplayMessage>,
    pub last_error: Option<String>,
    pub last_response_time: Option<Duration>,
}

impl WebSession {
    pub fn with_id(id: Uuid) -> Self {
        Self {
            session: Session::with_id(id),
            ..Default::default()
        }
    }

    /// Build the mentor loop if needed, remembering why it failed.
    pub fn warm_up(&mut self, mentor: &Mentor) {
        if self.session.is_ready() {
            return;
        }
        let outcome = mentor.ensure_ready(&mut self.session);
        match outcome {
            Ok(_) => self.last_error = None,
            Err(e) => {
                tracing::warn!(session = %self.session.id(), error = %e, "Mentor initialization failed");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Run one exchange and record both bubbles.
    pub async fn ask(&mut self, mentor: &Mentor, text: &str) -> String {
        self.transcript.push(DisplayMessage::new(TurnRole::Human, text));

        let started = Instant::now();
        let reply = mentor.respond(text, &mut self.session).await;
        self.last_response_time = Some(started.elapsed());

        self.transcript
            .push(DisplayMessage::new(TurnRole::Assistant, reply.as_str()));
        reply
    }

    /// Clear history and transcript.
    pub fn reset(&mut self, mentor: &Mentor) {
        mentor.reset(&mut self.session);
        self.transcript.clear();
        self.last_error = None;
        self.last_response_time = None;
    }
}

pub type SharedSession = Arc<Mutex<WebSession>>;

/// Idle time after which a session is dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

struct HubEntry {
    session: SharedSession,
    last_active: Instant,
}

impl HubEntry {
    /// Idle past the timeout and not held by any request.
    fn is_expired(&self, now: Instant, idle_timeout: Duration) -> bool {
        now.duration_since(self.last_active) > idle_timeout && Arc::strong_count(&self.session) == 1
    }
}

/// All live sessions, keyed by id.
///
/// Sessions idle longer than the timeout are evicted on the next `create`,
/// on lookup, or by the background sweeper.
#[derive(Clone)]
pub struct SessionHub {
    sessions: Arc<RwLock<HashMap<Uuid, HubEntry>>>,
    idle_timeout: Duration,
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    pub async fn create(&self) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(WebSession::with_id(id)));

        let mut sessions = self.sessions.write().await;
        let evicted = Self::retain_live(&mut sessions, self.idle_timeout);
        sessions.insert(
            id,
            HubEntry {
                session: session.clone(),
                last_active: Instant::now(),
            },
        );
        tracing::info!(session = %id, evicted, live = sessions.len(), "Session created");
        (id, session)
    }

    /// Look up a session and mark it active. Expired sessions are dropped.
    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let entry = sessions.get_mut(id)?;
        if entry.is_expired(now, self.idle_timeout) {
            sessions.remove(id);
            tracing::info!(session = %id, "Session expired");
            return None;
        }
        entry.last_active = now;
        Some(entry.session.clone())
    }

    /// Drop a session. Returns whether it existed.
    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session = %id, "Session closed");
        }
        removed
    }

    /// Drop every expired session, returning how many went.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::retain_live(&mut sessions, self.idle_timeout)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Periodically evict idle sessions until the runtime shuts down.
    pub fn spawn_sweeper(&self) -> tokio::task::JoinHandle<()> {
        let hub = self.clone();
        let period = (hub.idle_timeout / 2).clamp(Duration::from_secs(1), Duration::from_secs(60));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let evicted = hub.evict_idle().await;
                if evicted > 0 {
                    tracing::debug!(evicted, "Evicted idle sessions");
                }
            }
        })
    }

    fn retain_live(sessions: &mut HashMap<Uuid, HubEntry>, idle_timeout: Duration) -> usize {
        let before = sessions.len();
        let now = Instant::now();
        sessions.retain(|_, entry| !entry.is_expired(now, idle_timeout));
        before - sessions.len()
    }
}
