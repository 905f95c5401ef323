use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use super::SessionState;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "resume_session";

/// A session's state. Hold the lock for the whole transition.
pub type SessionHandle = Arc<Mutex<SessionState>>;

struct Entry {
    state: SessionHandle,
    /// Unix millis of the last request that resolved this session.
    last_seen: AtomicI64,
}

impl Entry {
    fn new(now: i64) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new())),
            last_seen: AtomicI64::new(now),
        }
    }

    fn touch(&self, now: i64) {
        self.last_seen.store(now, Ordering::Relaxed);
    }
}

/// In-memory registry of live sessions. Nothing is persisted; idle sessions
/// are dropped when a new one is created.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Returns the session for `id`, creating a fresh one when the id is
    /// missing or unknown. The returned id is the one the cookie must carry.
    pub async fn resolve(&self, id: Option<Uuid>) -> (Uuid, SessionHandle) {
        let now = Utc::now().timestamp_millis();

        if let Some(id) = id {
            if let Some(entry) = self.sessions.read().await.get(&id) {
                entry.touch(now);
                return (id, entry.state.clone());
            }
        }

        let mut sessions = self.sessions.write().await;
        let cutoff = now - self.idle_timeout.num_milliseconds();
        evict_idle(&mut sessions, cutoff);

        let id = Uuid::new_v4();
        let entry = Entry::new(now);
        let state = entry.state.clone();
        sessions.insert(id, entry);
        info!(session = %id, live = sessions.len(), "Session started");
        (id, state)
    }

    /// Looks up an existing session without creating one.
    #[cfg(test)]
    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        let entry = sessions.get(&id)?;
        entry.touch(Utc::now().timestamp_millis());
        Some(entry.state.clone())
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    #[cfg(test)]
    async fn evict_idle_before(&self, cutoff: i64) {
        evict_idle(&mut *self.sessions.write().await, cutoff);
    }
}

fn evict_idle(sessions: &mut HashMap<Uuid, Entry>, cutoff: i64) {
    let before = sessions.len();
    sessions.retain(|_, entry| entry.last_seen.load(Ordering::Relaxed) >= cutoff);
    let evicted = before - sessions.len();
    if evicted > 0 {
        debug!(evicted, "Evicted idle sessions");
    }
}
