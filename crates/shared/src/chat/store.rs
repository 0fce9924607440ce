use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::context::AssistantVariant;
use super::session::ChatSession;

/// A session guarded by its own lock so one chat cycle at a time mutates it.
pub type SharedSession = Arc<tokio::sync::Mutex<ChatSession>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionStoreError {
    #[error("session {0} not found")]
    NotFound(Uuid),
    #[error("session {id} belongs to {existing}, not {requested}")]
    VariantMismatch {
        id: Uuid,
        existing: &'static str,
        requested: &'static str,
    },
}

/// Process-memory session registry keyed by session id. Nothing survives a
/// restart.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
    idle_ttl: Duration,
}

struct SessionEntry {
    variant: AssistantVariant,
    session: SharedSession,
}

impl SessionEntry {
    fn new(id: Uuid, variant: AssistantVariant, now: DateTime<Utc>) -> Self {
        Self {
            variant,
            session: Arc::new(tokio::sync::Mutex::new(ChatSession::new(id, variant, now))),
        }
    }
}

impl SessionStore {
    pub fn new(idle_ttl_seconds: u64) -> Self {
        let idle_ttl_seconds = i64::try_from(idle_ttl_seconds).unwrap_or(i64::MAX);
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_ttl: Duration::try_seconds(idle_ttl_seconds).unwrap_or(Duration::MAX),
        }
    }

    pub fn create(&self, variant: AssistantVariant, now: DateTime<Utc>) -> SharedSession {
        let id = Uuid::new_v4();
        let entry = SessionEntry::new(id, variant, now);
        let session = entry.session.clone();
        self.lock().insert(id, entry);
        info!(session_id = %id, variant = variant.as_str(), "session created");
        session
    }

    /// Returns the session for `id`, creating it on first use.
    pub fn get_or_init(
        &self,
        id: Uuid,
        variant: AssistantVariant,
        now: DateTime<Utc>,
    ) -> Result<SharedSession, SessionStoreError> {
        let mut sessions = self.lock();
        if let Some(existing) = sessions.get(&id) {
            if existing.variant != variant {
                return Err(SessionStoreError::VariantMismatch {
                    id,
                    existing: existing.variant.as_str(),
                    requested: variant.as_str(),
                });
            }
            return Ok(existing.session.clone());
        }

        let entry = SessionEntry::new(id, variant, now);
        let session = entry.session.clone();
        sessions.insert(id, entry);
        info!(session_id = %id, variant = variant.as_str(), "session initialized on first use");
        Ok(session)
    }

    pub fn get(&self, id: Uuid) -> Result<SharedSession, SessionStoreError> {
        self.lock()
            .get(&id)
            .map(|entry| entry.session.clone())
            .ok_or(SessionStoreError::NotFound(id))
    }

    /// Ends a session. Its history is dropped with it.
    pub fn remove(&self, id: Uuid) -> Result<(), SessionStoreError> {
        if self.lock().remove(&id).is_none() {
            return Err(SessionStoreError::NotFound(id));
        }
        info!(session_id = %id, "session ended");
        Ok(())
    }

    /// Drops sessions idle for longer than the configured TTL. Sessions in the
    /// middle of a chat cycle are locked and therefore kept.
    pub fn purge_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| match entry.session.try_lock() {
            Ok(session) => now.signed_duration_since(session.last_active_at()) <= self.idle_ttl,
            Err(_) => true,
        });
        let purged = before - sessions.len();
        if purged > 0 {
            debug!(purged, remaining = sessions.len(), "purged idle sessions");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
