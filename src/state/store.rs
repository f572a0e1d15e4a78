//! Concurrency-safe registry of live sessions for one variant.
//!
//! Each session sits behind its own [`RwLock`], so moves on one id are serialized
//! while different ids never contend. Mutations run against a scratch copy and
//! are published in a single assignment before the write guard drops; readers
//! therefore only ever observe the state before or after a complete move.

use std::sync::Arc;

use dashmap::{DashMap, mapref::entry::Entry};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::ServiceError,
    state::session::{Session, SessionStatus, Variant},
};

type Slot = Arc<RwLock<Session>>;

/// In-memory sessions of a single variant, keyed by session id.
pub struct SessionStore {
    variant: Variant,
    sessions: DashMap<Uuid, Slot>,
}

impl SessionStore {
    /// Create an empty store for `variant`.
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            sessions: DashMap::new(),
        }
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no session.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Register a freshly built session and return its id.
    pub fn create(&self, session: Session) -> Result<Uuid, ServiceError> {
        if session.variant != self.variant {
            return Err(ServiceError::Internal(format!(
                "{} session offered to the {} store",
                session.variant, self.variant
            )));
        }

        let id = session.id;
        match self.sessions.entry(id) {
            Entry::Occupied(_) => Err(ServiceError::Internal(format!(
                "duplicate session id `{id}`"
            ))),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(RwLock::new(session)));
                Ok(id)
            }
        }
    }

    /// Snapshot of the session with `id`, if present.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        let slot = self.slot(id)?;
        let guard = slot.read().await;
        Some(guard.clone())
    }

    /// Snapshots of every live session.
    pub async fn list(&self) -> Vec<Session> {
        let slots: Vec<Slot> = self
            .sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        let mut sessions = Vec::with_capacity(slots.len());
        for slot in slots {
            sessions.push(slot.read().await.clone());
        }
        sessions
    }

    /// Run `work` with exclusive access to the session and publish its changes on success.
    ///
    /// On error the stored session is left untouched.
    pub async fn with_lock<T, F>(&self, id: Uuid, work: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Session) -> Result<T, ServiceError>,
    {
        let slot = self.slot(id).ok_or_else(|| not_found(self.variant, id))?;
        let mut guard = slot.write().await;

        let mut draft = guard.clone();
        let outcome = work(&mut draft)?;
        *guard = draft;

        Ok(outcome)
    }

    /// Remove the session and mark it terminated for any caller still holding it.
    pub async fn delete(&self, id: Uuid) -> Result<Session, ServiceError> {
        let (_, slot) = self
            .sessions
            .remove(&id)
            .ok_or_else(|| not_found(self.variant, id))?;

        let mut guard = slot.write().await;
        guard.status = SessionStatus::Terminated;
        debug!(session_id = %id, variant = %self.variant, "session slot released");
        Ok(guard.clone())
    }

    fn slot(&self, id: Uuid) -> Option<Slot> {
        // Clone the handle out so the shard lock is not held across an await.
        self.sessions.get(&id).map(|entry| entry.value().clone())
    }
}

fn not_found(variant: Variant, id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("{variant} session `{id}` not found"))
}
