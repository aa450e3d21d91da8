//! Registry of open sessions.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use uuid::Uuid;

use crate::session::Session;

/// Opaque session identifier.
pub type SessionId = Uuid;

/// Mapping from session identifier to open session.
///
/// An identifier present here always refers to a live, writable connection:
/// the transport removes entries synchronously when the connection closes,
/// so lookups never observe a dangling session. Identifiers are v4 UUIDs and
/// treated as collision-free for the lifetime of the process; a closed
/// session's identifier is never reused.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<Session>>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session under a freshly generated identifier.
    pub fn register(&self, session: Arc<Session>) -> SessionId {
        let id = Uuid::new_v4();
        self.sessions.write().unwrap().insert(id, session);
        tracing::debug!(session_id = %id, "session registered");
        id
    }

    /// Look up a live session.
    #[must_use]
    pub fn lookup(&self, id: SessionId) -> Option<Arc<Session>> {
        self.sessions.read().unwrap().get(&id).cloned()
    }

    /// Remove a session. Removing an absent identifier is a no-op.
    pub fn unregister(&self, id: SessionId) {
        if self.sessions.write().unwrap().remove(&id).is_some() {
            tracing::debug!(session_id = %id, "session unregistered");
        }
    }

    /// Number of open sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    /// Whether no sessions are open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().unwrap().is_empty()
    }
}
