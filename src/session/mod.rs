// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-memory session store keyed by the session cookie

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use serde_json::Value;

use crate::history::SessionState;

/// Upper bound on concurrently tracked sessions; the oldest session is
/// evicted when a new one would exceed it.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

/// One caller's session: categoried history lists plus a dirty flag the
/// persistence layer can poll after request handling.
pub struct Session {
    lists: HashMap<String, Vec<Value>>,
    dirty: bool,
    created_at: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            lists: HashMap::new(),
            dirty: false,
            created_at: Instant::now(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl SessionState for Session {
    fn get(&self, key: &str) -> Option<&Vec<Value>> {
        self.lists.get(key)
    }

    fn set(&mut self, key: &str, items: Vec<Value>) {
        self.lists.insert(key.to_string(), items);
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Process-wide session table. Sessions are created lazily on first access
/// and never shared across cookies.
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
        }
    }

    /// Run `f` against the session for `id`, creating it if absent.
    pub async fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(id) && sessions.len() >= self.max_sessions {
            Self::evict_oldest(&mut sessions);
        }
        let session = sessions.entry(id.to_string()).or_insert_with(Session::new);
        f(session)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn evict_oldest(sessions: &mut HashMap<String, Session>) {
        if let Some(oldest) = sessions
            .iter()
            .min_by_key(|(_, s)| s.created_at)
            .map(|(id, _)| id.clone())
        {
            sessions.remove(&oldest);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}
