//! Session storage
//!
//! Maps user identifiers to their counseling sessions. Each session sits
//! behind its own async mutex; holding it for a whole turn serializes
//! concurrent messages from the same user while other users proceed.

use crate::state_machine::Session;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared, lockable handle to one user's session
pub type SessionHandle = Arc<Mutex<Session>>;

/// Storage for per-user sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Return the user's session, inserting a fresh one on first contact
    async fn get_or_create(&self, user_id: &str) -> SessionHandle;

    /// Return the user's session without creating one
    #[cfg(test)]
    async fn get(&self, user_id: &str) -> Option<SessionHandle>;

    /// Replace the user's session with fresh defaults
    async fn reset(&self, user_id: &str);

    /// Number of known users
    #[cfg(test)]
    async fn len(&self) -> usize;
}

/// Process-lifetime in-memory store. Sessions are never evicted.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, user_id: &str) -> SessionHandle {
        // Fast path: already known
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(user_id) {
                return handle.clone();
            }
        }

        // Another request may have inserted between the two locks; entry() keeps the first
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(user_id.to_string())
            .or_insert_with(|| {
                tracing::info!(user_id = %user_id, "Created session");
                Arc::new(Mutex::new(Session::default()))
            })
            .clone()
    }

    #[cfg(test)]
    async fn get(&self, user_id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(user_id).cloned()
    }

    async fn reset(&self, user_id: &str) {
        // Reset through the handle so an in-flight turn finishes first
        let handle = self.get_or_create(user_id).await;
        handle.lock().await.reset();
        tracing::info!(user_id = %user_id, "Session reset");
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::CounselState;

    #[tokio::test]
    async fn test_get_or_create_returns_same_session() {
        let store = InMemorySessionStore::new();
        assert!(store.get("42").await.is_none());

        let first = store.get_or_create("42").await;
        first.lock().await.state = CounselState::Goal;

        let second = store.get_or_create("42").await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.lock().await.state, CounselState::Goal);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = InMemorySessionStore::new();
        store.get_or_create("a").await.lock().await.state = CounselState::Guidance;

        let b = store.get_or_create("b").await;
        assert!(b.lock().await.is_fresh());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let store = InMemorySessionStore::new();
        {
            let handle = store.get_or_create("7").await;
            let mut session = handle.lock().await;
            session.state = CounselState::Guidance;
            session.goal = Some("developer".to_string());
        }

        store.reset("7").await;
        assert!(store.get("7").await.unwrap().lock().await.is_fresh());

        // Resetting an unknown user leaves a fresh session behind
        store.reset("new").await;
        assert!(store.get("new").await.unwrap().lock().await.is_fresh());
    }

    #[tokio::test]
    async fn test_concurrent_first_contact_creates_one_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move { store.get_or_create("same").await }));
        }

        let mut handles = Vec::new();
        for task in tasks {
            handles.push(task.await.unwrap());
        }
        assert_eq!(store.len().await, 1);
        assert!(handles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
