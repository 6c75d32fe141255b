//! Session framework.
//!
//! [`SessionData`] is the per-request view of a user's session: a map of
//! string keys to JSON values. A [`SessionBackend`] loads it before the admin
//! runs and saves it afterwards. [`InMemorySessionBackend`] keeps sessions in a
//! process-wide map and is the default backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use adminplus_core::AdminError;

/// Data associated with a user session.
#[derive(Debug, Clone)]
pub struct SessionData {
    /// The unique session key identifying this session.
    pub session_key: String,
    /// The session data stored as a map of string keys to JSON values.
    pub data: HashMap<String, serde_json::Value>,
    /// The timestamp when this session expires.
    pub expire_date: DateTime<Utc>,
    /// Whether the session data has been modified since it was loaded.
    pub modified: bool,
}

impl Default for SessionData {
    fn default() -> Self {
        Self::new(generate_session_key())
    }
}

impl SessionData {
    /// Creates a new empty session with the given key and a two-week lifetime.
    pub fn new(session_key: String) -> Self {
        Self {
            session_key,
            data: HashMap::new(),
            expire_date: Utc::now() + Duration::weeks(2),
            modified: false,
        }
    }

    /// Creates a new empty session with a specified lifetime.
    pub fn with_lifetime(session_key: String, lifetime_seconds: i64) -> Self {
        Self {
            session_key,
            data: HashMap::new(),
            expire_date: Utc::now() + Duration::seconds(lifetime_seconds),
            modified: false,
        }
    }

    /// Gets a value from the session by key.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Sets a value in the session.
    pub fn set(&mut self, key: &str, value: serde_json::Value) {
        self.data.insert(key.to_string(), value);
        self.modified = true;
    }

    /// Removes a value from the session.
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        let result = self.data.remove(key);
        if result.is_some() {
            self.modified = true;
        }
        result
    }

    /// Returns `true` if the session has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expire_date
    }

    /// Clears all data from the session.
    pub fn flush(&mut self) {
        self.data.clear();
        self.modified = true;
    }

    /// Returns the number of entries in the session data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the session data is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A backend for storing and retrieving session data.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Loads session data for the given session key.
    async fn load(&self, session_key: &str) -> Result<SessionData, AdminError>;

    /// Saves session data and returns the session key.
    async fn save(&self, session: &SessionData) -> Result<String, AdminError>;

    /// Deletes a session by its key.
    async fn delete(&self, session_key: &str) -> Result<(), AdminError>;

    /// Checks whether a live session with the given key exists.
    async fn exists(&self, session_key: &str) -> Result<bool, AdminError>;

    /// Removes all expired sessions.
    async fn clear_expired(&self) -> Result<(), AdminError>;

    /// Loads the session for `session_key`, or starts a fresh one when the key
    /// is absent, unknown, or expired.
    async fn load_or_create(&self, session_key: Option<&str>) -> SessionData {
        match session_key {
            Some(key) => self.load(key).await.unwrap_or_else(|_| {
                tracing::debug!(session_key = key, "unknown session, starting a new one");
                SessionData::default()
            }),
            None => SessionData::default(),
        }
    }
}

/// An in-memory session backend.
///
/// Sessions are lost when the process exits.
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionBackend {
    sessions: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl InMemorySessionBackend {
    /// Creates a new in-memory session backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored sessions, expired ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns `true` if no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionBackend for InMemorySessionBackend {
    async fn load(&self, session_key: &str) -> Result<SessionData, AdminError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_key)
            .filter(|s| !s.is_expired())
            .cloned()
            .map(|mut s| {
                s.modified = false;
                s
            })
            .ok_or_else(|| AdminError::SessionError(format!("Session '{session_key}' not found")))
    }

    async fn save(&self, session: &SessionData) -> Result<String, AdminError> {
        let key = session.session_key.clone();
        self.sessions
            .write()
            .await
            .insert(key.clone(), session.clone());
        Ok(key)
    }

    async fn delete(&self, session_key: &str) -> Result<(), AdminError> {
        self.sessions.write().await.remove(session_key);
        Ok(())
    }

    async fn exists(&self, session_key: &str) -> Result<bool, AdminError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_key).is_some_and(|s| !s.is_expired()))
    }

    async fn clear_expired(&self) -> Result<(), AdminError> {
        self.sessions
            .write()
            .await
            .retain(|_, session| !session.is_expired());
        Ok(())
    }
}

/// Generates a new random session key.
pub fn generate_session_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_data_set_get_remove() {
        let mut session = SessionData::new("k".into());
        assert!(session.get("a").is_none());
        session.set("a", serde_json::json!({"Name": "Mark"}));
        assert!(session.modified);
        assert_eq!(session.get("a"), Some(&serde_json::json!({"Name": "Mark"})));
        assert!(session.remove("a").is_some());
        assert!(session.get("a").is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn test_remove_missing_does_not_mark_modified() {
        let mut session = SessionData::new("k".into());
        assert!(session.remove("missing").is_none());
        assert!(!session.modified);
    }

    #[test]
    fn test_session_expiry() {
        let session = SessionData::with_lifetime("k".into(), -1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_generate_session_key_unique() {
        let a = generate_session_key();
        let b = generate_session_key();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_in_memory_backend_round_trip() {
        let backend = InMemorySessionBackend::new();
        let mut session = SessionData::new("abc".into());
        session.set("x", serde_json::json!(1));
        backend.save(&session).await.unwrap();

        let loaded = backend.load("abc").await.unwrap();
        assert_eq!(loaded.get("x"), Some(&serde_json::json!(1)));
        assert!(!loaded.modified);
        assert!(backend.exists("abc").await.unwrap());

        backend.delete("abc").await.unwrap();
        assert!(!backend.exists("abc").await.unwrap());
    }

    #[tokio::test]
    async fn test_in_memory_backend_expired_not_loaded() {
        let backend = InMemorySessionBackend::new();
        backend
            .save(&SessionData::with_lifetime("old".into(), -10))
            .await
            .unwrap();
        assert!(backend.load("old").await.is_err());
        backend.clear_expired().await.unwrap();
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_load_or_create() {
        let backend = InMemorySessionBackend::new();
        let fresh = backend.load_or_create(Some("nope")).await;
        assert_ne!(fresh.session_key, "nope");

        backend.save(&SessionData::new("known".into())).await.unwrap();
        let known = backend.load_or_create(Some("known")).await;
        assert_eq!(known.session_key, "known");

        let none = backend.load_or_create(None).await;
        assert!(none.is_empty());
    }
}
