//! In-memory session table: uuid token -> logged-in identity.
//!
//! Tokens travel in an HttpOnly cookie. Expired entries are evicted
//! lazily on lookup; there is no background sweeper.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            ttl: Duration::minutes(ttl_minutes),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub async fn create(&self, username: &str, role: Role) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session {
            username: username.to_string(),
            role,
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    pub async fn get(&self, token: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(token) {
            Some(s) if s.expires_at > Utc::now() => Some(s.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    pub async fn remove(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = SessionStore::new(60);
        let token = store.create("rana", Role::User).await;

        let session = store.get(&token).await.expect("session exists");
        assert_eq!(session.username, "rana");
        assert_eq!(session.role, Role::User);

        assert!(store.get("no-such-token").await.is_none());
    }

    #[tokio::test]
    async fn test_logout_removes_session() {
        let store = SessionStore::new(60);
        let token = store.create("admin", Role::Admin).await;
        store.remove(&token).await;
        assert!(store.get(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_evicted() {
        // Zero TTL: the session is already expired on creation.
        let store = SessionStore::new(0);
        let token = store.create("rana", Role::User).await;
        assert!(store.get(&token).await.is_none());
        // Second lookup hits the removed entry path.
        assert!(store.get(&token).await.is_none());
    }
}
