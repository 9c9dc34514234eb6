use crate::domain::model::Session;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Latest derived values per sender. A new birthdate replaces the old entry.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<i64, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, sender: i64, session: Session) {
        self.sessions.write().await.insert(sender, session);
    }

    pub async fn get(&self, sender: i64) -> Option<Session> {
        self.sessions.read().await.get(&sender).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
