use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("User already exists")]
    DuplicateEmail,
    #[error("Username already exists")]
    DuplicateUsername,
}

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    /// Argon2 PHC string; the plaintext credential is never stored.
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Persistence seam for user accounts. The real backend lives behind an
/// out-of-scope ORM; the service only depends on this interface.
pub trait UserStore: Send + Sync {
    fn insert(&self, user: UserRecord) -> Result<(), StoreError>;
    fn find_by_email(&self, email: &str) -> Option<UserRecord>;
    fn find_by_id(&self, id: Uuid) -> Option<UserRecord>;
    fn list(&self) -> Vec<UserRecord>;
}

#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<Uuid, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn insert(&self, user: UserRecord) -> Result<(), StoreError> {
        let mut guard = self.inner.write().expect("rwlock poisoned");
        if guard.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        if guard
            .values()
            .any(|existing| existing.username == user.username)
        {
            return Err(StoreError::DuplicateUsername);
        }
        guard.insert(user.id, user);
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        let guard = self.inner.read().expect("rwlock poisoned");
        guard.values().find(|user| user.email == email).cloned()
    }

    fn find_by_id(&self, id: Uuid) -> Option<UserRecord> {
        let guard = self.inner.read().expect("rwlock poisoned");
        guard.get(&id).cloned()
    }

    fn list(&self) -> Vec<UserRecord> {
        let guard = self.inner.read().expect("rwlock poisoned");
        let mut users: Vec<_> = guard.values().cloned().collect();
        users.sort_by_key(|user| user.created_at);
        users
    }
}

#[derive(Debug, Clone)]
pub struct SongRecord {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub lyrics: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct InMemorySongStore {
    inner: RwLock<HashMap<Uuid, SongRecord>>,
}

impl InMemorySongStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, song: SongRecord) {
        let mut guard = self.inner.write().expect("rwlock poisoned");
        guard.insert(song.id, song);
    }

    pub fn get(&self, id: Uuid) -> Option<SongRecord> {
        let guard = self.inner.read().expect("rwlock poisoned");
        guard.get(&id).cloned()
    }

    pub fn remove(&self, id: Uuid) -> Option<SongRecord> {
        let mut guard = self.inner.write().expect("rwlock poisoned");
        guard.remove(&id)
    }

    pub fn list(&self) -> Vec<SongRecord> {
        let guard = self.inner.read().expect("rwlock poisoned");
        let mut songs: Vec<_> = guard.values().cloned().collect();
        songs.sort_by_key(|song| song.created_at);
        songs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, username: &str) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: "USER".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn insert_enforces_unique_email_and_username() {
        let store = InMemoryUserStore::new();
        store.insert(user("a@example.com", "alice")).expect("first");

        assert_eq!(
            store.insert(user("a@example.com", "alice2")),
            Err(StoreError::DuplicateEmail)
        );
        assert_eq!(
            store.insert(user("b@example.com", "alice")),
            Err(StoreError::DuplicateUsername)
        );
    }

    #[test]
    fn lookup_by_email_and_id() {
        let store = InMemoryUserStore::new();
        let record = user("a@example.com", "alice");
        let id = record.id;
        store.insert(record).expect("insert");

        assert_eq!(store.find_by_email("a@example.com").map(|u| u.id), Some(id));
        assert!(store.find_by_email("missing@example.com").is_none());
        assert_eq!(store.find_by_id(id).map(|u| u.username), Some("alice".into()));
    }
}
