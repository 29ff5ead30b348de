//! # Session persistence for the `token` / `user` pair
//!
//! This module is the only place in the workspace that knows how a login
//! survives a page reload. [`SessionStore`] wraps any [`StorageBackend`] and
//! reads or writes exactly two keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`TOKEN_KEY`] (`"token"`) | The bearer token string exactly as the server issued it |
//! | [`USER_KEY`] (`"user"`) | The user record, serialised as JSON |
//!
//! The two keys are written together by [`SessionStore::save`] and removed
//! together by [`SessionStore::clear`]. Nothing else in the workspace touches
//! the backend directly.
//!
//! ## [`StorageBackend`] trait
//!
//! A synchronous string key/value interface (`get` / `set` / `remove`), the
//! same shape as the browser's `localStorage`. Implementations live in sibling
//! modules ([`crate::memory`], [`crate::file_store`], and the wasm-only
//! `local_storage`).
//!
//! Backends swallow write failures after logging them: a storage quota or a
//! read-only directory degrades to "the session is not remembered", never to
//! a failed login.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the serialised user record.
pub const USER_KEY: &str = "user";

/// String key/value storage with `localStorage` semantics.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// A persisted login: token plus the user record it was issued for.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredSession<U> {
    pub token: String,
    pub user: U,
}

/// Typed access to the persisted session.
#[derive(Clone, Debug)]
pub struct SessionStore<B> {
    backend: B,
}

impl<B: StorageBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The stored token, read live from the backend on every call.
    /// An empty string counts as no token.
    pub fn token(&self) -> Option<String> {
        self.backend.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Load the persisted pair.
    ///
    /// Returns `Ok(None)` unless both keys are present. A user record that
    /// no longer deserialises into `U` is reported as `Err` so the caller
    /// can discard it.
    pub fn load<U: DeserializeOwned>(&self) -> Result<Option<StoredSession<U>>, serde_json::Error> {
        let (Some(token), Some(raw_user)) = (self.token(), self.backend.get(USER_KEY)) else {
            return Ok(None);
        };
        let user = serde_json::from_str(&raw_user)?;
        Ok(Some(StoredSession { token, user }))
    }

    /// Persist a token and its user record together.
    pub fn save<U: Serialize>(&self, token: &str, user: &U) -> Result<(), serde_json::Error> {
        let raw_user = serde_json::to_string(user)?;
        self.backend.set(TOKEN_KEY, token);
        self.backend.set(USER_KEY, &raw_user);
        Ok(())
    }

    /// Overwrite the stored user record, keeping the token.
    ///
    /// Does nothing when no token is stored, so a user record can never be
    /// persisted without its token.
    pub fn replace_user<U: Serialize>(&self, user: &U) -> Result<(), serde_json::Error> {
        if !self.has_token() {
            return Ok(());
        }
        let raw_user = serde_json::to_string(user)?;
        self.backend.set(USER_KEY, &raw_user);
        Ok(())
    }

    /// Remove both keys.
    pub fn clear(&self) {
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Profile {
        username: String,
        role: String,
    }

    fn admin() -> Profile {
        Profile {
            username: "admin".to_string(),
            role: "ADMIN".to_string(),
        }
    }

    #[test]
    fn test_save_and_load() {
        let store = SessionStore::new(MemoryStore::new());
        assert!(store.load::<Profile>().unwrap().is_none());

        store.save("Bearer abc", &admin()).unwrap();

        let session = store.load::<Profile>().unwrap().unwrap();
        assert_eq!(session.token, "Bearer abc");
        assert_eq!(session.user, admin());
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(backend.clone());
        store.save("abc", &admin()).unwrap();

        store.clear();

        assert!(backend.get(TOKEN_KEY).is_none());
        assert!(backend.get(USER_KEY).is_none());
        assert!(!store.has_token());
    }

    #[test]
    fn test_load_requires_both_keys() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(backend.clone());

        backend.set(TOKEN_KEY, "abc");
        assert!(store.load::<Profile>().unwrap().is_none());

        backend.remove(TOKEN_KEY);
        backend.set(USER_KEY, r#"{"username":"admin","role":"ADMIN"}"#);
        assert!(store.load::<Profile>().unwrap().is_none());
    }

    #[test]
    fn test_load_reports_corrupt_user() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(backend.clone());
        backend.set(TOKEN_KEY, "abc");
        backend.set(USER_KEY, "not json");

        assert!(store.load::<Profile>().is_err());
    }

    #[test]
    fn test_token_is_read_live() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(backend.clone());
        store.save("abc", &admin()).unwrap();
        assert!(store.has_token());

        // Cleared through another handle to the same backend
        backend.remove(TOKEN_KEY);
        assert!(!store.has_token());
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(backend.clone());
        backend.set(TOKEN_KEY, "");
        assert!(store.token().is_none());
    }

    #[test]
    fn test_replace_user_keeps_token() {
        let store = SessionStore::new(MemoryStore::new());
        store.save("abc", &admin()).unwrap();

        let renamed = Profile {
            username: "root".to_string(),
            role: "ADMIN".to_string(),
        };
        store.replace_user(&renamed).unwrap();

        let session = store.load::<Profile>().unwrap().unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.user, renamed);
    }

    #[test]
    fn test_replace_user_without_token_is_noop() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(backend.clone());
        store.replace_user(&admin()).unwrap();
        assert!(backend.get(USER_KEY).is_none());
    }
}
