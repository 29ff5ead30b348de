//! # Browser `localStorage` backend
//!
//! [`LocalStorageStore`] is the [`StorageBackend`] used on the **web platform**.
//! It reads and writes `window.localStorage` through `web-sys`, which is where
//! the session lives between page reloads.
//!
//! Each instance can be scoped to a namespace: keys are then written as
//! `"<namespace>:<key>"`, so two deployments on the same origin do not share a
//! session. Without a namespace the bare keys (`token`, `user`) are used.
//!
//! All operations silently degrade when storage is unavailable (private
//! browsing, disabled storage): reads return `None`, writes are logged and
//! dropped.

use crate::session::StorageBackend;

/// `window.localStorage`-backed StorageBackend.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    prefix: Option<String>,
}

impl LocalStorageStore {
    /// Unscoped store using the bare key names.
    pub fn new() -> Self {
        Self::with_namespace(None)
    }

    /// Store scoped to an optional namespace.
    pub fn with_namespace(namespace: Option<&str>) -> Self {
        Self {
            prefix: namespace.map(str::to_string),
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    fn scoped(&self, key: &str) -> String {
        match &self.prefix {
            Some(ns) => format!("{ns}:{key}"),
            None => key.to_string(),
        }
    }
}

impl StorageBackend for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(&self.scoped(key)).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable, '{}' not persisted", key);
            return;
        };
        if storage.set_item(&self.scoped(key), value).is_err() {
            tracing::warn!("localStorage rejected write of '{}'", key);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.scoped(key));
        }
    }
}
