use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::session::StorageBackend;

/// In-memory StorageBackend for testing and non-web fallback.
///
/// Clones share the same map, so a value cleared through one handle is gone
/// for every other handle.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("token", "abc");
        assert_eq!(store.get("token"), Some("abc".to_string()));
        assert_eq!(store.len(), 1);

        store.set("token", "def");
        assert_eq!(store.get("token"), Some("def".to_string()));

        store.remove("token");
        assert!(store.get("token").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("user", "{}");
        assert_eq!(b.get("user"), Some("{}".to_string()));
        b.remove("user");
        assert!(a.get("user").is_none());
    }
}
