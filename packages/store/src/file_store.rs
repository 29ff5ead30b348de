//! # Filesystem-backed session storage
//!
//! [`FileStore`] is a [`StorageBackend`] that keeps each key in its own file.
//! It is the native counterpart of the browser's `localStorage`, so a login
//! made from a native build survives restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── token      # bearer token string
//! └── user       # JSON user record
//! ```
//!
//! ## Platform data directories
//!
//! Use `dirs::data_dir()` to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/inventory/` |
//! | Linux | `~/.local/share/inventory/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\inventory\` |

use std::path::PathBuf;

use crate::session::StorageBackend;

/// Filesystem-backed StorageBackend for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &std::path::Path {
        &self.base
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl StorageBackend for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!("Failed to create {}: {}", self.base.display(), e);
            return;
        }
        if let Err(e) = std::fs::write(self.key_path(key), value) {
            tracing::warn!("Failed to persist '{}': {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.key_path(key));
    }
}
