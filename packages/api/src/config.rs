//! # Client configuration: `inventory.toml` and environment
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api"
//!
//! [storage]
//! namespace = "staging"   # optional; scopes the persisted session keys
//! ```
//!
//! Every field has a default, so a missing or empty file equals
//! [`InventoryConfig::default`].
//!
//! | Source | Native | Wasm |
//! |--------|--------|------|
//! | `inventory.toml` | first hit in the directories given to [`InventoryConfig::load`] | not read |
//! | `INVENTORY_API_URL`, `INVENTORY_NAMESPACE` | runtime, after `.env` via `dotenvy` | baked in at compile time |
//!
//! Environment values win over the file.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "INVENTORY_API_URL";
/// Environment variable overriding [`StorageConfig::namespace`].
pub const NAMESPACE_ENV: &str = "INVENTORY_NAMESPACE";

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote API settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Session persistence settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Prefix for the persisted `token`/`user` keys. `None` uses the bare keys.
    #[serde(default)]
    pub namespace: Option<String>,
}

impl InventoryConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "inventory.toml"
    }

    /// Builder method to set the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Builder method to set the storage namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.storage.namespace = Some(namespace.into());
        self
    }

    /// Apply override values; blank ones are ignored.
    pub fn with_overrides(self, base_url: Option<String>, namespace: Option<String>) -> Self {
        let config = match base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => self.with_base_url(url),
            _ => self,
        };
        match namespace.as_deref().map(str::trim) {
            Some(ns) if !ns.is_empty() => config.with_namespace(ns),
            _ => config,
        }
    }

    /// Apply the `INVENTORY_API_URL` / `INVENTORY_NAMESPACE` overrides.
    pub fn apply_env(self) -> Self {
        let (base_url, namespace) = env_overrides();
        self.with_overrides(base_url, namespace)
    }

    /// Defaults plus the environment overrides.
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// The first `inventory.toml` found in `dirs`, or the defaults.
    ///
    /// An unparsable file is logged and ignored.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn read_file<P: AsRef<Path>>(dirs: &[P]) -> Self {
        for dir in dirs {
            let path = dir.as_ref().join(Self::filename());
            let Ok(text) = std::fs::read_to_string(&path) else {
                continue;
            };
            return match Self::from_toml(&text) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Ignoring invalid {}: {}", path.display(), e);
                    Self::default()
                }
            };
        }
        Self::default()
    }

    /// [`read_file`](Self::read_file) plus the environment overrides.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load<P: AsRef<Path>>(dirs: &[P]) -> Self {
        Self::read_file(dirs).apply_env()
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_overrides() -> (Option<String>, Option<String>) {
    dotenvy::dotenv().ok();
    (std::env::var(API_URL_ENV).ok(), std::env::var(NAMESPACE_ENV).ok())
}

#[cfg(target_arch = "wasm32")]
fn env_overrides() -> (Option<String>, Option<String>) {
    (
        option_env!("INVENTORY_API_URL").map(str::to_string),
        option_env!("INVENTORY_NAMESPACE").map(str::to_string),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = InventoryConfig::from_toml("").unwrap();
        assert_eq!(config, InventoryConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert!(config.storage.namespace.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let config = InventoryConfig::from_toml(
            r#"
            [api]
            base_url = "https://inventory.example.com/api"

            [storage]
            namespace = "staging"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://inventory.example.com/api");
        assert_eq!(config.storage.namespace.as_deref(), Some("staging"));
    }

    #[test]
    fn test_overrides_win_and_blank_is_ignored() {
        let config = InventoryConfig::default()
            .with_namespace("staging")
            .with_overrides(Some(" http://api.local/api ".into()), Some("  ".into()));
        assert_eq!(config.api.base_url, "http://api.local/api");
        assert_eq!(config.storage.namespace.as_deref(), Some("staging"));

        let config = config.with_overrides(None, Some("prod".into()));
        assert_eq!(config.api.base_url, "http://api.local/api");
        assert_eq!(config.storage.namespace.as_deref(), Some("prod"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_read_file_uses_first_hit() {
        let root = std::env::temp_dir().join(format!("inventory_config_{}", std::process::id()));
        let empty = root.join("empty");
        let found = root.join("found");
        let broken = root.join("broken");
        for dir in [&empty, &found, &broken] {
            std::fs::create_dir_all(dir).unwrap();
        }
        std::fs::write(
            found.join(InventoryConfig::filename()),
            "[storage]\nnamespace = \"staging\"\n",
        )
        .unwrap();
        std::fs::write(broken.join(InventoryConfig::filename()), "[api\n").unwrap();

        let config = InventoryConfig::read_file(&[&empty, &found, &broken]);
        assert_eq!(config.storage.namespace.as_deref(), Some("staging"));
        assert_eq!(config.api.base_url, "http://localhost:8080/api");

        assert_eq!(InventoryConfig::read_file(&[&broken]), InventoryConfig::default());
        assert_eq!(InventoryConfig::read_file(&[&empty]), InventoryConfig::default());

        std::fs::remove_dir_all(&root).ok();
    }
}
