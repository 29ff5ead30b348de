//! Platform-appropriate session persistence and API client.
//!
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorageStore`]
//! - **Desktop / Mobile** (native): one file per key under `<data_dir>/inventory/`
//!   via [`store::FileStore`]
//! - **WASM without `web`**: [`store::MemoryStore`], nothing survives a reload

use api::{ApiClient, ApiError, InventoryConfig, ProductDirectory, SessionContext};
use store::SessionStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type Backend = store::LocalStorageStore;
#[cfg(not(target_arch = "wasm32"))]
pub type Backend = store::FileStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type Backend = store::MemoryStore;

pub type Client = ApiClient<Backend>;
pub type Session = SessionContext<Client, Backend>;
pub type Directory = ProductDirectory<Client>;

/// Resolve the app config.
///
/// Native builds read `inventory.toml` from the working directory, then from
/// `<config_dir>/inventory/`. Wasm builds start from the defaults. Environment
/// overrides apply last on both.
pub fn load_config() -> InventoryConfig {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut search = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            search.push(cwd);
        }
        if let Some(config_dir) = dirs::config_dir() {
            search.push(config_dir.join("inventory"));
        }
        InventoryConfig::load(&search)
    }
    #[cfg(target_arch = "wasm32")]
    {
        InventoryConfig::from_env()
    }
}

/// Create the session store, scoped to `config.storage.namespace` when set.
pub fn make_session_store(config: &InventoryConfig) -> SessionStore<Backend> {
    let namespace = config.storage.namespace.as_deref();
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        SessionStore::new(store::LocalStorageStore::with_namespace(namespace))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("inventory");
        let scoped = match namespace {
            Some(ns) => base.join(ns),
            None => base,
        };
        SessionStore::new(store::FileStore::new(scoped))
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        let _ = namespace;
        SessionStore::new(store::MemoryStore::new())
    }
}

/// An empty, not yet restored session for `config`.
pub fn make_session(config: &InventoryConfig) -> Result<Session, ApiError> {
    let session_store = make_session_store(config);
    let client = ApiClient::new(&config.api, session_store.clone())?;
    Ok(SessionContext::new(client, session_store))
}
