//! # API crate: the inventory client core
//!
//! Everything the views need to talk to the inventory REST API and to reason
//! about the logged-in user. Nothing here depends on Dioxus, so the whole
//! crate is exercised by plain `cargo test`.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`InventoryApi`] trait and the `reqwest`-backed [`ApiClient`]; bearer token, envelope unwrapping, failure mapping |
//! | [`auth`] | [`SessionContext`] (login, register, restore, logout), the [`PermissionTable`] derived from the role, [`RegistrationForm`] checks |
//! | [`products`] | [`ProductDirectory`]: cached collection, filtered view, stats, create/update/delete with permission gates |
//! | [`models`] | Wire records: [`User`], [`Product`], login and registration bodies |
//! | [`envelope`] | The `{ success, message, data, timestamp }` wrapper every response uses |
//! | [`config`] | [`InventoryConfig`] from `inventory.toml` and `INVENTORY_API_URL` |
//! | [`error`] | [`ApiError`] and its [`ErrorKind`] |
//!
//! ## Data flow
//!
//! ```text
//! view ─► SessionContext / ProductDirectory ─► InventoryApi ─► HTTP
//!                   │                                              │
//!                   └── SessionStore (token, user) ◄── ApiClient reads token
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod models;
pub mod products;

#[cfg(test)]
mod test_support;

pub use auth::{
    derive_permissions, welcome_message, Permission, PermissionTable, RegistrationForm,
    SessionContext,
};
pub use client::{ApiClient, InventoryApi};
pub use config::InventoryConfig;
pub use error::{ApiError, ErrorKind};
pub use models::{Credentials, Product, ProductDraft, ProductForm, ProductId, Role, User};
pub use products::{
    CategoryFilter, Deletion, InventoryStats, Mutation, ProductDirectory, ProductFilter,
};
