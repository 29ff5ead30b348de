//! This crate contains all shared UI for the workspace.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod platform;
pub use platform::{load_config, make_session, make_session_store, Directory, Session};

pub mod views;

mod navbar;
pub use navbar::Navbar;

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

pub mod alerts;
pub use alerts::{alert_error, push_alert, AlertLevel, AlertStack, Alerts, use_alerts};

mod inventory;
pub use inventory::{use_inventory, Inventory};

mod permissions_badge;
pub use permissions_badge::PermissionsBadge;

mod stats_grid;
pub use stats_grid::{format_count, format_currency, StatsGrid};

mod product_table;
pub use product_table::ProductTable;

mod product_modal;
pub use product_modal::{ModalMode, ProductModal};
