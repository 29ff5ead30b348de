//! # Role-derived permissions
//!
//! The permission table is a pure function of the current user's role. It is
//! never stored on its own; the session context re-derives it whenever the
//! user changes.
//!
//! | Permission | ADMIN | USER | no user |
//! |------------|:-----:|:----:|:-------:|
//! | `canCreateProducts` | yes | no | no |
//! | `canEditProducts` | yes | no | no |
//! | `canDeleteProducts` | yes | no | no |
//! | `canViewProducts` | yes | yes | no |
//! | `canViewLowStock` | yes | no | no |
//! | `canManageUsers` | yes | no | no |
//!
//! A user whose role is missing or unrecognized gets the USER column. ADMIN
//! applies when either `role` or any entry of `roles` names it.
//!
//! These checks gate the UI and short-circuit mutations locally. The server
//! enforces its own authorization independently.

use serde::Serialize;

use crate::error::ApiError;
use crate::models::{Role, User};

/// One capability the UI can gate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    CreateProducts,
    EditProducts,
    DeleteProducts,
    ViewProducts,
    ViewLowStock,
    ManageUsers,
}

impl Permission {
    pub const ALL: [Permission; 6] = [
        Permission::CreateProducts,
        Permission::EditProducts,
        Permission::DeleteProducts,
        Permission::ViewProducts,
        Permission::ViewLowStock,
        Permission::ManageUsers,
    ];

    /// The wire-style name, e.g. `canCreateProducts`.
    pub fn key(self) -> &'static str {
        match self {
            Permission::CreateProducts => "canCreateProducts",
            Permission::EditProducts => "canEditProducts",
            Permission::DeleteProducts => "canDeleteProducts",
            Permission::ViewProducts => "canViewProducts",
            Permission::ViewLowStock => "canViewLowStock",
            Permission::ManageUsers => "canManageUsers",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Short label for permission badges.
    pub fn label(self) -> &'static str {
        match self {
            Permission::CreateProducts => "Create",
            Permission::EditProducts => "Edit",
            Permission::DeleteProducts => "Delete",
            Permission::ViewProducts => "View",
            Permission::ViewLowStock => "Low stock",
            Permission::ManageUsers => "Manage users",
        }
    }

    fn action(self) -> &'static str {
        match self {
            Permission::CreateProducts => "create products",
            Permission::EditProducts => "edit products",
            Permission::DeleteProducts => "delete products",
            Permission::ViewProducts => "view products",
            Permission::ViewLowStock => "view low stock",
            Permission::ManageUsers => "manage users",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.action())
    }
}

/// The six booleans derived from a role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionTable {
    pub can_create_products: bool,
    pub can_edit_products: bool,
    pub can_delete_products: bool,
    pub can_view_products: bool,
    pub can_view_low_stock: bool,
    pub can_manage_users: bool,
}

impl PermissionTable {
    const ADMIN: Self = Self {
        can_create_products: true,
        can_edit_products: true,
        can_delete_products: true,
        can_view_products: true,
        can_view_low_stock: true,
        can_manage_users: true,
    };

    const USER: Self = Self {
        can_create_products: false,
        can_edit_products: false,
        can_delete_products: false,
        can_view_products: true,
        can_view_low_stock: false,
        can_manage_users: false,
    };

    /// Table for a role; `None` means nobody is logged in.
    pub fn for_role(role: Option<&Role>) -> Self {
        match role {
            None => Self::default(),
            Some(Role::Admin) => Self::ADMIN,
            Some(Role::User) | Some(Role::Unrecognized(_)) => Self::USER,
        }
    }

    pub fn get(&self, permission: Permission) -> bool {
        match permission {
            Permission::CreateProducts => self.can_create_products,
            Permission::EditProducts => self.can_edit_products,
            Permission::DeleteProducts => self.can_delete_products,
            Permission::ViewProducts => self.can_view_products,
            Permission::ViewLowStock => self.can_view_low_stock,
            Permission::ManageUsers => self.can_manage_users,
        }
    }

    /// Lookup by wire name. Unknown names are never granted.
    pub fn has(&self, key: &str) -> bool {
        Permission::from_key(key).is_some_and(|p| self.get(p))
    }

    /// `Ok` if granted, otherwise the fixed access-denied error.
    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        if self.get(permission) {
            Ok(())
        } else {
            tracing::warn!("Permission denied: {}", permission.key());
            Err(ApiError::PermissionDenied(permission))
        }
    }

    /// Granted permissions in table order.
    pub fn granted(&self) -> Vec<Permission> {
        Permission::ALL
            .into_iter()
            .filter(|p| self.get(*p))
            .collect()
    }
}

/// Derive the permission table for the given user.
pub fn derive_permissions(user: Option<&User>) -> PermissionTable {
    let role = user.map(User::privilege);
    PermissionTable::for_role(role.as_ref())
}
