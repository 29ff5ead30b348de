//! # User model for authenticated users
//!
//! [`User`] is the denormalized record the client keeps for the logged-in
//! user. It is built from the login response, persisted as JSON under the
//! `user` storage key, and read back at startup. It never carries the token.
//!
//! ## Roles
//!
//! The server sends the role claim as a string. [`Role`] maps the two known
//! values to `Admin` / `User` and keeps anything else as `Unrecognized`, so an
//! unknown claim survives a save/load cycle instead of failing to parse.
//! Older payloads may carry a `roles` array instead of (or besides) `role`;
//! a user holds a role if either field names it.
//!
//! ## Display helpers
//!
//! - [`User::display_name`]: first non-empty of `fullName`, `name`,
//!   `username`, `email`, falling back to [`DEFAULT_DISPLAY_NAME`].
//! - [`User::role_display_name`]: `"Administrator"` for admins, `"User"`
//!   for everyone else.

use serde::{Deserialize, Serialize};

/// Label used when a user has no usable name at all.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Role claim asserted by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    User,
    Unrecognized(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Unrecognized(other) => other,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            _ => "User",
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ADMIN" => Role::Admin,
            "USER" => Role::User,
            _ => Role::Unrecognized(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unrecognized(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logged-in user as the client stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Alias of `full_name` kept for records written by older clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
}

impl User {
    /// Whether `role` or any entry of `roles` equals the given role.
    pub fn has_role(&self, role: &Role) -> bool {
        self.role.as_ref() == Some(role) || self.roles.contains(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&Role::Admin)
    }

    pub fn is_user(&self) -> bool {
        self.has_role(&Role::User)
    }

    /// `role`, else the first of `roles`, else `USER`.
    pub fn effective_role(&self) -> Role {
        self.role
            .clone()
            .or_else(|| self.roles.first().cloned())
            .unwrap_or(Role::User)
    }

    /// The role permissions are derived from: ADMIN wins over USER wherever
    /// it appears, otherwise the effective role.
    pub fn privilege(&self) -> Role {
        if self.is_admin() {
            Role::Admin
        } else if self.is_user() {
            Role::User
        } else {
            self.effective_role()
        }
    }

    /// Get display name, falling back through name, username and email.
    pub fn display_name(&self) -> &str {
        [
            self.full_name.as_deref(),
            self.name.as_deref(),
            Some(self.username.as_str()),
            Some(self.email.as_str()),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    pub fn role_display_name(&self) -> &'static str {
        if self.is_admin() {
            Role::Admin.display_name()
        } else {
            Role::User.display_name()
        }
    }
}
