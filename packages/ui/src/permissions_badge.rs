//! Role badge and the permission checklist shown on the dashboard.

use api::Permission;
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::icons::{FaBoxOpen, FaCheck, FaCrown, FaEye, FaLock, FaPen, FaPlus, FaShieldHalved, FaTrash, FaUser, FaUsers};
use crate::Icon;

/// Permissions listed in the full badge, in display order.
const LISTED: [Permission; 6] = [
    Permission::ViewProducts,
    Permission::CreateProducts,
    Permission::EditProducts,
    Permission::DeleteProducts,
    Permission::ViewLowStock,
    Permission::ManageUsers,
];

fn permission_icon(permission: Permission) -> Element {
    match permission {
        Permission::ViewProducts => rsx! { Icon { icon: FaEye, width: 14, height: 14 } },
        Permission::CreateProducts => rsx! { Icon { icon: FaPlus, width: 14, height: 14 } },
        Permission::EditProducts => rsx! { Icon { icon: FaPen, width: 14, height: 14 } },
        Permission::DeleteProducts => rsx! { Icon { icon: FaTrash, width: 14, height: 14 } },
        Permission::ViewLowStock => rsx! { Icon { icon: FaBoxOpen, width: 14, height: 14 } },
        Permission::ManageUsers => rsx! { Icon { icon: FaUsers, width: 14, height: 14 } },
    }
}

/// Role badge for the current user.
///
/// - **compact**: a pill with a crown (admin) or person icon
/// - **full**: role heading plus one row per permission, granted or locked
#[component]
pub fn PermissionsBadge(#[props(default)] compact: bool) -> Element {
    let auth = use_auth();
    let state = auth();
    let Some(session) = state.session.as_ref() else {
        return rsx! {};
    };
    let is_admin = session.is_admin();
    let table = session.permissions();
    let role_name = session.role_display_name();

    if compact {
        return rsx! {
            if is_admin {
                span {
                    class: "role-pill role-pill--admin",
                    Icon { icon: FaCrown, width: 14, height: 14 }
                    span { "Admin" }
                }
            } else {
                span {
                    class: "role-pill role-pill--user",
                    Icon { icon: FaUser, width: 14, height: 14 }
                    span { "{role_name}" }
                }
            }
        };
    }

    rsx! {
        div {
            class: "permissions-card",
            div {
                class: "permissions-card-header",
                span {
                    class: if is_admin { "permissions-card-icon admin" } else { "permissions-card-icon" },
                    if is_admin {
                        Icon { icon: FaCrown, width: 20, height: 20 }
                    } else {
                        Icon { icon: FaShieldHalved, width: 20, height: 20 }
                    }
                }
                div {
                    h3 { "{role_name} permissions" }
                    p {
                        if is_admin { "Full access to the inventory" } else { "Read-only access" }
                    }
                }
            }
            ul {
                class: "permissions-list",
                for (permission, key, granted) in LISTED.map(|p| (p, p.key(), table.get(p))) {
                    li {
                        key: "{key}",
                        class: if granted { "permission granted" } else { "permission denied" },
                        {permission_icon(permission)}
                        span { class: "permission-label", {permission.label()} }
                        if granted {
                            Icon { icon: FaCheck, width: 12, height: 12 }
                        } else {
                            Icon { icon: FaLock, width: 12, height: 12 }
                        }
                    }
                }
            }
        }
    }
}
