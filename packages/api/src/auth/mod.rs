//! Authentication: role permissions, registration form checks and the
//! session context.

mod permissions;
mod registration;
mod session;

pub use permissions::{derive_permissions, Permission, PermissionTable};
pub use registration::{RegistrationForm, MIN_PASSWORD_LEN};
pub use session::{welcome_message, SessionContext};
