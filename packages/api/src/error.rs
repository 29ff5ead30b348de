//! # Error taxonomy
//!
//! Every fallible operation in this crate returns `Result<T, ApiError>`.
//! The variants fall into two groups:
//!
//! | Group | Variants | Reaches the network? |
//! |-------|----------|----------------------|
//! | Local | [`PermissionDenied`](ApiError::PermissionDenied), [`Validation`](ApiError::Validation) | Never. Raised before any request is built. |
//! | Remote | [`Authentication`](ApiError::Authentication), [`Registration`](ApiError::Registration), [`Network`](ApiError::Network), [`Server`](ApiError::Server) | Produced from a transport failure or a server response. |
//!
//! Server-provided messages are carried verbatim. When the server gives no
//! message, the client substitutes a per-operation fallback (see
//! [`crate::client`]).
//!
//! `ApiError` is `Clone + PartialEq` so views can keep the last error in a
//! signal and tests can compare errors directly; transport errors are
//! flattened to their message for that reason.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::auth::Permission;

/// Fixed prefix rendered for every permission rejection.
pub const ACCESS_DENIED: &str = "Access denied";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The current role does not grant the permission. Raised locally.
    #[error("Access denied: you do not have permission to {0}")]
    PermissionDenied(Permission),

    /// Malformed input, caught before any request. `field` names the first
    /// offending field.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// The server rejected the credentials.
    #[error("{0}")]
    Authentication(String),

    /// The server rejected the new account, possibly with per-field messages.
    #[error("{}", registration_message(.message, .fields))]
    Registration {
        message: String,
        fields: BTreeMap<String, String>,
    },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a failure or with a body we could not read.
    #[error("{message}")]
    Server { status: Option<u16>, message: String },
}

/// The five error kinds views distinguish between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PermissionDenied,
    Validation,
    Authentication,
    Registration,
    NetworkOrServer,
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Registration { .. } => ErrorKind::Registration,
            Self::Network(_) | Self::Server { .. } => ErrorKind::NetworkOrServer,
        }
    }

    /// True for errors raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::PermissionDenied | ErrorKind::Validation
        )
    }

    /// Name of the offending field for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Field messages win over the summary message, joined the way the
/// registration form displays them.
fn registration_message(message: &str, fields: &BTreeMap<String, String>) -> String {
    if fields.is_empty() {
        message.to_string()
    } else {
        fields.values().cloned().collect::<Vec<_>>().join(", ")
    }
}
