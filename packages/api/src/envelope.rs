//! # Response envelope
//!
//! Every response from the inventory API, success or failure, is wrapped in
//! the same JSON object:
//!
//! ```json
//! { "success": true, "message": "Login successful", "data": { ... }, "timestamp": "2025-07-02T22:14:40" }
//! ```
//!
//! [`Envelope`] deserialises that wrapper with every field optional, because
//! failure responses routinely omit `data` and some endpoints answer with an
//! empty body. `data` is generic: a record, an array, or (for failures) a map
//! of field names to messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    /// The server message, if it sent a non-blank one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

impl Envelope<Value> {
    /// Per-field messages carried in `data` by validation failures.
    ///
    /// Only string values are kept; anything else in `data` is ignored.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        match &self.data {
            Some(Value::Object(map)) => map
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|msg| (k.clone(), msg.to_string())))
                .collect(),
            _ => BTreeMap::new(),
        }
    }
}
