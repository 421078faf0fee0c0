//! Wire types for the lookup and registration endpoints

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors from either remote call
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Address returned by the zip-code lookup
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Outcome of a registration request that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterResponse {
    /// Any 2xx
    Accepted,
    /// Non-2xx with field errors keyed by the server's field names
    Rejected {
        status: u16,
        errors: BTreeMap<String, String>,
    },
}

/// A server error message is either a string or a list of strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    fn into_message(self) -> String {
        match self {
            ErrorMessage::One(s) => s,
            ErrorMessage::Many(list) => list.join(" "),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: BTreeMap<String, serde_json::Value>,
}

/// Parse a non-2xx registration body into field errors.
///
/// Entries whose message is neither a string nor a list of strings are
/// skipped; the rest of the body still applies.
pub fn parse_error_body(body: &str) -> Result<BTreeMap<String, String>, ApiError> {
    let parsed: ErrorBody = serde_json::from_str(body)?;
    Ok(parsed
        .errors
        .into_iter()
        .filter_map(|(field, raw)| match serde_json::from_value::<ErrorMessage>(raw) {
            Ok(msg) => Some((field, msg.into_message())),
            Err(e) => {
                tracing::warn!("Skipping unreadable server error for {field}: {e}");
                None
            }
        })
        .collect())
}
