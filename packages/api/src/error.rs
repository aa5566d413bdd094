//! Error type for every API operation.

use serde_json::Value;

/// Why an API call failed.
///
/// `Display` is the message shown to the user: for [`ApiError::Status`] that
/// is the message the backend put in its response body.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The request never produced a response (DNS, connect, CORS, aborted).
    #[error("{0}")]
    Transport(String),
    /// A success response whose body did not match the expected type.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    /// The client could not be configured, e.g. an unusable base URL.
    #[error("Invalid API configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        ApiError::Transport(err.to_string())
    }

    /// Build a status error, pulling a message out of `body` when it has one.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// FastAPI puts errors in `detail`, either a string or a list of
/// validation entries with a `msg` each.
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(json) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    match json.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return Some(detail.clone()),
        Some(Value::Array(entries)) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }

    if let Some(Value::String(message)) = json.get("message") {
        if !message.is_empty() {
            return Some(message.clone());
        }
    }

    match json {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => Some(trimmed.to_string()),
    }
}
