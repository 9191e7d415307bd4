//! Error type shared by the guard, refresh, and interceptor.
//!
//! ERROR HANDLING
//! ==============
//! Values are `Clone` because one refresh outcome is handed to every caller
//! waiting on the same single-flight refresh.

use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),
    #[error("{}", status_message(.status, .code, .message))]
    Status {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },
    #[error("response did not carry an access token")]
    MissingToken,
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    Build(String),
}

impl SessionError {
    /// HTTP status for server-reported failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured backend error code, when the response carried one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Status { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref, clippy::ref_option)]
fn status_message(status: &u16, code: &Option<String>, message: &Option<String>) -> String {
    match (code.as_deref(), message.as_deref()) {
        (Some(code), Some(message)) => format!("server returned {status} ({code}): {message}"),
        (Some(code), None) => format!("server returned {status} ({code})"),
        (None, Some(message)) => format!("server returned {status}: {message}"),
        (None, None) => format!("server returned {status}"),
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
