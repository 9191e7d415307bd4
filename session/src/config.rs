//! Session protocol configuration.
//!
//! DESIGN
//! ======
//! Endpoint paths and invalid-token codes are a contract with the backend, so
//! they are data here rather than constants inside the state machine.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

/// Error codes the backend uses for an expired, malformed, or revoked token.
pub const DEFAULT_INVALID_TOKEN_CODES: [&str; 4] = ["AUTH-001", "AUTH-002", "AUTH-003", "AUTH-004"];

/// Response statuses that make the request interceptor try a refresh.
pub const DEFAULT_REFRESH_STATUSES: [u16; 2] = [400, 401];

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

/// Tunables for the guard, refresh, and interceptor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// `GET` endpoint that answers 2xx for a live access token.
    pub validate_path: String,
    /// Credentialed `POST` endpoint exchanging the refresh cookie for a token.
    pub refresh_path: String,
    /// `POST` endpoint exchanging credentials for a token.
    pub login_path: String,
    /// Header carrying the access token in both directions.
    pub token_header: String,
    /// Structured error codes that mean "token invalid, try a refresh".
    pub invalid_token_codes: Vec<String>,
    /// Statuses on which the interceptor refreshes and replays once.
    pub refresh_on_status: Vec<u16>,
    /// Per-request deadline; `None` or `0` disables it.
    pub request_timeout_ms: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            validate_path: "/auth/validate-token".to_owned(),
            refresh_path: "/auth/refresh".to_owned(),
            login_path: "/login".to_owned(),
            token_header: "authorization".to_owned(),
            invalid_token_codes: DEFAULT_INVALID_TOKEN_CODES.iter().map(|c| (*c).to_owned()).collect(),
            refresh_on_status: DEFAULT_REFRESH_STATUSES.to_vec(),
            request_timeout_ms: Some(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl SessionConfig {
    /// Whether `code` is one of the recognized invalid-token codes.
    #[must_use]
    pub fn is_invalid_token_code(&self, code: &str) -> bool {
        self.invalid_token_codes.iter().any(|known| known == code)
    }

    /// Whether a response with `status` should trigger refresh-and-replay.
    #[must_use]
    pub fn should_refresh_status(&self, status: u16) -> bool {
        self.refresh_on_status.contains(&status)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.filter(|ms| *ms > 0).map(Duration::from_millis)
    }
}
