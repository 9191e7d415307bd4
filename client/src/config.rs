//! Build-time application configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle cannot read the process environment at runtime, so the
//! API base and session overrides are baked in from `MEETUPS_*` variables at
//! compile time. Anything unset or unparsable falls back to the defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use session::SessionConfig;

const DEFAULT_API_BASE: &str = "/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Prefix joined with every API path, without a trailing slash.
    pub api_base: String,
    pub session: SessionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { api_base: DEFAULT_API_BASE.to_owned(), session: SessionConfig::default() }
    }
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("MEETUPS_API_BASE"),
            option_env!("MEETUPS_INVALID_TOKEN_CODES"),
            option_env!("MEETUPS_REQUEST_TIMEOUT_MS"),
        )
    }

    fn from_values(api_base: Option<&str>, invalid_codes: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(base) = api_base {
            config.api_base = normalize_api_base(base);
        }
        if let Some(codes) = invalid_codes.and_then(parse_codes) {
            config.session.invalid_token_codes = codes;
        }
        if let Some(raw) = timeout_ms {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.session.request_timeout_ms = Some(ms),
                Err(_) => log::warn!("config: ignoring MEETUPS_REQUEST_TIMEOUT_MS={raw:?}"),
            }
        }
        config
    }
}

fn normalize_api_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn parse_codes(raw: &str) -> Option<Vec<String>> {
    let codes: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_owned)
        .collect();
    if codes.is_empty() { None } else { Some(codes) }
}
