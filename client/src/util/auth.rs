//! Shared auth navigation helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The private gate records where the visitor was heading before bouncing
//! them to `/login`; the login page consumes it afterwards. Only same-origin
//! paths outside the public-only pages are honored.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::util::storage;

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const HOME_PATH: &str = "/";

const RETURN_TO_KEY: &str = "meetups.return_to";

/// Remember `location` (path plus query) for the post-login redirect.
pub fn remember_return_to(location: &str) {
    storage::save_raw(RETURN_TO_KEY, location);
}

/// Consume the remembered location, falling back to home.
pub fn take_return_to() -> String {
    let stored = storage::load_raw(RETURN_TO_KEY);
    storage::remove(RETURN_TO_KEY);
    return_target(stored.as_deref())
}

/// Where to go after login given the remembered location.
pub fn return_target(stored: Option<&str>) -> String {
    match stored.map(str::trim) {
        Some(path) if is_safe_return_path(path) => path.to_owned(),
        _ => HOME_PATH.to_owned(),
    }
}

fn is_safe_return_path(path: &str) -> bool {
    if !path.starts_with('/') || path.starts_with("//") || path.contains('\\') {
        return false;
    }
    let route = path.split(['?', '#']).next().unwrap_or(path);
    ![LOGIN_PATH, SIGNUP_PATH].contains(&route.trim_end_matches('/'))
}
