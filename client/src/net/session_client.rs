//! The app-wide `SessionClient`.
//!
//! SYSTEM CONTEXT
//! ==============
//! One client per page load, shared by the route gates and every API helper
//! so they share the token slot and the in-flight refresh. Built lazily on
//! first use from `AppConfig::from_env`.

use std::rc::Rc;

use session::SessionClient;

use crate::config::AppConfig;
use crate::net::transport::{BrowserTimer, FetchTransport};
use crate::state::auth;
use crate::util::auth::LOGIN_PATH;
use crate::util::token_store::LocalStorageTokenStore;

thread_local! {
    static SESSION: SessionClient = build(&AppConfig::from_env());
}

/// Handle to the shared session client.
pub fn shared() -> SessionClient {
    SESSION.with(Clone::clone)
}

fn build(config: &AppConfig) -> SessionClient {
    log::debug!("session: api base {}", config.api_base);
    SessionClient::new(
        config.session.clone(),
        Rc::new(FetchTransport::new(&config.api_base)),
        Rc::new(LocalStorageTokenStore),
        Rc::new(BrowserTimer),
    )
    .with_expiry_hook(on_session_expired)
}

/// The interceptor could not refresh: drop the cached profile and go to the
/// login page with a full navigation so no stale view state survives.
fn on_session_expired() {
    auth::forget_profile();
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(LOGIN_PATH);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        log::debug!("session: expired; would navigate to {LOGIN_PATH}");
    }
}
