//! Session guard, single-flight refresh, and the auto-refresh interceptor.
//!
//! ARCHITECTURE
//! ============
//! Route gates call `ensure_session`; every API helper calls `send`. Both
//! funnel token renewal through `refresh`, so there is exactly one copy of
//! the retry policy.
//!
//! ```text
//! ensure_session: no token ──────────────────────────────► Unauthenticated
//!                 validate 2xx ──────────────────────────► Authenticated
//!                 validate error, recognized code ─► refresh ok ─► Authenticated
//!                                                  └ refresh err ► Unauthenticated (token cleared)
//!                 anything else ─────────────────────────► Unauthenticated
//! ```
//!
//! CONCURRENCY
//! ===========
//! Single-threaded (`Rc`). While a refresh is in flight every other caller
//! awaits the same shared future, so two views mounting at once spend one
//! refresh cookie, not two. The slot empties when the refresh settles.
//!
//! ERROR HANDLING
//! ==============
//! The guard never errors: ambiguous failures resolve `Unauthenticated`.
//! The interceptor surfaces a single final `SessionError` to the caller after
//! at most one replay.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::guard::SessionStatus;
use crate::http::{ApiRequest, ApiResponse, Transport};
use crate::store::TokenStore;
use crate::timer::{Timer, with_deadline};

type RefreshFuture = Shared<LocalBoxFuture<'static, Result<String, SessionError>>>;

/// Handle to the session protocol. Cheap to clone; clones share the
/// transport, token slot, and in-flight refresh.
#[derive(Clone)]
pub struct SessionClient {
    config: Rc<SessionConfig>,
    transport: Rc<dyn Transport>,
    store: Rc<dyn TokenStore>,
    timer: Rc<dyn Timer>,
    on_expired: Option<Rc<dyn Fn()>>,
    inflight: Rc<RefCell<Option<RefreshFuture>>>,
}

impl SessionClient {
    pub fn new(
        config: SessionConfig,
        transport: Rc<dyn Transport>,
        store: Rc<dyn TokenStore>,
        timer: Rc<dyn Timer>,
    ) -> Self {
        Self {
            config: Rc::new(config),
            transport,
            store,
            timer,
            on_expired: None,
            inflight: Rc::new(RefCell::new(None)),
        }
    }

    /// Hook run when the interceptor gives up on a session (refresh failed),
    /// typically a hard navigation to the login page.
    #[must_use]
    pub fn with_expiry_hook(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_expired = Some(Rc::new(hook));
        self
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The stored access token; an empty value counts as absent.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.store.load().filter(|token| !token.trim().is_empty())
    }

    /// Drop the local credential. The refresh cookie is server-managed.
    pub fn logout(&self) {
        self.store.clear();
        debug!("session: token cleared by logout");
    }

    /// Resolve the current session to a terminal status.
    ///
    /// Makes no network call without a stored token, and at most one refresh.
    pub async fn ensure_session(&self) -> SessionStatus {
        let Some(token) = self.access_token() else {
            debug!("session: no stored token");
            return SessionStatus::Unauthenticated;
        };

        let mut request = ApiRequest::get(self.config.validate_path.as_str());
        request.set_header(&self.config.token_header, &token);

        let response = match self.dispatch(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!("session: validation failed: {err}");
                return SessionStatus::Unauthenticated;
            }
        };
        if response.is_success() {
            debug!("session: token valid");
            return SessionStatus::Authenticated;
        }

        match response.error_code() {
            Some(code) if self.config.is_invalid_token_code(&code) => {
                debug!("session: token rejected with {code}, refreshing");
                match self.refresh().await {
                    Ok(_) => SessionStatus::Authenticated,
                    Err(_) => SessionStatus::Unauthenticated,
                }
            }
            code => {
                debug!("session: validation returned {} with code {code:?}", response.status);
                SessionStatus::Unauthenticated
            }
        }
    }

    /// Exchange the refresh cookie for a new access token.
    ///
    /// On success the new token is stored before this resolves; on failure the
    /// stored token is removed. Concurrent callers share one request.
    ///
    /// # Errors
    ///
    /// Returns the refresh failure; the local session is gone at that point.
    pub async fn refresh(&self) -> Result<String, SessionError> {
        let pending = {
            let mut slot = self.inflight.borrow_mut();
            if let Some(pending) = slot.as_ref() {
                debug!("session: joining in-flight refresh");
                pending.clone()
            } else {
                let this = self.clone();
                let pending = async move {
                    let outcome = this.refresh_once().await;
                    this.inflight.borrow_mut().take();
                    outcome
                }
                .boxed_local()
                .shared();
                *slot = Some(pending.clone());
                pending
            }
        };
        pending.await
    }

    async fn refresh_once(&self) -> Result<String, SessionError> {
        let request = ApiRequest::post(self.config.refresh_path.as_str()).with_credentials();
        let outcome = match self.dispatch(&request).await {
            Ok(response) if response.is_success() => self.token_from(&response).ok_or(SessionError::MissingToken),
            Ok(response) => Err(response.into_error()),
            Err(err) => Err(err),
        };
        match &outcome {
            Ok(token) => {
                self.store.save(token);
                info!("session: access token refreshed");
            }
            Err(err) => {
                self.store.clear();
                warn!("session: refresh failed, token cleared: {err}");
            }
        }
        outcome
    }

    /// Send an authenticated request with one refresh-and-replay on a
    /// refreshable status.
    ///
    /// # Errors
    ///
    /// Transport failures and timeouts as-is; non-2xx responses as
    /// `SessionError::Status`. When the refresh fails the original response's
    /// error is returned and the expiry hook runs.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, SessionError> {
        if let Some(token) = self.access_token() {
            request.set_header(&self.config.token_header, &token);
        }

        let response = self.dispatch(&request).await?;
        if response.is_success() {
            return Ok(response);
        }
        if request.retried || !self.config.should_refresh_status(response.status) {
            return Err(response.into_error());
        }

        debug!("session: {} {} returned {}, refreshing", request.method.as_str(), request.path, response.status);
        match self.refresh().await {
            Ok(token) => {
                request.retried = true;
                request.set_header(&self.config.token_header, &token);
                let replay = self.dispatch(&request).await?;
                if replay.is_success() { Ok(replay) } else { Err(replay.into_error()) }
            }
            Err(_) => {
                if let Some(hook) = &self.on_expired {
                    hook();
                }
                Err(response.into_error())
            }
        }
    }

    /// `send`, then decode the body as JSON.
    ///
    /// # Errors
    ///
    /// As `send`, plus `SessionError::Decode` for a body that is not a `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, SessionError> {
        self.send(request).await?.json()
    }

    /// Send a request with no token and no refresh, for endpoints used while
    /// signed out (registration). A 400 there is a validation error.
    ///
    /// # Errors
    ///
    /// As `send`, without the replay.
    pub async fn send_anonymous(&self, request: ApiRequest) -> Result<ApiResponse, SessionError> {
        let response = self.dispatch(&request).await?;
        if response.is_success() { Ok(response) } else { Err(response.into_error()) }
    }

    /// Exchange credentials for a token and store it.
    ///
    /// Bypasses the interceptor: a 400/401 here means bad credentials, not an
    /// expired token. Credentialed so the server can set the refresh cookie.
    ///
    /// # Errors
    ///
    /// `SessionError::Status` for rejected credentials, `MissingToken` when a
    /// 2xx response carries no token header.
    pub async fn login<C: Serialize + ?Sized>(&self, credentials: &C) -> Result<ApiResponse, SessionError> {
        let request = ApiRequest::post(self.config.login_path.as_str()).with_json(credentials)?.with_credentials();
        let response = self.dispatch(&request).await?;
        if !response.is_success() {
            return Err(response.into_error());
        }
        let token = self.token_from(&response).ok_or(SessionError::MissingToken)?;
        self.store.save(&token);
        info!("session: signed in");
        Ok(response)
    }

    fn token_from(&self, response: &ApiResponse) -> Option<String> {
        response
            .header(&self.config.token_header)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, SessionError> {
        with_deadline(self.timer.as_ref(), self.config.request_timeout(), self.transport.send(request)).await
    }
}
