//! Browser `fetch` transport and timer for the session protocol.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, deadlines via
//! `gloo-timers`. Native builds (tests, tooling) get an inert transport that
//! reports itself unavailable, mirroring how the API helpers degrade off the
//! browser.

use std::time::Duration;

use async_trait::async_trait;
use session::{ApiRequest, ApiResponse, SessionError, Timer, Transport};

/// Sends requests to `{base_url}{request.path}`.
#[derive(Clone, Debug)]
pub struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, SessionError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::{Method, RequestBuilder};

            let method = match request.method {
                session::Method::Get => Method::GET,
                session::Method::Post => Method::POST,
                session::Method::Put => Method::PUT,
                session::Method::Patch => Method::PATCH,
                session::Method::Delete => Method::DELETE,
            };
            let url = self.url_for(&request.path);
            let mut builder = RequestBuilder::new(&url).method(method);
            if !request.query.is_empty() {
                builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            }
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if request.credentials {
                builder = builder.credentials(web_sys::RequestCredentials::Include);
            }
            let outgoing = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| SessionError::Build(e.to_string()))?;

            let resp = outgoing.send().await.map_err(|e| SessionError::Transport(e.to_string()))?;
            let status = resp.status();
            let headers = resp.headers().entries().collect();
            let body = resp.text().await.map_err(|e| SessionError::Transport(e.to_string()))?;
            Ok(ApiResponse { status, headers, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(SessionError::Transport("not available outside the browser".to_owned()))
        }
    }
}

/// `setTimeout`-backed timer. Off the browser it never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        #[cfg(feature = "csr")]
        {
            gloo_timers::future::sleep(duration).await;
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = duration;
            std::future::pending::<()>().await;
        }
    }
}
