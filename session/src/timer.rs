//! Request deadlines.
//!
//! The protocol never owns a runtime; the host supplies a `Timer` (gloo
//! timers in the browser, tokio in tests) and every network call races it.

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{Either, select};

use crate::error::SessionError;

#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// A timer that never fires; requests run without a deadline.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDeadline;

#[async_trait(?Send)]
impl Timer for NoDeadline {
    async fn sleep(&self, _duration: Duration) {
        std::future::pending::<()>().await;
    }
}

/// Run `fut`, failing with `SessionError::Timeout` once `limit` elapses.
pub(crate) async fn with_deadline<T, F>(timer: &dyn Timer, limit: Option<Duration>, fut: F) -> Result<T, SessionError>
where
    F: Future<Output = Result<T, SessionError>>,
{
    let Some(limit) = limit else {
        return fut.await;
    };
    let work = pin!(fut);
    let expiry = timer.sleep(limit);
    match select(work, expiry).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(((), _)) => Err(SessionError::Timeout(limit)),
    }
}
