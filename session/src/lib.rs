//! Session guard and auto-refresh protocol for the Meetups web client.
//!
//! This crate is UI-framework agnostic so the Leptos client can drive it from
//! route gates and API helpers, and tests can drive it natively against a
//! scripted transport.
//!
//! ARCHITECTURE
//! ============
//! `SessionClient` owns the whole protocol: `ensure_session` resolves a route
//! guard to a terminal `SessionStatus`, `send` wraps every API call with a
//! single refresh-and-replay, and both share one single-flight refresh.
//! Browser glue plugs in through the `Transport`, `TokenStore` and `Timer`
//! seams.

pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod store;
pub mod timer;

pub use client::SessionClient;
pub use config::SessionConfig;
pub use error::SessionError;
pub use guard::{Gate, GateDecision, SessionStatus, gate_decision};
pub use http::{ApiRequest, ApiResponse, ErrorBody, Method, Transport};
pub use store::{MemoryTokenStore, TokenStore};
pub use timer::{NoDeadline, Timer};
