//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps each endpoint, `session_client` holds the shared `SessionClient`,
//! `transport` adapts browser fetch to the session protocol, and `types`
//! defines the wire schema.

pub mod api;
pub mod session_client;
pub mod transport;
pub mod types;
