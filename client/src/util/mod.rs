//! Browser-facing helpers shared by pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` wraps `localStorage`; `token_store` and `auth` build the
//! credential slot and the post-login return location on top of it.

pub mod auth;
pub mod storage;
pub mod token_store;
