//! # client
//!
//! Leptos + WASM frontend for the Meetups application: sign-up and login,
//! meeting listings with filters, meeting create/edit, join/leave, and
//! reviews.
//!
//! Session handling (route guards, token refresh, request replay) lives in
//! the framework-agnostic `session` crate; this crate supplies the browser
//! adapters, pages, components, and application state around it.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: logging, panic hook, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
