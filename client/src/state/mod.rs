//! Application state held in Leptos context signals.
//!
//! DESIGN
//! ======
//! `auth` is the global signed-in user store; `meetings` backs the list page.
//! Each is a plain struct so reducers and helpers stay unit-testable.

pub mod auth;
pub mod meetings;
