//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared state from Leptos context providers. Route gates
//! wrap every page in `app`.

pub mod meeting_card;
pub mod nav_bar;
pub mod review_list;
pub mod route_guard;
