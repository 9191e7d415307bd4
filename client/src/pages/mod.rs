//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Pages assume their route gate already settled the
//! session.

pub mod home;
pub mod login;
pub mod meeting;
pub mod meeting_editor;
pub mod profile;
pub mod signup;
