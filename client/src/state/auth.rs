//! Signed-in user state for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as an `RwSignal<AuthState>` context. Route gates report resolved
//! session checks here; login, profile edits, and logout dispatch actions.
//! Only the profile is persisted, so a reload can show the nickname before
//! the session check finishes. The session status itself is never cached.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use session::SessionStatus;

use crate::net::types::User;
use crate::util::storage;

const PROFILE_KEY: &str = "meetups.profile";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// Outcome of the most recent gate evaluation.
    pub session: SessionStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AuthAction {
    SessionResolved(SessionStatus),
    LoggedIn(User),
    ProfileUpdated(User),
    LoggedOut,
}

impl AuthState {
    /// Initial state with the persisted profile, if any.
    pub fn restore() -> Self {
        Self { user: storage::load_json(PROFILE_KEY), session: SessionStatus::Pending }
    }

    #[must_use]
    pub fn reduce(&self, action: AuthAction) -> Self {
        match action {
            AuthAction::SessionResolved(SessionStatus::Unauthenticated) => {
                Self { user: None, session: SessionStatus::Unauthenticated }
            }
            AuthAction::SessionResolved(status) => Self { user: self.user.clone(), session: status },
            AuthAction::LoggedIn(user) => Self { user: Some(user), session: SessionStatus::Authenticated },
            AuthAction::ProfileUpdated(user) => Self { user: Some(user), session: self.session },
            AuthAction::LoggedOut => Self { user: None, session: SessionStatus::Unauthenticated },
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

/// Apply `action` to the shared state and persist the resulting profile.
pub fn dispatch(auth: RwSignal<AuthState>, action: AuthAction) {
    let Some(next) = auth.try_with_untracked(|state| state.reduce(action)) else {
        return;
    };
    persist_profile(next.user.as_ref());
    auth.try_set(next);
}

fn persist_profile(user: Option<&User>) {
    match user {
        Some(user) => storage::save_json(PROFILE_KEY, user),
        None => forget_profile(),
    }
}

/// Drop the persisted profile.
pub fn forget_profile() {
    storage::remove(PROFILE_KEY);
}
