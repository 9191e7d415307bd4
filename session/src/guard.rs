//! Tri-state session status and the routing decision derived from it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route gates render whatever `gate_decision` says. Keeping the mapping
//! pure means "never redirect while pending" is checked here once instead of
//! in every page.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

/// Result of a session check. Every evaluation starts `Pending`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Pending,
    Authenticated,
    Unauthenticated,
}

impl SessionStatus {
    #[must_use]
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Which side of the login wall a route lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Only for signed-in users; others go to login.
    Private,
    /// Only for signed-out users (login, signup); others go home.
    Public,
}

/// What a gate should show for the current status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Neutral loading indicator; no content, no redirect.
    Loading,
    Render,
    RedirectToLogin,
    RedirectHome,
}

#[must_use]
pub fn gate_decision(gate: Gate, status: SessionStatus) -> GateDecision {
    match (gate, status) {
        (_, SessionStatus::Pending) => GateDecision::Loading,
        (Gate::Private, SessionStatus::Authenticated) | (Gate::Public, SessionStatus::Unauthenticated) => {
            GateDecision::Render
        }
        (Gate::Private, SessionStatus::Unauthenticated) => GateDecision::RedirectToLogin,
        (Gate::Public, SessionStatus::Authenticated) => GateDecision::RedirectHome,
    }
}
