use super::*;

#[test]
fn default_status_is_pending() {
    assert_eq!(SessionStatus::default(), SessionStatus::Pending);
    assert!(!SessionStatus::Pending.is_resolved());
    assert!(SessionStatus::Authenticated.is_resolved());
    assert!(SessionStatus::Unauthenticated.is_resolved());
}

#[test]
fn pending_never_renders_or_redirects() {
    assert_eq!(gate_decision(Gate::Private, SessionStatus::Pending), GateDecision::Loading);
    assert_eq!(gate_decision(Gate::Public, SessionStatus::Pending), GateDecision::Loading);
}

#[test]
fn private_gate_renders_only_when_authenticated() {
    assert_eq!(gate_decision(Gate::Private, SessionStatus::Authenticated), GateDecision::Render);
    assert_eq!(
        gate_decision(Gate::Private, SessionStatus::Unauthenticated),
        GateDecision::RedirectToLogin
    );
}

#[test]
fn public_gate_renders_for_signed_out_visitor() {
    assert_eq!(gate_decision(Gate::Public, SessionStatus::Unauthenticated), GateDecision::Render);
}

#[test]
fn public_gate_sends_signed_in_user_home() {
    assert_eq!(gate_decision(Gate::Public, SessionStatus::Authenticated), GateDecision::RedirectHome);
}
