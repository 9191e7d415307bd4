//! Route gates for private and public-only pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every mount of a gate runs a fresh `ensure_session` check against the
//! shared `SessionClient`. While the check is in flight the gate shows a
//! neutral loading indicator and never redirects. The resolved status is
//! also dispatched to `AuthState` so the nav bar follows along.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use session::{Gate, GateDecision, SessionStatus, gate_decision};

use crate::state::auth::AuthState;
use crate::util::auth::{HOME_PATH, LOGIN_PATH, remember_return_to};

/// Shown while a gate waits for the session check.
#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="loading" role="status" aria-live="polite">
            <span class="loading__spinner" aria-hidden="true"></span>
            <span class="loading__label">"Loading..."</span>
        </div>
    }
}

/// Renders `children` only for signed-in users; others go to `/login`.
#[component]
pub fn PrivateRoute(children: ChildrenFn) -> impl IntoView {
    route_gate(Gate::Private, children)
}

/// Renders `children` only for signed-out users; others go home.
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    route_gate(Gate::Public, children)
}

fn route_gate(gate: Gate, children: ChildrenFn) -> impl IntoView {
    let status = use_session_status();
    let decision = Memo::new(move |_| gate_decision(gate, status.get()));
    let navigate = use_navigate();
    let location = use_location();

    Effect::new(move || {
        let target = match decision.get() {
            GateDecision::RedirectToLogin => {
                let path = location.pathname.get_untracked();
                let search = location.search.get_untracked();
                if search.is_empty() {
                    remember_return_to(&path);
                } else {
                    remember_return_to(&format!("{path}?{search}"));
                }
                LOGIN_PATH
            }
            GateDecision::RedirectHome => HOME_PATH,
            GateDecision::Loading | GateDecision::Render => return,
        };
        navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
    });

    move || match decision.get() {
        GateDecision::Render => children().into_any(),
        GateDecision::Loading => view! { <LoadingIndicator/> }.into_any(),
        GateDecision::RedirectToLogin | GateDecision::RedirectHome => ().into_any(),
    }
}

/// Start a session check for the calling component and expose its status.
///
/// The returned signal starts `Pending`. A check that resolves after the
/// component unmounts is dropped.
pub fn use_session_status() -> ReadSignal<SessionStatus> {
    let (status, set_status) = signal(SessionStatus::Pending);
    let auth = use_context::<RwSignal<AuthState>>();

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let resolved = crate::net::session_client::shared().ensure_session().await;
        if set_status.try_set(resolved).is_some() {
            log::debug!("session: gate check ignored after unmount");
            return;
        }
        if let Some(auth) = auth {
            crate::state::auth::dispatch(auth, crate::state::auth::AuthAction::SessionResolved(resolved));
        }
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = (set_status, auth);
    }

    status
}
