//! Top navigation bar with the signed-in user's identity and account actions.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::net::{api, session_client};
use crate::state::auth::{AuthAction, AuthState, dispatch};
use crate::util::auth::LOGIN_PATH;

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let nickname = move || auth.with(|a| a.user.as_ref().map(|u| u.nickname.clone()).unwrap_or_default());

    let on_logout = move |_| {
        api::logout(&session_client::shared());
        dispatch(auth, AuthAction::LoggedOut);
        navigate(LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
    };

    let on_delete_account = move |_| {
        if busy.get() {
            return;
        }
        let Some(user_id) = auth.with_untracked(|a| a.user_id().map(str::to_owned)) else {
            return;
        };
        if !confirm("Delete your account? This cannot be undone.") {
            return;
        }
        busy.set(true);
        error.set(None);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match api::delete_account(&session_client::shared(), &user_id).await {
                Ok(()) => {
                    dispatch(auth, AuthAction::LoggedOut);
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(LOGIN_PATH);
                    }
                }
                Err(e) => {
                    error.try_set(Some(format!("Account deletion failed: {e}")));
                    busy.try_set(false);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = user_id;
        }
    };

    view! {
        <header class="nav-bar toolbar">
            <A href="/" attr:class="nav-bar__brand">"Meetups"</A>
            <A href="/meetings/new" attr:class="btn nav-bar__new">"+ New meeting"</A>
            <span class="toolbar__spacer"></span>
            <A href="/profile" attr:class="nav-bar__self">{nickname}</A>
            <button class="btn nav-bar__logout" on:click=on_logout title="Logout">
                "Logout"
            </button>
            <button
                class="btn btn--danger nav-bar__delete"
                on:click=on_delete_account
                disabled=move || busy.get()
            >
                "Delete account"
            </button>
            <Show when=move || error.get().is_some()>
                <p class="nav-bar__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </header>
    }
}

/// Native confirm dialog; off the browser nothing is confirmed.
pub(crate) fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window().and_then(|w| w.confirm_with_message(message).ok()).unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        false
    }
}
