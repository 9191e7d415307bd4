//! Sign-up page. A successful registration signs the new user straight in.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::components::A;

use super::login::looks_like_email;
use crate::net::types::SignupRequest;
use crate::util::auth::LOGIN_PATH;

const MIN_PASSWORD_LEN: usize = 8;
const MAX_NICKNAME_LEN: usize = 20;

#[component]
pub fn SignupPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let nickname = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    let auth = expect_context::<RwSignal<crate::state::auth::AuthState>>();
    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_signup_input(&email.get(), &password.get(), &confirm.get(), &nickname.get()) {
            Ok(request) => request,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        #[cfg(feature = "csr")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                use crate::net::{api, session_client, types::Credentials};

                let session = session_client::shared();
                if let Err(e) = api::signup(&session, &request).await {
                    info.try_set(format!("Sign-up failed: {e}"));
                    busy.try_set(false);
                    return;
                }
                let credentials = Credentials { email: request.email, password: request.password };
                match api::login(&session, &credentials).await {
                    Ok(user) => {
                        crate::state::auth::dispatch(auth, crate::state::auth::AuthAction::LoggedIn(user));
                        navigate(
                            crate::util::auth::HOME_PATH,
                            leptos_router::NavigateOptions { replace: true, ..Default::default() },
                        );
                    }
                    Err(e) => {
                        log::warn!("signup: account created but sign-in failed: {e}");
                        navigate(LOGIN_PATH, leptos_router::NavigateOptions::default());
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
        }
    };

    let field = move |signal: RwSignal<String>, kind: &'static str, placeholder: &'static str| {
        view! {
            <input
                class="login-input"
                type=kind
                placeholder=placeholder
                prop:value=move || signal.get()
                on:input=move |ev| signal.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Meetups"</h1>
                <p class="login-card__subtitle">"Create an account"</p>
                <form class="login-form" on:submit=on_submit>
                    {field(email, "email", "you@example.com")}
                    {field(nickname, "text", "Nickname")}
                    {field(password, "password", "Password (8+ characters)")}
                    {field(confirm, "password", "Confirm password")}
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign up"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">
                    "Already registered? "
                    <A href=LOGIN_PATH>"Sign in"</A>
                </p>
            </div>
        </div>
    }
}

fn validate_signup_input(
    email: &str,
    password: &str,
    confirm: &str,
    nickname: &str,
) -> Result<SignupRequest, &'static str> {
    let email = email.trim();
    let nickname = nickname.trim();
    if email.is_empty() || password.is_empty() || nickname.is_empty() {
        return Err("Fill in every field.");
    }
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    if nickname.chars().count() > MAX_NICKNAME_LEN {
        return Err("Nickname must be 20 characters or fewer.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(SignupRequest { email: email.to_owned(), password: password.to_owned(), nickname: nickname.to_owned() })
}
