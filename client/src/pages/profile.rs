//! Profile page for the signed-in user.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::components::nav_bar::NavBar;
use crate::net::types::{ProfileUpdate, User};
use crate::state::auth::AuthState;

const MAX_NICKNAME_LEN: usize = 20;
const MAX_BIO_LEN: usize = 200;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let nickname = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());
    let image = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let fill = move |user: &User| {
        nickname.set(user.nickname.clone());
        bio.set(user.bio.clone().unwrap_or_default());
        image.set(user.profile_image_url.clone().unwrap_or_default());
    };
    if let Some(user) = auth.get_untracked().user {
        fill(&user);
    }

    // Fresh copy from the backend; the stored profile may be stale.
    #[cfg(feature = "csr")]
    if let Some(user_id) = auth.with_untracked(|a| a.user_id().map(str::to_owned)) {
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_user(&crate::net::session_client::shared(), &user_id).await {
                Ok(user) => {
                    if nickname.try_get_untracked().is_some() {
                        fill(&user);
                    }
                    crate::state::auth::dispatch(auth, crate::state::auth::AuthAction::ProfileUpdated(user));
                }
                Err(e) => log::warn!("profile: refresh failed: {e}"),
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(current) = auth.get_untracked().user else {
            return;
        };
        let update = match validate_profile_input(&current, &nickname.get(), &bio.get(), &image.get()) {
            Ok(Some(update)) => update,
            Ok(None) => {
                info.set("Nothing to save.".to_owned());
                return;
            }
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Saving...".to_owned());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let session = crate::net::session_client::shared();
            match crate::net::api::update_profile(&session, &current.id, &update).await {
                Ok(user) => {
                    crate::state::auth::dispatch(auth, crate::state::auth::AuthAction::ProfileUpdated(user));
                    info.try_set("Saved.".to_owned());
                }
                Err(e) => {
                    info.try_set(format!("Save failed: {e}"));
                }
            }
            busy.try_set(false);
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = update;
        }
    };

    view! {
        <div class="profile-page">
            <NavBar/>
            <h1>"Profile"</h1>
            <p class="profile-page__email">{move || auth.with(|a| a.user.as_ref().map(|u| u.email.clone()))}</p>
            <form class="editor" on:submit=on_submit>
                <label class="editor__field">
                    <span>"Nickname"</span>
                    <input
                        type="text"
                        prop:value=move || nickname.get()
                        on:input=move |ev| nickname.set(event_target_value(&ev))
                    />
                </label>
                <label class="editor__field">
                    <span>"Bio"</span>
                    <textarea
                        prop:value=move || bio.get()
                        on:input=move |ev| bio.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <label class="editor__field">
                    <span>"Profile image URL"</span>
                    <input
                        type="url"
                        prop:value=move || image.get()
                        on:input=move |ev| image.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Save"
                </button>
                <Show when=move || !info.get().is_empty()>
                    <p class="editor__info">{move || info.get()}</p>
                </Show>
            </form>
        </div>
    }
}

/// Changed fields only; `Ok(None)` when nothing differs from `current`.
fn validate_profile_input(
    current: &User,
    nickname: &str,
    bio: &str,
    image: &str,
) -> Result<Option<ProfileUpdate>, &'static str> {
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err("Nickname cannot be empty.");
    }
    if nickname.chars().count() > MAX_NICKNAME_LEN {
        return Err("Nickname must be 20 characters or fewer.");
    }
    let bio = bio.trim();
    if bio.chars().count() > MAX_BIO_LEN {
        return Err("Bio is limited to 200 characters.");
    }
    let image = image.trim();
    if !image.is_empty() && !(image.starts_with("https://") || image.starts_with("http://")) {
        return Err("Image link must start with http:// or https://.");
    }

    let update = ProfileUpdate {
        nickname: (nickname != current.nickname).then(|| nickname.to_owned()),
        bio: (bio != current.bio.as_deref().unwrap_or_default()).then(|| bio.to_owned()),
        profile_image_url: (image != current.profile_image_url.as_deref().unwrap_or_default())
            .then(|| image.to_owned()),
    };
    Ok((update != ProfileUpdate::default()).then_some(update))
}
