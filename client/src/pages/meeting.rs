//! Meeting detail page: join/leave, host actions, and reviews.

#[cfg(test)]
#[path = "meeting_test.rs"]
mod meeting_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::components::nav_bar::NavBar;
use crate::components::review_list::ReviewList;
use crate::net::types::{Media, MediaKind, Meeting, Review, ReviewDraft};
use crate::state::auth::AuthState;

const MAX_REVIEW_LEN: usize = 500;
const VIDEO_EXTENSIONS: [&str; 3] = [".mp4", ".webm", ".mov"];

#[component]
pub fn MeetingPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();
    let meeting_id = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));

    let meeting = RwSignal::new(None::<Meeting>);
    let reviews = RwSignal::new(Vec::<Review>::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let version = RwSignal::new(0_u32);

    let rating = RwSignal::new(5_u32);
    let content = RwSignal::new(String::new());
    let media_text = RwSignal::new(String::new());
    let review_info = RwSignal::new(String::new());

    let viewer_id = Signal::derive(move || auth.with(|a| a.user_id().map(str::to_owned)));

    Effect::new(move || {
        let id = meeting_id.get();
        version.track();
        if id.is_empty() {
            return;
        }
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            use crate::net::{api, session_client};

            let session = session_client::shared();
            match api::fetch_meeting(&session, &id).await {
                Ok(m) => {
                    meeting.try_set(Some(m));
                }
                Err(e) => {
                    error.try_set(Some(format!("Could not load meeting: {e}")));
                    return;
                }
            }
            match api::list_reviews(&session, &id).await {
                Ok(list) => {
                    reviews.try_set(list);
                }
                Err(e) => log::warn!("meeting: reviews failed for {id}: {e}"),
            }
        });
    });

    let relation = move || {
        let viewer = viewer_id.get().unwrap_or_default();
        meeting.with(|m| m.as_ref().map(|m| Relation::of(m, &viewer))).unwrap_or(Relation::Outsider { can_join: false })
    };

    let run_action = move |action: Action| {
        if busy.get() {
            return;
        }
        if action == Action::Delete && !crate::components::nav_bar::confirm("Delete this meeting?") {
            return;
        }
        busy.set(true);
        error.set(None);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            use crate::net::{api, session_client};

            let session = session_client::shared();
            let id = meeting_id.get_untracked();
            let result = match action {
                Action::Join => api::join_meeting(&session, &id).await,
                Action::Leave => api::leave_meeting(&session, &id).await,
                Action::Delete => api::delete_meeting(&session, &id).await,
            };
            busy.try_set(false);
            match (result, action) {
                (Ok(()), Action::Delete) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(crate::util::auth::HOME_PATH);
                    }
                }
                (Ok(()), _) => {
                    version.try_update(|v| *v += 1);
                }
                (Err(e), _) => {
                    error.try_set(Some(format!("Action failed: {e}")));
                }
            }
        });
    };

    let on_review_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = match validate_review_input(&meeting_id.get(), rating.get(), &content.get(), &media_text.get()) {
            Ok(draft) => draft,
            Err(msg) => {
                review_info.set(msg.to_owned());
                return;
            }
        };
        review_info.set("Posting review...".to_owned());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_review(&crate::net::session_client::shared(), &draft).await {
                Ok(review) => {
                    reviews.try_update(|list| list.insert(0, review));
                    content.try_set(String::new());
                    media_text.try_set(String::new());
                    review_info.try_set(String::new());
                }
                Err(e) => {
                    review_info.try_set(format!("Could not post review: {e}"));
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = draft;
        }
    };

    let on_review_delete = Callback::new(move |review_id: String| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_review(&crate::net::session_client::shared(), &review_id).await {
                Ok(()) => {
                    reviews.try_update(|list| list.retain(|r| r.id != review_id));
                }
                Err(e) => {
                    error.try_set(Some(format!("Could not delete review: {e}")));
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = review_id;
        }
    });

    view! {
        <div class="meeting-page">
            <NavBar/>
            <Show when=move || error.get().is_some()>
                <p class="meeting-page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || meeting.with(Option::is_some)
                fallback=|| view! { <p>"Loading meeting..."</p> }
            >
                {move || {
                    meeting
                        .get()
                        .map(|m| {
                            view! {
                                <article class="meeting-page__detail">
                                    <h1>{m.title.clone()}</h1>
                                    <p class="meeting-page__meta">
                                        {m.category.clone()}
                                        " · "
                                        {m.starts_at.clone()}
                                        " · "
                                        {m.place.address.clone()}
                                    </p>
                                    <p class="meeting-page__seats">
                                        {format!("{}/{} joined", m.participants.len(), m.capacity)}
                                        " · hosted by "
                                        {m.host.nickname.clone()}
                                    </p>
                                    <div class="meeting-page__images">
                                        {m
                                            .image_urls
                                            .iter()
                                            .map(|src| view! { <img src=src.clone() alt=""/> })
                                            .collect_view()}
                                    </div>
                                    <p class="meeting-page__description">{m.description.clone()}</p>
                                    <ul class="meeting-page__participants">
                                        {m
                                            .participants
                                            .iter()
                                            .map(|p| view! { <li>{p.nickname.clone()}</li> })
                                            .collect_view()}
                                    </ul>
                                </article>
                            }
                        })
                }}
                <div class="meeting-page__actions">
                    {move || match relation() {
                        Relation::Host => {
                            view! {
                                <A
                                    href=format!("/meetings/{}/edit", meeting_id.get())
                                    attr:class="btn"
                                >
                                    "Edit"
                                </A>
                                <button
                                    class="btn btn--danger"
                                    disabled=move || busy.get()
                                    on:click=move |_| run_action(Action::Delete)
                                >
                                    "Delete"
                                </button>
                            }
                                .into_any()
                        }
                        Relation::Participant => {
                            view! {
                                <button
                                    class="btn"
                                    disabled=move || busy.get()
                                    on:click=move |_| run_action(Action::Leave)
                                >
                                    "Leave"
                                </button>
                            }
                                .into_any()
                        }
                        Relation::Outsider { can_join } => {
                            view! {
                                <button
                                    class="btn btn--primary"
                                    disabled=move || busy.get() || !can_join
                                    on:click=move |_| run_action(Action::Join)
                                >
                                    "Join"
                                </button>
                            }
                                .into_any()
                        }
                    }}
                </div>
            </Show>

            <section class="meeting-page__reviews">
                <h2>"Reviews"</h2>
                <Show when=move || matches!(relation(), Relation::Participant | Relation::Host)>
                    <form class="review-form" on:submit=on_review_submit>
                        <select
                            class="review-form__rating"
                            prop:value=move || rating.get().to_string()
                            on:change=move |ev| rating.set(event_target_value(&ev).parse().unwrap_or(5))
                        >
                            {(1..=5_u32)
                                .rev()
                                .map(|n| view! { <option value=n.to_string()>{crate::components::review_list::stars(n)}</option> })
                                .collect_view()}
                        </select>
                        <textarea
                            class="review-form__content"
                            placeholder="How was it?"
                            prop:value=move || content.get()
                            on:input=move |ev| content.set(event_target_value(&ev))
                        ></textarea>
                        <textarea
                            class="review-form__media"
                            placeholder="Photo or video URLs, one per line"
                            prop:value=move || media_text.get()
                            on:input=move |ev| media_text.set(event_target_value(&ev))
                        ></textarea>
                        <button class="btn" type="submit">"Post review"</button>
                        <Show when=move || !review_info.get().is_empty()>
                            <p class="review-form__info">{move || review_info.get()}</p>
                        </Show>
                    </form>
                </Show>
                <ReviewList reviews=reviews.into() viewer_id=viewer_id on_delete=on_review_delete/>
            </section>
        </div>
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Join,
    Leave,
    Delete,
}

/// How the viewer relates to the meeting; drives which actions show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Relation {
    Host,
    Participant,
    Outsider { can_join: bool },
}

impl Relation {
    fn of(meeting: &Meeting, viewer_id: &str) -> Self {
        if meeting.is_host(viewer_id) {
            Self::Host
        } else if meeting.is_participant(viewer_id) {
            Self::Participant
        } else {
            Self::Outsider { can_join: meeting.can_join(viewer_id) }
        }
    }
}

fn validate_review_input(
    meeting_id: &str,
    rating: u32,
    content: &str,
    media_text: &str,
) -> Result<ReviewDraft, &'static str> {
    let content = content.trim();
    if content.is_empty() {
        return Err("Write a few words about the meeting.");
    }
    if content.chars().count() > MAX_REVIEW_LEN {
        return Err("Reviews are limited to 500 characters.");
    }
    if !(1..=5).contains(&rating) {
        return Err("Pick a rating from 1 to 5.");
    }
    let mut media = Vec::new();
    for line in media_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !(line.starts_with("https://") || line.starts_with("http://")) {
            return Err("Media links must start with http:// or https://.");
        }
        media.push(Media { kind: media_kind(line), url: line.to_owned() });
    }
    Ok(ReviewDraft { meeting_id: meeting_id.to_owned(), rating, content: content.to_owned(), media })
}

fn media_kind(url: &str) -> MediaKind {
    let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();
    if VIDEO_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}
