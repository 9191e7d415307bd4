//! Create and edit form for meetings.
//!
//! `/meetings/new` starts blank; `/meetings/:id/edit` loads the meeting and
//! prefills the form. Only the host reaches the edit route from the UI; the
//! backend enforces it.

#[cfg(test)]
#[path = "meeting_editor_test.rs"]
mod meeting_editor_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use super::home::CATEGORIES;
use crate::components::nav_bar::NavBar;
use crate::net::types::{MeetingDraft, Place};

const MAX_TITLE_LEN: usize = 50;
const MAX_CAPACITY: u32 = 100;

/// Raw form fields as typed.
#[derive(Clone, Debug, Default, PartialEq)]
struct MeetingForm {
    title: String,
    description: String,
    category: String,
    address: String,
    region: String,
    latitude: String,
    longitude: String,
    starts_at: String,
    capacity: String,
    image_urls: String,
}

impl From<&MeetingDraft> for MeetingForm {
    fn from(draft: &MeetingDraft) -> Self {
        let place = draft.place.clone();
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            address: place.as_ref().map(|p| p.address.clone()).unwrap_or_default(),
            region: place.as_ref().and_then(|p| p.region.clone()).unwrap_or_default(),
            latitude: place.as_ref().map(|p| p.latitude.to_string()).unwrap_or_default(),
            longitude: place.as_ref().map(|p| p.longitude.to_string()).unwrap_or_default(),
            starts_at: draft.starts_at.clone(),
            capacity: draft.capacity.to_string(),
            image_urls: draft.image_urls.join("\n"),
        }
    }
}

#[component]
pub fn MeetingEditorPage() -> impl IntoView {
    let params = use_params_map();
    let editing_id = Memo::new(move |_| params.with(|p| p.get("id")));
    let form = RwSignal::new(MeetingForm { capacity: "4".to_owned(), ..MeetingForm::default() });
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();

    Effect::new(move || {
        let Some(id) = editing_id.get() else {
            return;
        };
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_meeting(&crate::net::session_client::shared(), &id).await {
                Ok(meeting) => {
                    form.try_set(MeetingForm::from(&MeetingDraft::from(&meeting)));
                }
                Err(e) => {
                    info.try_set(format!("Could not load meeting: {e}"));
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let draft = match validate_meeting_form(&form.get()) {
            Ok(draft) => draft,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Saving...".to_owned());

        #[cfg(feature = "csr")]
        {
            let navigate = navigate.clone();
            let id = editing_id.get_untracked();
            leptos::task::spawn_local(async move {
                use crate::net::{api, session_client};

                let session = session_client::shared();
                let saved = match id {
                    Some(id) => api::update_meeting(&session, &id, &draft).await,
                    None => api::create_meeting(&session, &draft).await,
                };
                match saved {
                    Ok(meeting) => {
                        navigate(&format!("/meetings/{}", meeting.id), leptos_router::NavigateOptions::default());
                    }
                    Err(e) => {
                        info.try_set(format!("Save failed: {e}"));
                        busy.try_set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = draft;
        }
    };

    view! {
        <div class="editor-page">
            <NavBar/>
            <h1>{move || if editing_id.get().is_some() { "Edit meeting" } else { "New meeting" }}</h1>
            <form class="editor" on:submit=on_submit>
                {text_field(form, "Title", "text", |f| &f.title, |f, v| f.title = v)}
                <label class="editor__field">
                    <span>"Category"</span>
                    <select
                        prop:value=move || form.with(|f| f.category.clone())
                        on:change=move |ev| form.update(|f| f.category = event_target_value(&ev))
                    >
                        <option value="">"Choose..."</option>
                        {CATEGORIES.into_iter().map(|c| view! { <option value=c>{c}</option> }).collect_view()}
                    </select>
                </label>
                <label class="editor__field">
                    <span>"Description"</span>
                    <textarea
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                </label>
                {text_field(form, "Address", "text", |f| &f.address, |f, v| f.address = v)}
                {text_field(form, "Region", "text", |f| &f.region, |f, v| f.region = v)}
                {text_field(form, "Latitude", "text", |f| &f.latitude, |f, v| f.latitude = v)}
                {text_field(form, "Longitude", "text", |f| &f.longitude, |f, v| f.longitude = v)}
                {text_field(form, "Starts at", "datetime-local", |f| &f.starts_at, |f, v| f.starts_at = v)}
                {text_field(form, "Capacity", "number", |f| &f.capacity, |f, v| f.capacity = v)}
                <label class="editor__field">
                    <span>"Image URLs (one per line)"</span>
                    <textarea
                        prop:value=move || form.with(|f| f.image_urls.clone())
                        on:input=move |ev| form.update(|f| f.image_urls = event_target_value(&ev))
                    ></textarea>
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

fn text_field(
    form: RwSignal<MeetingForm>,
    label: &'static str,
    kind: &'static str,
    get: fn(&MeetingForm) -> &String,
    set: fn(&mut MeetingForm, String),
) -> impl IntoView {
    view! {
        <label class="editor__field">
            <span>{label}</span>
            <input
                type=kind
                prop:value=move || form.with(|f| get(f).clone())
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        </label>
    }
}

fn validate_meeting_form(form: &MeetingForm) -> Result<MeetingDraft, &'static str> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err("Give the meeting a title.");
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err("Titles are limited to 50 characters.");
    }
    let category = form.category.trim();
    if category.is_empty() {
        return Err("Choose a category.");
    }
    if form.starts_at.trim().is_empty() {
        return Err("Pick a start time.");
    }
    let capacity = match form.capacity.trim().parse::<u32>() {
        Ok(n) if (2..=MAX_CAPACITY).contains(&n) => n,
        _ => return Err("Capacity must be between 2 and 100."),
    };
    let place = parse_place(form)?;
    let image_urls = form
        .image_urls
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect();
    Ok(MeetingDraft {
        title: title.to_owned(),
        description: form.description.trim().to_owned(),
        category: category.to_owned(),
        place,
        starts_at: form.starts_at.trim().to_owned(),
        capacity,
        image_urls,
    })
}

/// A place needs an address; coordinates are optional but must come in pairs.
fn parse_place(form: &MeetingForm) -> Result<Option<Place>, &'static str> {
    let address = form.address.trim();
    if address.is_empty() {
        return Err("Enter where the meeting happens.");
    }
    let coordinates = match (form.latitude.trim(), form.longitude.trim()) {
        ("", "") => (0.0, 0.0),
        (lat, lng) => match (lat.parse::<f64>(), lng.parse::<f64>()) {
            (Ok(lat), Ok(lng)) if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) => (lat, lng),
            _ => return Err("Coordinates must be valid latitude and longitude."),
        },
    };
    let region = Some(form.region.trim().to_owned()).filter(|r| !r.is_empty());
    Ok(Some(Place { address: address.to_owned(), region, latitude: coordinates.0, longitude: coordinates.1 }))
}
