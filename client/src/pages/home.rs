//! Home page: meeting list with search filters.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered behind the private gate. The filter lives in the shared
//! `MeetingsState` so returning from a detail page keeps the last search.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::meeting_card::MeetingCard;
use crate::components::nav_bar::NavBar;
use crate::net::types::MeetingStatus;
use crate::state::meetings::{MeetingFilter, MeetingsState, SortOrder};

pub(crate) const CATEGORIES: [&str; 6] = ["study", "sports", "culture", "food", "travel", "other"];

#[component]
pub fn HomePage() -> impl IntoView {
    let meetings = expect_context::<RwSignal<MeetingsState>>();

    let keyword = RwSignal::new(meetings.with_untracked(|m| m.filter.keyword.clone()));
    let region = RwSignal::new(meetings.with_untracked(|m| m.filter.region.clone().unwrap_or_default()));
    let category = RwSignal::new(meetings.with_untracked(|m| m.filter.category.clone().unwrap_or_default()));
    let status = RwSignal::new(meetings.with_untracked(|m| {
        m.filter.status.map(MeetingStatus::as_str).unwrap_or_default().to_owned()
    }));
    let sort = RwSignal::new(meetings.with_untracked(|m| m.filter.sort));

    load_meetings(meetings);

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let filter = build_filter(&keyword.get(), &category.get(), &region.get(), &status.get(), sort.get());
        meetings.update(|m| m.filter = filter);
        load_meetings(meetings);
    };

    view! {
        <div class="home-page">
            <NavBar/>
            <form class="filter-bar" on:submit=on_search>
                <input
                    class="filter-bar__keyword"
                    type="search"
                    placeholder="Search meetings"
                    prop:value=move || keyword.get()
                    on:input=move |ev| keyword.set(event_target_value(&ev))
                />
                <select
                    class="filter-bar__category"
                    prop:value=move || category.get()
                    on:change=move |ev| category.set(event_target_value(&ev))
                >
                    <option value="">"All categories"</option>
                    {CATEGORIES.into_iter().map(|c| view! { <option value=c>{c}</option> }).collect_view()}
                </select>
                <input
                    class="filter-bar__region"
                    type="text"
                    placeholder="Region"
                    prop:value=move || region.get()
                    on:input=move |ev| region.set(event_target_value(&ev))
                />
                <select
                    class="filter-bar__status"
                    prop:value=move || status.get()
                    on:change=move |ev| status.set(event_target_value(&ev))
                >
                    <option value="">"Any status"</option>
                    <option value="open">"Open"</option>
                    <option value="closed">"Closed"</option>
                    <option value="finished">"Finished"</option>
                </select>
                <select
                    class="filter-bar__sort"
                    prop:value=move || sort.get().as_param()
                    on:change=move |ev| sort.set(SortOrder::from_param(&event_target_value(&ev)))
                >
                    {SortOrder::ALL
                        .into_iter()
                        .map(|o| view! { <option value=o.as_param()>{o.label()}</option> })
                        .collect_view()}
                </select>
                <button class="btn" type="submit">"Search"</button>
            </form>

            <Show when=move || meetings.with(|m| m.error.is_some())>
                <p class="home-page__error">{move || meetings.with(|m| m.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show
                when=move || !meetings.with(|m| m.loading)
                fallback=|| view! { <p>"Loading meetings..."</p> }
            >
                <Show
                    when=move || meetings.with(|m| !m.items.is_empty())
                    fallback=|| view! { <p class="home-page__empty">"No meetings match."</p> }
                >
                    <div class="home-page__cards">
                        <For
                            each=move || meetings.get().items
                            key=|m| m.id.clone()
                            children=|meeting| view! { <MeetingCard meeting=meeting/> }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

fn build_filter(keyword: &str, category: &str, region: &str, status: &str, sort: SortOrder) -> MeetingFilter {
    let status = match status {
        "open" => Some(MeetingStatus::Open),
        "closed" => Some(MeetingStatus::Closed),
        "finished" => Some(MeetingStatus::Finished),
        _ => None,
    };
    MeetingFilter {
        keyword: keyword.trim().to_owned(),
        category: Some(category.trim().to_owned()).filter(|c| !c.is_empty()),
        region: Some(region.trim().to_owned()).filter(|r| !r.is_empty()),
        status,
        sort,
    }
}

/// Fetch the list for the current filter into `meetings`.
fn load_meetings(meetings: RwSignal<MeetingsState>) {
    meetings.update(|m| {
        m.loading = true;
        m.error = None;
    });

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let filter = meetings.with_untracked(|m| m.filter.clone());
        let result = crate::net::api::list_meetings(&crate::net::session_client::shared(), &filter).await;
        meetings.try_update(|m| {
            m.loading = false;
            match result {
                Ok(items) => m.items = items,
                Err(e) => {
                    log::warn!("home: meeting list failed: {e}");
                    m.error = Some(format!("Could not load meetings: {e}"));
                }
            }
        });
    });
}
