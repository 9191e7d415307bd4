//! Card for a meeting in the home page list.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::types::{Meeting, MeetingStatus};

#[component]
pub fn MeetingCard(meeting: Meeting) -> impl IntoView {
    let href = format!("/meetings/{}", meeting.id);
    let seats = format!("{}/{}", meeting.participants.len(), meeting.capacity);
    let status_class = match meeting.status {
        MeetingStatus::Open if meeting.is_full() => "meeting-card__status meeting-card__status--full",
        MeetingStatus::Open => "meeting-card__status meeting-card__status--open",
        MeetingStatus::Closed | MeetingStatus::Finished => "meeting-card__status meeting-card__status--closed",
    };
    let status_label = if meeting.status == MeetingStatus::Open && meeting.is_full() {
        "full"
    } else {
        meeting.status.as_str()
    };
    let cover = meeting.image_urls.first().cloned();

    view! {
        <A href=href attr:class="meeting-card">
            {cover.map(|src| view! { <img class="meeting-card__cover" src=src alt=""/> })}
            <div class="meeting-card__body">
                <h3 class="meeting-card__title">{meeting.title}</h3>
                <p class="meeting-card__meta">
                    <span class="meeting-card__category">{meeting.category}</span>
                    " · "
                    <span class="meeting-card__when">{meeting.starts_at}</span>
                </p>
                <p class="meeting-card__place">{meeting.place.address}</p>
                <p class="meeting-card__footer">
                    <span class=status_class>{status_label}</span>
                    <span class="meeting-card__seats">{seats}</span>
                    <span class="meeting-card__host">{meeting.host.nickname}</span>
                </p>
            </div>
        </A>
    }
}
