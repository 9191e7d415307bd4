//! Reviews under a meeting, with delete for the author's own entries.

use leptos::prelude::*;

use crate::net::types::{MediaKind, Review};

#[component]
pub fn ReviewList(
    reviews: Signal<Vec<Review>>,
    #[prop(into)] viewer_id: Signal<Option<String>>,
    on_delete: Callback<String>,
) -> impl IntoView {
    view! {
        <Show
            when=move || reviews.with(|r| !r.is_empty())
            fallback=|| view! { <p class="review-list__empty">"No reviews yet."</p> }
        >
            <ul class="review-list">
                <For
                    each=move || reviews.get()
                    key=|review| review.id.clone()
                    children=move |review| {
                        let own = viewer_id.get_untracked().as_deref() == Some(review.author.id.as_str());
                        let id = review.id.clone();
                        view! {
                            <li class="review-list__item">
                                <p class="review-list__head">
                                    <span class="review-list__author">{review.author.nickname}</span>
                                    <span class="review-list__rating">{stars(review.rating)}</span>
                                    <span class="review-list__date">{review.created_at}</span>
                                </p>
                                <p class="review-list__content">{review.content}</p>
                                <div class="review-list__media">
                                    {review
                                        .media
                                        .into_iter()
                                        .map(|m| match m.kind {
                                            MediaKind::Image => view! { <img src=m.url alt=""/> }.into_any(),
                                            MediaKind::Video => view! { <video src=m.url controls=true></video> }.into_any(),
                                        })
                                        .collect_view()}
                                </div>
                                {own
                                    .then(|| {
                                        view! {
                                            <button
                                                class="btn btn--small review-list__delete"
                                                on:click=move |_| on_delete.run(id.clone())
                                            >
                                                "Delete"
                                            </button>
                                        }
                                    })}
                            </li>
                        }
                    }
                />
            </ul>
        </Show>
    }
}

/// `rating` filled stars out of five.
pub(crate) fn stars(rating: u32) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
