//! REST API helpers for communicating with the backend.
//!
//! Every call except login and registration goes through
//! `SessionClient::send`, so an expired token is refreshed and the request
//! replayed once without the page noticing.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `SessionError` values instead of panics; pages render them
//! with `Display` and keep the form state so the user can retry.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use session::{ApiRequest, SessionClient, SessionError};

use super::types::{
    Credentials, Meeting, MeetingDraft, ProfileUpdate, Review, ReviewDraft, SignupRequest, User,
};
use crate::state::meetings::MeetingFilter;

const USERS_ENDPOINT: &str = "/users";
const MEETINGS_ENDPOINT: &str = "/meetings";
const REVIEWS_ENDPOINT: &str = "/reviews";

fn user_endpoint(user_id: &str) -> String {
    format!("{USERS_ENDPOINT}/{user_id}")
}

fn meeting_endpoint(meeting_id: &str) -> String {
    format!("{MEETINGS_ENDPOINT}/{meeting_id}")
}

fn participants_endpoint(meeting_id: &str) -> String {
    format!("{MEETINGS_ENDPOINT}/{meeting_id}/participants")
}

fn review_endpoint(review_id: &str) -> String {
    format!("{REVIEWS_ENDPOINT}/{review_id}")
}

// =============================================================================
// Auth and users
// =============================================================================

/// Sign in; the access token is stored by the session client.
///
/// # Errors
///
/// Returns the backend rejection (wrong credentials) or transport failure.
pub async fn login(session: &SessionClient, credentials: &Credentials) -> Result<User, SessionError> {
    session.login(credentials).await?.json()
}

/// Drop the local credential.
pub fn logout(session: &SessionClient) {
    session.logout();
}

/// Register a new account via `POST /users`.
///
/// # Errors
///
/// Returns validation errors (e.g. email taken) from the backend.
pub async fn signup(session: &SessionClient, request: &SignupRequest) -> Result<User, SessionError> {
    let req = ApiRequest::post(USERS_ENDPOINT).with_json(request)?;
    session.send_anonymous(req).await?.json()
}

/// Fetch a user profile from `/users/{user_id}`.
///
/// # Errors
///
/// Returns an error if the request fails or the user does not exist.
pub async fn fetch_user(session: &SessionClient, user_id: &str) -> Result<User, SessionError> {
    session.send_json(ApiRequest::get(user_endpoint(user_id))).await
}

/// Update profile fields via `PATCH /users/{user_id}`.
///
/// # Errors
///
/// Returns an error if the request fails or the backend rejects the update.
pub async fn update_profile(
    session: &SessionClient,
    user_id: &str,
    update: &ProfileUpdate,
) -> Result<User, SessionError> {
    let req = ApiRequest::patch(user_endpoint(user_id)).with_json(update)?;
    session.send_json(req).await
}

/// Delete the account, then drop the local credential.
///
/// # Errors
///
/// Returns an error if the deletion fails; the session is kept in that case.
pub async fn delete_account(session: &SessionClient, user_id: &str) -> Result<(), SessionError> {
    session.send(ApiRequest::delete(user_endpoint(user_id))).await?;
    session.logout();
    Ok(())
}

// =============================================================================
// Meetings
// =============================================================================

/// List meetings matching `filter`.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not a meeting list.
pub async fn list_meetings(session: &SessionClient, filter: &MeetingFilter) -> Result<Vec<Meeting>, SessionError> {
    let mut req = ApiRequest::get(MEETINGS_ENDPOINT);
    req.query = filter.query_pairs();
    session.send_json(req).await
}

/// # Errors
///
/// Returns an error if the request fails or the meeting does not exist.
pub async fn fetch_meeting(session: &SessionClient, meeting_id: &str) -> Result<Meeting, SessionError> {
    session.send_json(ApiRequest::get(meeting_endpoint(meeting_id))).await
}

/// # Errors
///
/// Returns an error if the backend rejects the draft.
pub async fn create_meeting(session: &SessionClient, draft: &MeetingDraft) -> Result<Meeting, SessionError> {
    let req = ApiRequest::post(MEETINGS_ENDPOINT).with_json(draft)?;
    session.send_json(req).await
}

/// # Errors
///
/// Returns an error if the backend rejects the draft or the caller is not the host.
pub async fn update_meeting(
    session: &SessionClient,
    meeting_id: &str,
    draft: &MeetingDraft,
) -> Result<Meeting, SessionError> {
    let req = ApiRequest::patch(meeting_endpoint(meeting_id)).with_json(draft)?;
    session.send_json(req).await
}

/// # Errors
///
/// Returns an error if the request fails or the caller is not the host.
pub async fn delete_meeting(session: &SessionClient, meeting_id: &str) -> Result<(), SessionError> {
    session.send(ApiRequest::delete(meeting_endpoint(meeting_id))).await?;
    Ok(())
}

/// Join via `POST /meetings/{id}/participants`.
///
/// # Errors
///
/// Returns an error if the meeting is full, closed, or the request fails.
pub async fn join_meeting(session: &SessionClient, meeting_id: &str) -> Result<(), SessionError> {
    session.send(ApiRequest::post(participants_endpoint(meeting_id))).await?;
    Ok(())
}

/// Leave via `DELETE /meetings/{id}/participants`.
///
/// # Errors
///
/// Returns an error if the caller is not a participant or the request fails.
pub async fn leave_meeting(session: &SessionClient, meeting_id: &str) -> Result<(), SessionError> {
    session.send(ApiRequest::delete(participants_endpoint(meeting_id))).await?;
    Ok(())
}

// =============================================================================
// Reviews
// =============================================================================

/// # Errors
///
/// Returns an error if the request fails.
pub async fn list_reviews(session: &SessionClient, meeting_id: &str) -> Result<Vec<Review>, SessionError> {
    let req = ApiRequest::get(REVIEWS_ENDPOINT).with_query("meetingId", meeting_id);
    session.send_json(req).await
}

/// # Errors
///
/// Returns an error if the backend rejects the review.
pub async fn create_review(session: &SessionClient, draft: &ReviewDraft) -> Result<Review, SessionError> {
    let req = ApiRequest::post(REVIEWS_ENDPOINT).with_json(draft)?;
    session.send_json(req).await
}

/// # Errors
///
/// Returns an error if the caller is not the author or the request fails.
pub async fn delete_review(session: &SessionClient, review_id: &str) -> Result<(), SessionError> {
    session.send(ApiRequest::delete(review_endpoint(review_id))).await?;
    Ok(())
}
