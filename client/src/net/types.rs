//! REST DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON. Counts arrive from a
//! JavaScript backend and may be encoded as floats (`10.0`), so integer
//! fields go through a tolerant deserializer.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// The signed-in user's profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub nickname: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Minimal user reference embedded in meetings and reviews.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub nickname: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

/// Body for `POST /login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body for `POST /users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

/// Body for `PATCH /users/{id}`; absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

/// Recruitment state of a meeting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    #[default]
    Open,
    Closed,
    Finished,
}

impl MeetingStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Finished => "finished",
        }
    }
}

/// Where a meeting takes place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub address: String,
    #[serde(default)]
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub place: Place,
    /// ISO 8601 start time.
    pub starts_at: String,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub capacity: u32,
    #[serde(default)]
    pub status: MeetingStatus,
    pub host: UserSummary,
    #[serde(default)]
    pub participants: Vec<UserSummary>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl Meeting {
    #[must_use]
    pub fn is_host(&self, user_id: &str) -> bool {
        self.host.id == user_id
    }

    #[must_use]
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p.id == user_id)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.capacity as usize
    }

    /// Whether `user_id` may join right now.
    #[must_use]
    pub fn can_join(&self, user_id: &str) -> bool {
        self.status == MeetingStatus::Open && !self.is_full() && !self.is_host(user_id) && !self.is_participant(user_id)
    }
}

/// Body for `POST /meetings` and `PATCH /meetings/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub place: Option<Place>,
    pub starts_at: String,
    pub capacity: u32,
    pub image_urls: Vec<String>,
}

impl From<&Meeting> for MeetingDraft {
    fn from(meeting: &Meeting) -> Self {
        Self {
            title: meeting.title.clone(),
            description: meeting.description.clone(),
            category: meeting.category.clone(),
            place: Some(meeting.place.clone()),
            starts_at: meeting.starts_at.clone(),
            capacity: meeting.capacity,
            image_urls: meeting.image_urls.clone(),
        }
    }
}

/// Kind of attachment on a review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub meeting_id: String,
    pub author: UserSummary,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub rating: u32,
    pub content: String,
    #[serde(default)]
    pub media: Vec<Media>,
    pub created_at: String,
}

/// Body for `POST /reviews`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub meeting_id: String,
    pub rating: u32,
    pub content: String,
    pub media: Vec<Media>,
}

fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_u64() {
                return u32::try_from(int).map_err(|_| D::Error::custom(format!("value {int} out of range for u32")));
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= 0.0
                && float <= f64::from(u32::MAX)
            {
                return Ok(float as u32);
            }
            Err(D::Error::custom("expected non-negative integer"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
