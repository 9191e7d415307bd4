//! Meeting-list state for the home page.
//!
//! DESIGN
//! ======
//! The filter is plain data that renders to query pairs, so the list request
//! and the page's filter controls share one source of truth.

#[cfg(test)]
#[path = "meetings_test.rs"]
mod meetings_test;

use crate::net::types::{Meeting, MeetingStatus};

/// Ordering options offered by the list page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Latest,
    StartingSoon,
    Popular,
}

impl SortOrder {
    pub const ALL: [Self; 3] = [Self::Latest, Self::StartingSoon, Self::Popular];

    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::StartingSoon => "startsAt",
            Self::Popular => "popular",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Latest => "Newest",
            Self::StartingSoon => "Starting soon",
            Self::Popular => "Most joined",
        }
    }

    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        Self::ALL.into_iter().find(|order| order.as_param() == raw).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeetingFilter {
    pub keyword: String,
    pub category: Option<String>,
    pub region: Option<String>,
    pub status: Option<MeetingStatus>,
    pub sort: SortOrder,
}

impl MeetingFilter {
    /// Query pairs for `GET /meetings`; blank fields are omitted.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let keyword = self.keyword.trim();
        if !keyword.is_empty() {
            pairs.push(("keyword".to_owned(), keyword.to_owned()));
        }
        if let Some(category) = non_blank(self.category.as_deref()) {
            pairs.push(("category".to_owned(), category.to_owned()));
        }
        if let Some(region) = non_blank(self.region.as_deref()) {
            pairs.push(("region".to_owned(), region.to_owned()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_owned(), status.as_str().to_owned()));
        }
        pairs.push(("sort".to_owned(), self.sort.as_param().to_owned()));
        pairs
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Shared meeting list state.
#[derive(Clone, Debug, Default)]
pub struct MeetingsState {
    pub filter: MeetingFilter,
    pub items: Vec<Meeting>,
    pub loading: bool,
    pub error: Option<String>,
}
