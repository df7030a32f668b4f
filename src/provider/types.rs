use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

use crate::error::ScoreError;

/// Link relation marking the next page of a review feed
pub const NEXT_PAGE_REL: &str = "next-page";

/// Provider-side identifier of the business being reviewed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewUnit(String);

impl ReviewUnit {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub stars: u8, // 1..=5
    pub created_at: DateTime<Utc>,
    pub counts_towards_score: bool,
}

/// Where to read the next page of reviews from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    /// First page of the unit's feed
    Start,
    /// Locator taken from a previous page's `next-page` link
    Next(String),
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub reviews: Vec<Review>,
    pub next_page: Option<String>,
}

/// Body of the find-business-unit endpoint
#[derive(Debug, Deserialize)]
pub struct BusinessUnitResponse {
    #[serde(default)]
    pub id: Option<String>,
}

/// Body of the business-unit reviews endpoint
#[derive(Debug, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,
    #[serde(default)]
    pub links: Vec<LinkRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub stars: i64,
    pub created_at: DateTime<Utc>,
    pub counts_towards_trust_score: bool,
}

#[derive(Debug, Deserialize)]
pub struct LinkRecord {
    pub rel: String,
    pub href: String,
}

impl TryFrom<ReviewRecord> for Review {
    type Error = ScoreError;

    fn try_from(record: ReviewRecord) -> Result<Self, Self::Error> {
        let stars = u8::try_from(record.stars)
            .ok()
            .filter(|s| (1..=5).contains(s))
            .ok_or_else(|| {
                ScoreError::Upstream(format!("star rating out of range: {}", record.stars))
            })?;

        Ok(Review {
            stars,
            created_at: record.created_at,
            counts_towards_score: record.counts_towards_trust_score,
        })
    }
}

impl TryFrom<ReviewsResponse> for Page {
    type Error = ScoreError;

    fn try_from(response: ReviewsResponse) -> Result<Self, Self::Error> {
        let reviews = response
            .reviews
            .into_iter()
            .map(Review::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        // Last next-page link wins if the provider repeats it
        let next_page = response
            .links
            .into_iter()
            .filter(|link| link.rel == NEXT_PAGE_REL)
            .map(|link| link.href)
            .last();

        Ok(Page { reviews, next_page })
    }
}
