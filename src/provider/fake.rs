use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use super::types::{Page, PageCursor, Review, ReviewUnit};
use super::ReviewProvider;
use crate::error::ScoreError;

/// In-memory provider serving a fixed set of units and pages.
///
/// Pages are chained through `next-page` locators of the form `page-<n>`.
/// Every fetch is recorded so tests can assert how far pagination went.
#[derive(Default)]
pub struct FakeProvider {
    units: HashMap<String, String>,
    pages: Vec<Vec<Review>>,
    fail_on_page: Option<usize>,
    requests: Mutex<Vec<PageCursor>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(mut self, domain: &str, unit: &str) -> Self {
        self.units.insert(domain.to_string(), unit.to_string());
        self
    }

    pub fn with_page(mut self, reviews: Vec<Review>) -> Self {
        self.pages.push(reviews);
        self
    }

    /// Split `reviews` into consecutive pages of `per_page`
    pub fn with_paged(mut self, reviews: Vec<Review>, per_page: usize) -> Self {
        for chunk in reviews.chunks(per_page) {
            self.pages.push(chunk.to_vec());
        }
        self
    }

    /// Fail with an upstream error when page `index` (0-based) is requested
    pub fn failing_on_page(mut self, index: usize) -> Self {
        self.fail_on_page = Some(index);
        self
    }

    pub fn pages_fetched(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<PageCursor> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewProvider for FakeProvider {
    async fn find_business_unit(&self, domain: &str) -> Result<ReviewUnit, ScoreError> {
        self.units
            .get(domain)
            .map(|id| ReviewUnit::new(id.clone()))
            .ok_or_else(|| ScoreError::NotFound(domain.to_string()))
    }

    async fn fetch_page(
        &self,
        _unit: &ReviewUnit,
        cursor: &PageCursor,
    ) -> Result<Page, ScoreError> {
        self.requests.lock().unwrap().push(cursor.clone());

        let index = match cursor {
            PageCursor::Start => 0,
            PageCursor::Next(href) => href
                .strip_prefix("page-")
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| ScoreError::Upstream(format!("unknown page '{}'", href)))?,
        };

        if self.fail_on_page == Some(index) {
            return Err(ScoreError::Upstream("HTTP 503".to_string()));
        }

        let reviews = self.pages.get(index).cloned().unwrap_or_default();
        let next_page = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));
        Ok(Page { reviews, next_page })
    }
}

pub fn review(stars: u8, created_at: DateTime<Utc>, counts: bool) -> Review {
    Review {
        stars,
        created_at,
        counts_towards_score: counts,
    }
}
