pub mod client;
pub mod types;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::error::ScoreError;

pub use client::HttpProvider;
pub use types::{Page, PageCursor, Review, ReviewUnit};

/// Number of reviews requested per page
pub const PAGE_SIZE: u32 = 100;

/// Minimal capability the score engine needs from a review provider
#[async_trait]
pub trait ReviewProvider: Send + Sync {
    /// Resolve a domain name to the provider's business unit
    async fn find_business_unit(&self, domain: &str) -> Result<ReviewUnit, ScoreError>;

    /// Fetch one page of the unit's review feed
    async fn fetch_page(&self, unit: &ReviewUnit, cursor: &PageCursor)
        -> Result<Page, ScoreError>;
}
