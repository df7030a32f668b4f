use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::types::{BusinessUnitResponse, Page, PageCursor, ReviewUnit, ReviewsResponse};
use super::{ReviewProvider, PAGE_SIZE};
use crate::config::{Config, DEFAULT_TIMEOUT};
use crate::error::ScoreError;

const API_KEY_HEADER: &str = "apikey";

/// Review provider backed by the provider's HTTP API.
///
/// Both endpoints are authenticated with the `apikey` header, set once on the
/// underlying client.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        Self::with_builder(reqwest::Client::builder(), base_url, api_key, timeout)
    }

    fn with_builder(
        builder: reqwest::ClientBuilder,
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid provider base URL '{}'", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Provider base URL '{}' cannot be used as a base", base_url);
        }

        let mut key = HeaderValue::from_str(api_key).context("API key is not a valid header value")?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let client = builder
            .default_headers(headers)
            .user_agent(concat!("trustscore/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// Build a provider from loaded configuration and a resolved API key
    pub fn from_config(config: &Config, api_key: &str) -> Result<Self> {
        let timeout = match config.provider.timeout.as_deref() {
            Some(t) => humantime::parse_duration(t)
                .with_context(|| format!("Invalid provider timeout '{}'", t))?,
            None => DEFAULT_TIMEOUT,
        };
        Self::new(&config.provider.base_url, api_key, timeout)
    }

    /// `<base>/find-business-unit?domain=<domain>`
    pub fn find_business_unit_url(&self, domain: &str) -> Url {
        let mut url = self.endpoint(&["find-business-unit"]);
        url.query_pairs_mut().append_pair("domain", domain);
        url
    }

    /// `<base>/business-units/<unit>/reviews?perPage=100`
    pub fn reviews_url(&self, unit: &ReviewUnit) -> Url {
        let mut url = self.endpoint(&["business-units", unit.as_str(), "reviews"]);
        url.query_pairs_mut()
            .append_pair("perPage", &PAGE_SIZE.to_string());
        url
    }

    /// Resolve a page cursor into a request URL. `Next` locators are
    /// absolute, see [`resolve_link`].
    pub fn page_url(&self, unit: &ReviewUnit, cursor: &PageCursor) -> Result<Url, ScoreError> {
        match cursor {
            PageCursor::Start => Ok(self.reviews_url(unit)),
            PageCursor::Next(href) => Url::parse(href)
                .map_err(|e| ScoreError::Upstream(format!("invalid next-page link '{}': {}", href, e))),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in new(): the base URL can carry path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, ScoreError> {
        debug!(path = url.path(), "GET");
        Ok(self.client.get(url).send().await?)
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ScoreError> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Resolve a `next-page` href against the URL of the request that returned it
pub fn resolve_link(request_url: &Url, href: &str) -> Result<String, ScoreError> {
    request_url
        .join(href)
        .map(String::from)
        .map_err(|e| ScoreError::Upstream(format!("invalid next-page link '{}': {}", href, e)))
}

fn status_error(url: &Url, status: StatusCode) -> ScoreError {
    ScoreError::Upstream(format!("{} returned HTTP {}", url.path(), status))
}

#[async_trait]
impl ReviewProvider for HttpProvider {
    async fn find_business_unit(&self, domain: &str) -> Result<ReviewUnit, ScoreError> {
        let url = self.find_business_unit_url(domain);
        let response = self.get(url.clone()).await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(ScoreError::NotFound(domain.to_string())),
            status if !status.is_success() => return Err(status_error(&url, status)),
            _ => {}
        }

        let body: BusinessUnitResponse = read_json(response).await?;
        match body.id {
            Some(id) if !id.trim().is_empty() => Ok(ReviewUnit::new(id)),
            _ => Err(ScoreError::NotFound(domain.to_string())),
        }
    }

    async fn fetch_page(
        &self,
        unit: &ReviewUnit,
        cursor: &PageCursor,
    ) -> Result<Page, ScoreError> {
        let url = self.page_url(unit, cursor)?;
        let response = self.get(url.clone()).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(&url, status));
        }

        let body: ReviewsResponse = read_json(response).await?;
        let mut page = Page::try_from(body)?;
        page.next_page = page
            .next_page
            .map(|href| resolve_link(&url, &href))
            .transpose()?;
        Ok(page)
    }
}
