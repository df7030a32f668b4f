use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ScoreError;
use crate::provider::ReviewProvider;
use crate::scoring::{aggregate, counted_reviews, validate_request, ScoreReport, TrustScore};

/// Inbound scoring request, as handed over by the hosting layer
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ScoreRequest {
    pub domain: String,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Response payload: the scored domain, the limit actually applied and the
/// score itself
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreResponse {
    pub domain: String,
    pub limit: usize,
    pub trust_score: TrustScore,
}

/// Resolve the domain, walk its review feed and score it.
///
/// Reviews are scored as each page arrives; the full review set is never
/// held in memory. Any provider failure aborts the computation.
pub async fn compute_report<P>(
    provider: &P,
    domain: &str,
    limit: Option<i64>,
) -> Result<ScoreReport, ScoreError>
where
    P: ReviewProvider + ?Sized,
{
    compute_report_at(provider, domain, limit, Utc::now()).await
}

/// Same as [`compute_report`] with an explicit reference instant for review
/// ages
pub async fn compute_report_at<P>(
    provider: &P,
    domain: &str,
    limit: Option<i64>,
    now: DateTime<Utc>,
) -> Result<ScoreReport, ScoreError>
where
    P: ReviewProvider + ?Sized,
{
    let (domain, limit) = validate_request(domain, limit)?;
    score_domain(provider, &domain, limit, now).await
}

async fn score_domain<P>(
    provider: &P,
    domain: &str,
    limit: usize,
    now: DateTime<Utc>,
) -> Result<ScoreReport, ScoreError>
where
    P: ReviewProvider + ?Sized,
{
    let unit = provider.find_business_unit(domain).await?;
    debug!(domain = %domain, unit = %unit, limit, "Resolved business unit");

    let report = aggregate(counted_reviews(provider, &unit, limit), now).await?;
    info!(
        domain = %domain,
        reviews = report.breakdown.reviews_counted,
        score = %report.score,
        "Computed trust score"
    );

    Ok(report)
}

/// Compute the trust score for `domain` from at most `limit` counted reviews
/// (300 when not given)
pub async fn compute_trust_score<P>(
    provider: &P,
    domain: &str,
    limit: Option<i64>,
) -> Result<TrustScore, ScoreError>
where
    P: ReviewProvider + ?Sized,
{
    Ok(compute_report(provider, domain, limit).await?.score)
}

/// Answer a hosting-layer request with its response payload
pub async fn handle_request<P>(
    provider: &P,
    request: &ScoreRequest,
) -> Result<ScoreResponse, ScoreError>
where
    P: ReviewProvider + ?Sized,
{
    let (domain, limit) = validate_request(&request.domain, request.limit)?;
    let report = score_domain(provider, &domain, limit, Utc::now()).await?;

    Ok(ScoreResponse {
        domain,
        limit,
        trust_score: report.score,
    })
}
