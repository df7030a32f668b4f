/// Errors raised while computing a trust score.
///
/// Every variant aborts the whole computation. There is no partial or
/// degraded score.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// Bad caller input (empty domain, non-positive limit)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The provider has no business unit for this domain
    #[error("No business unit found for domain '{0}'")]
    NotFound(String),

    /// Transport, HTTP status or payload failure from the review provider
    #[error("Review provider error: {0}")]
    Upstream(String),

    /// No review counting towards the score was found
    #[error("No reviews counting towards the trust score were found")]
    DegenerateInput,
}

impl From<reqwest::Error> for ScoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ScoreError::Upstream(format!("request timed out: {}", e))
        } else if e.is_decode() {
            ScoreError::Upstream(format!("malformed response: {}", e))
        } else {
            ScoreError::Upstream(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ScoreError {
    fn from(e: serde_json::Error) -> Self {
        ScoreError::Upstream(format!("malformed response: {}", e))
    }
}
