pub mod config;
pub mod credentials;
pub mod error;
pub mod fetch;
pub mod output;
pub mod provider;
pub mod scoring;

pub use error::ScoreError;
pub use fetch::{compute_report, compute_trust_score, handle_request, ScoreRequest, ScoreResponse};
pub use provider::{HttpProvider, ReviewProvider};
pub use scoring::TrustScore;
