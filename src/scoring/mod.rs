pub mod engine;
pub mod factors;
pub mod pager;
pub mod validation;

pub use engine::{aggregate, ScoreAccumulator, ScoreBreakdown, ScoreReport, ScoredReview, TrustScore};
pub use pager::counted_reviews;
pub use validation::{validate_request, DEFAULT_LIMIT};
