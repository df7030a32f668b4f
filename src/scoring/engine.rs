use chrono::{DateTime, Utc};
use futures::{Stream, TryStreamExt};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use tracing::warn;

use super::factors::{age_days, clamp_to_thresholds, date_score, max_threshold, min_threshold, star_score};
use crate::error::ScoreError;
use crate::provider::Review;

/// Upper end of the trust score scale
pub const SCORE_SCALE: f64 = 10.0;

/// Decimal places kept in the published score
pub const SCORE_DECIMAL_PLACES: u32 = 1;

/// A review's decayed score and the most it could have scored at its age
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredReview {
    pub score: f64,
    pub max_score: f64,
}

pub fn score_review(review: &Review, now: DateTime<Utc>) -> ScoredReview {
    let decay = date_score(age_days(review.created_at, now) as f64);
    ScoredReview {
        score: star_score(review.stars) * decay,
        max_score: decay,
    }
}

/// Final 0-10 score, rounded to one decimal place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrustScore(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl TrustScore {
    pub fn from_score(score: f64) -> Result<Self, ScoreError> {
        round_half_up(score, SCORE_DECIMAL_PLACES)
            .map(TrustScore)
            .ok_or(ScoreError::DegenerateInput)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn value(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl fmt::Display for TrustScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

/// Round to `dp` decimal places with halves going away from zero.
/// Returns None for non-finite input.
pub fn round_half_up(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub reviews_counted: usize,
    pub score_sum: f64,
    pub max_sum: f64,
    pub raw_score: f64,
    pub min_threshold: f64,
    pub max_threshold: f64,
    pub clamped: bool, // raw score fell outside the confidence band
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub score: TrustScore,
    pub breakdown: ScoreBreakdown,
}

/// Running sums for one scoring pass. `now` is fixed when the pass starts so
/// every review ages against the same instant.
#[derive(Debug, Clone, Copy)]
pub struct ScoreAccumulator {
    now: DateTime<Utc>,
    score_sum: f64,
    max_sum: f64,
    count: usize,
}

impl ScoreAccumulator {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            score_sum: 0.0,
            max_sum: 0.0,
            count: 0,
        }
    }

    pub fn add(&mut self, review: &Review) -> ScoredReview {
        let scored = score_review(review, self.now);
        self.score_sum += scored.score;
        self.max_sum += scored.max_score;
        self.count += 1;
        scored
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn max_sum(&self) -> f64 {
        self.max_sum
    }

    /// Turn the sums into a clamped, rounded trust score.
    ///
    /// With no counted reviews (or reviews so old their weight underflows to
    /// zero) there is nothing to take a ratio of, and this fails with
    /// `DegenerateInput`.
    pub fn finish(self) -> Result<ScoreReport, ScoreError> {
        if self.count == 0 || self.max_sum <= 0.0 {
            warn!(reviews = self.count, "No review weight to score");
            return Err(ScoreError::DegenerateInput);
        }

        let raw_score = self.score_sum / self.max_sum * SCORE_SCALE;
        let clamped_score = clamp_to_thresholds(raw_score, self.count);
        let score = TrustScore::from_score(clamped_score)?;

        Ok(ScoreReport {
            score,
            breakdown: ScoreBreakdown {
                reviews_counted: self.count,
                score_sum: self.score_sum,
                max_sum: self.max_sum,
                raw_score,
                min_threshold: min_threshold(self.count),
                max_threshold: max_threshold(self.count),
                clamped: clamped_score != raw_score,
            },
        })
    }
}

/// Score every review of `reviews` as it arrives and produce the report
pub async fn aggregate<S>(reviews: S, now: DateTime<Utc>) -> Result<ScoreReport, ScoreError>
where
    S: Stream<Item = Result<Review, ScoreError>>,
{
    let accumulator = reviews
        .try_fold(ScoreAccumulator::new(now), |mut acc, review| async move {
            acc.add(&review);
            Ok(acc)
        })
        .await?;

    accumulator.finish()
}
