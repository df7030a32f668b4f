use chrono::{DateTime, Duration, Utc};

/// Steepness of the recency curve
pub const DECAY_STEEPNESS: f64 = 0.004;

/// Age in days at which a review keeps half its weight (six months)
pub const DECAY_MIDPOINT_DAYS: f64 = 365.0 * 0.5;

/// Both confidence thresholds start from this score for a single review
pub const STARTING_SCORE: f64 = 6.0;

const MAX_THRESHOLD_X_SHIFT: f64 = 0.0;
const MIN_THRESHOLD_X_SHIFT: f64 = 5.0;
const MIN_THRESHOLD_LOG_BASE: f64 = 1.5;

/// Map a 1-5 star rating linearly onto [0, 1]: 1 star is 0.0, each extra
/// star adds 0.25.
pub fn star_score(stars: u8) -> f64 {
    (f64::from(stars) - 1.0) * 0.25
}

/// Whole days between `created_at` and `now`, rounded towards negative
/// infinity. Reviews stamped in the future get a negative age.
pub fn age_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let age = now - created_at;
    // num_days truncates towards zero
    let days = age.num_days();
    if age < Duration::days(days) {
        days - 1
    } else {
        days
    }
}

/// Inverted logistic curve over review age.
///
/// Recent reviews score close to 1, reviews older than the midpoint fall
/// towards 0. The value doubles as the highest score the review could have
/// contributed.
pub fn date_score(age_days: f64) -> f64 {
    let logistic = 1.0 / (1.0 + (-DECAY_STEEPNESS * (age_days - DECAY_MIDPOINT_DAYS)).exp());
    1.0 - logistic
}

/// Upper confidence bound: `ln(n) + 6`. Grows with the number of reviews.
/// Negative infinity for `n == 0`; callers never score an empty sample.
pub fn max_threshold(number_of_reviews: usize) -> f64 {
    let y_shift = STARTING_SCORE - (MAX_THRESHOLD_X_SHIFT + 1.0).ln();
    (number_of_reviews as f64 + MAX_THRESHOLD_X_SHIFT).ln() + y_shift
}

/// Lower confidence bound: `-log_1.5(n + 5) + 6 + log_1.5(6)`. Falls as the
/// number of reviews grows.
pub fn min_threshold(number_of_reviews: usize) -> f64 {
    let y_shift = STARTING_SCORE + log_base(MIN_THRESHOLD_X_SHIFT + 1.0, MIN_THRESHOLD_LOG_BASE);
    -log_base(number_of_reviews as f64 + MIN_THRESHOLD_X_SHIFT, MIN_THRESHOLD_LOG_BASE) + y_shift
}

fn log_base(value: f64, base: f64) -> f64 {
    value.ln() / base.ln()
}

/// Keep `score` inside the confidence band for `number_of_reviews`
pub fn clamp_to_thresholds(score: f64, number_of_reviews: usize) -> f64 {
    let min = min_threshold(number_of_reviews);
    let max = max_threshold(number_of_reviews);

    if score < min {
        min
    } else if score > max {
        max
    } else {
        score
    }
}
