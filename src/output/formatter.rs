use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::fetch::ScoreResponse;
use crate::scoring::{ScoreBreakdown, TrustScore};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Rough verdict for a score, used as a label next to the number
pub fn score_label(score: &TrustScore) -> &'static str {
    let value = score.value();
    if value >= 8.0 {
        "excellent"
    } else if value >= 6.5 {
        "good"
    } else if value >= 5.0 {
        "average"
    } else if value >= 3.0 {
        "poor"
    } else {
        "bad"
    }
}

/// Format the result as one line
/// Format: "{domain}: {score} ({label})"
pub fn format_score_line(domain: &str, score: &TrustScore, use_colors: bool) -> String {
    let label = score_label(score);
    let number = score.to_string();

    if !use_colors {
        return format!("{}: {} ({})", domain, number, label);
    }

    let number = match label {
        "excellent" | "good" => number.green().bold().to_string(),
        "average" => number.yellow().bold().to_string(),
        _ => number.red().bold().to_string(),
    };
    format!("{}: {} ({})", domain.bold(), number, label)
}

/// Multi-line breakdown of how the score was reached (for verbose mode)
pub fn format_breakdown(breakdown: &ScoreBreakdown) -> String {
    let clamp_note = if breakdown.clamped {
        " (clamped)"
    } else {
        ""
    };

    format!(
        "  Reviews counted: {}\n  Weighted score: {:.4} of {:.4} possible\n  Raw score: {:.4}{}\n  Confidence band: {:.4} - {:.4}",
        breakdown.reviews_counted,
        breakdown.score_sum,
        breakdown.max_sum,
        breakdown.raw_score,
        clamp_note,
        breakdown.min_threshold,
        breakdown.max_threshold,
    )
}

/// Serialize the response payload as pretty JSON
pub fn format_json(response: &ScoreResponse) -> serde_json::Result<String> {
    serde_json::to_string_pretty(response)
}
