pub mod formatter;

pub use formatter::{format_breakdown, format_json, format_score_line, score_label, should_use_colors};
