/// Duration formatting shared by the history list, the chart and the live display.
use tracing::warn;

use crate::types::{MS_IN_HOUR, MS_IN_SECOND};

const ZERO_DURATION: &str = "00:00:00";

/// Formats a span in milliseconds as `HH:MM:SS`.
///
/// Hours are not wrapped at 24. Negative or NaN input yields `00:00:00`.
pub fn format_duration(ms: f64) -> String {
    if !is_valid_span(ms) {
        warn!(value = ms, "format_duration received an invalid span");
        return ZERO_DURATION.to_string();
    }
    let total_seconds = (ms / MS_IN_SECOND as f64).floor() as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Converts a span in milliseconds to hours, rounded half-up to two decimals.
pub fn format_hours(ms: f64) -> f64 {
    if !is_valid_span(ms) {
        warn!(value = ms, "format_hours received an invalid span");
        return 0.0;
    }
    (ms / MS_IN_HOUR as f64 * 100.0).round() / 100.0
}

fn is_valid_span(ms: f64) -> bool {
    ms.is_finite() && ms >= 0.0
}
