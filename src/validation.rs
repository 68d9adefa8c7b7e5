//! Input validation
//!
//! Range checks applied at the boundary, before metrics or journal text reach
//! the engines. The engines assume these checks already passed.

use crate::error::ValidationError;
use crate::types::BehavioralMetrics;

pub const MAX_HOURS: f64 = 24.0;
pub const MIN_MOOD: u8 = 1;
pub const MAX_MOOD: u8 = 10;
pub const MIN_JOURNAL_CHARS: usize = 10;
pub const MAX_JOURNAL_CHARS: usize = 2000;

/// Check that every metric lies in its documented domain.
///
/// Counts (`messages_sent`, `steps`) are unsigned, so only the real-valued
/// fields and the mood scale need checking.
pub fn validate_metrics(metrics: &BehavioralMetrics) -> Result<(), ValidationError> {
    check_hours("sleep_hours", metrics.sleep_hours, ValidationError::SleepHours)?;
    check_hours(
        "app_usage_hours",
        metrics.app_usage_hours,
        ValidationError::AppUsageHours,
    )?;

    if !(MIN_MOOD..=MAX_MOOD).contains(&metrics.mood_score) {
        return Err(ValidationError::MoodScore(metrics.mood_score));
    }

    Ok(())
}

/// Check that journal text length (in characters) is within bounds
pub fn validate_journal(text: &str) -> Result<(), ValidationError> {
    let actual = text.chars().count();
    if !(MIN_JOURNAL_CHARS..=MAX_JOURNAL_CHARS).contains(&actual) {
        return Err(ValidationError::JournalLength {
            min: MIN_JOURNAL_CHARS,
            max: MAX_JOURNAL_CHARS,
            actual,
        });
    }
    Ok(())
}

fn check_hours(
    field: &'static str,
    value: f64,
    out_of_range: fn(f64) -> ValidationError,
) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite(field));
    }
    if !(0.0..=MAX_HOURS).contains(&value) {
        return Err(out_of_range(value));
    }
    Ok(())
}
