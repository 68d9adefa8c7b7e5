//! Error types for MindGuard

use thiserror::Error;

/// Errors surfaced to callers of the orchestration layer.
///
/// The risk and emotion engines themselves never fail for well-formed input;
/// these cover the collaborators around them.
#[derive(Debug, Error)]
pub enum MindGuardError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("No behavioral data available; submit data first")]
    NoDataAvailable,

    #[error("Entry not found: {0}")]
    EntryNotFound(u64),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Input range violations, reported before anything reaches an engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("sleep_hours must be within [0, 24], got {0}")]
    SleepHours(f64),

    #[error("mood_score must be within [1, 10], got {0}")]
    MoodScore(u8),

    #[error("app_usage_hours must be within [0, 24], got {0}")]
    AppUsageHours(f64),

    #[error("{0} must be a finite number")]
    NonFinite(&'static str),

    #[error("journal text must be {min}-{max} characters, got {actual}")]
    JournalLength { min: usize, max: usize, actual: usize },
}
