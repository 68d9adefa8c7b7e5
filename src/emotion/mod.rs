//! Emotion inference engine
//!
//! Free-form journal text is classified remotely when a model credential is
//! configured; otherwise, or on any remote failure, a deterministic keyword
//! heuristic produces the result.

pub mod analyzer;
pub mod heuristic;
pub mod remote;

pub use analyzer::{analyze, EmotionAnalyzer};
pub use heuristic::HeuristicClassifier;
pub use remote::{RemoteClassifier, RemoteError};

use crate::types::EmotionResult;

/// A classifier that may fail and be replaced by the heuristic
pub trait EmotionClassifier {
    fn classify(&self, text: &str) -> Result<EmotionResult, RemoteError>;
}
