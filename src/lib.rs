//! MindGuard - Risk scoring and emotion inference for self-reported wellness signals
//!
//! MindGuard turns a day of behavioral metrics (sleep, mood, messaging, steps,
//! screen time) into a bounded risk assessment, and a free-form journal entry
//! into an emotion classification. It is a non-clinical prototype.
//!
//! ## Modules
//!
//! - **Risk Engine**: deterministic rule table → score → level → drivers and actions
//! - **Emotion Engine**: remote language-model classification with a keyword fallback
//! - **Pipeline**: validation, entry history and trend summaries around both engines

pub mod config;
pub mod emotion;
pub mod encoder;
pub mod error;
pub mod pipeline;
pub mod repository;
pub mod risk;
pub mod trend;
pub mod types;
pub mod validation;

pub use config::EmotionConfig;
pub use error::{MindGuardError, ValidationError};
pub use pipeline::{analyze_journal, predict_risk, Processor};
pub use repository::EntryRepository;
pub use trend::TrendSummary;
pub use types::{
    BehavioralMetrics, Driver, EmotionResult, EmotionSource, RiskAssessment, RiskFactor,
    RiskLevel, StoredEntry, StressLevel,
};

// Engine exports
pub use emotion::{analyze, EmotionAnalyzer, EmotionClassifier};
pub use risk::{evaluate, RiskEngine};

/// MindGuard version embedded in all reports
pub const MINDGUARD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "mindguard";
