//! Behavioral risk engine
//!
//! Converts a day of self-reported metrics into a bounded risk score, a level,
//! the drivers that fired, and suggested actions.
//!
//! Pipeline: BehavioralMetrics → rule table → clamped score → level → RiskAssessment

pub mod engine;
pub mod rules;

pub use engine::{classify, evaluate, RiskEngine, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
pub use rules::{RiskRule, RISK_RULES};
