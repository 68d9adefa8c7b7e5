//! Risk evaluation and classification
//!
//! Sums the weights of every fired rule, clamps to 1.0, classifies the
//! unrounded score into a level, then rounds the score for display.

use crate::risk::rules::RISK_RULES;
use crate::types::{round2, BehavioralMetrics, Driver, RiskAssessment, RiskLevel};

/// Scores at or above this are `High`
pub const HIGH_RISK_THRESHOLD: f64 = 0.70;

/// Scores at or above this (and below high) are `Medium`
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.40;

/// Score ceiling in hundredths
const MAX_POINTS: u32 = 100;

const BALANCED_DRIVER: &str = "Balanced day - no major red flags detected.";
const BALANCED_ACTION: &str = "Keep reinforcing the routines that made today feel balanced.";

/// Headline and display color per level
struct LevelPresentation {
    suggestion: &'static str,
    color: &'static str,
}

fn presentation(level: RiskLevel) -> LevelPresentation {
    match level {
        RiskLevel::High => LevelPresentation {
            suggestion: "Please consider reaching out to a trusted friend or counselor today. Your wellbeing matters.",
            color: "#FF6B6B",
        },
        RiskLevel::Medium => LevelPresentation {
            suggestion: "Try a short walk or a quick breathing exercise. Small steps make a difference.",
            color: "#FFE66D",
        },
        RiskLevel::Low => LevelPresentation {
            suggestion: "You're doing great! Keep up the healthy habits.",
            color: "#4ECDC4",
        },
    }
}

/// Classify a risk score into a level
pub fn classify(score: f64) -> RiskLevel {
    if score >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Stateless behavioral risk engine
pub struct RiskEngine;

impl RiskEngine {
    /// Evaluate one day of metrics.
    ///
    /// Input is assumed to be range-checked already; nothing is clamped or
    /// rejected here.
    pub fn evaluate(metrics: &BehavioralMetrics) -> RiskAssessment {
        let mut points: u32 = 0;
        let mut drivers = Vec::new();
        let mut recommended_actions = Vec::new();

        for rule in RISK_RULES.iter().filter(|r| r.fires(metrics)) {
            tracing::debug!(factor = ?rule.factor, weight = rule.weight, "risk rule fired");
            points += rule.weight;
            drivers.push(Driver {
                factor: Some(rule.factor),
                description: rule.description.to_string(),
                contribution: rule.delta(),
            });
            if let Some(action) = rule.action {
                recommended_actions.push(action.to_string());
            }
        }

        if drivers.is_empty() {
            drivers.push(Driver {
                factor: None,
                description: BALANCED_DRIVER.to_string(),
                contribution: 0.0,
            });
        }
        if recommended_actions.is_empty() {
            recommended_actions.push(BALANCED_ACTION.to_string());
        }

        let score = points.min(MAX_POINTS) as f64 / 100.0;
        let risk_level = classify(score);
        let LevelPresentation { suggestion, color } = presentation(risk_level);

        RiskAssessment {
            risk_score: round2(score),
            risk_level,
            drivers,
            recommended_actions,
            suggestion: suggestion.to_string(),
            color: color.to_string(),
        }
    }
}

/// Evaluate one day of metrics (see [`RiskEngine::evaluate`])
pub fn evaluate(metrics: &BehavioralMetrics) -> RiskAssessment {
    RiskEngine::evaluate(metrics)
}
