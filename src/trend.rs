//! Trend summary over recent entries
//!
//! Averages each metric across a window of stored entries and evaluates every
//! entry with the risk engine, giving a compact picture of the last few days.

use crate::risk::RiskEngine;
use crate::types::{round2, RiskLevel, StoredEntry};
use serde::{Deserialize, Serialize};

/// Averages and risk distribution over a window of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub entries: usize,
    pub avg_sleep_hours: f64,
    pub avg_mood_score: f64,
    pub avg_steps: f64,
    pub avg_app_usage_hours: f64,
    pub avg_risk_score: f64,
    /// Fraction of entries classified as high risk
    pub high_risk_share: f64,
    /// Level of the most recent entry
    pub latest_level: RiskLevel,
}

impl TrendSummary {
    /// Summarize entries given in insertion order; `None` when empty
    pub fn from_entries(entries: &[StoredEntry]) -> Option<Self> {
        let n = entries.len() as f64;

        let mean = |f: fn(&StoredEntry) -> f64| entries.iter().map(f).sum::<f64>() / n;

        let assessments: Vec<_> = entries
            .iter()
            .map(|e| RiskEngine::evaluate(&e.metrics))
            .collect();
        let latest_level = assessments.last()?.risk_level;
        let avg_risk = assessments.iter().map(|a| a.risk_score).sum::<f64>() / n;
        let high = assessments
            .iter()
            .filter(|a| a.risk_level == RiskLevel::High)
            .count() as f64;

        Some(Self {
            entries: entries.len(),
            avg_sleep_hours: round2(mean(|e| e.metrics.sleep_hours)),
            avg_mood_score: round2(mean(|e| e.metrics.mood_score as f64)),
            avg_steps: mean(|e| e.metrics.steps as f64).round(),
            avg_app_usage_hours: round2(mean(|e| e.metrics.app_usage_hours)),
            avg_risk_score: round2(avg_risk),
            high_risk_share: round2(high / n),
            latest_level,
        })
    }
}
