//! Canonical risk rule table
//!
//! Each rule is a guarded increment over one behavioral factor. Within a factor
//! the trigger ranges are mutually exclusive, so a factor contributes at most once.
//! Weights are held in hundredths so sums are exact and threshold comparisons
//! never flicker on floating-point accumulation.

use crate::types::{BehavioralMetrics, RiskFactor};
use std::fmt;

/// A single guarded risk increment
#[derive(Clone, Copy)]
pub struct RiskRule {
    pub factor: RiskFactor,
    /// Contribution in hundredths of a risk point (30 = +0.30)
    pub weight: u32,
    pub description: &'static str,
    pub action: Option<&'static str>,
    fires: fn(&BehavioralMetrics) -> bool,
}

impl RiskRule {
    /// Whether this rule fires for the given metrics
    pub fn fires(&self, metrics: &BehavioralMetrics) -> bool {
        (self.fires)(metrics)
    }

    /// Contribution as a score delta
    pub fn delta(&self) -> f64 {
        self.weight as f64 / 100.0
    }
}

impl fmt::Debug for RiskRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiskRule")
            .field("factor", &self.factor)
            .field("weight", &self.weight)
            .field("description", &self.description)
            .finish()
    }
}

/// Rules in evaluation order; drivers and actions are reported in this order
pub static RISK_RULES: [RiskRule; 7] = [
    RiskRule {
        factor: RiskFactor::Sleep,
        weight: 30,
        description: "Severely low sleep",
        action: Some("Block 30 minutes for deep rest tonight"),
        fires: |m| m.sleep_hours < 4.0,
    },
    RiskRule {
        factor: RiskFactor::Sleep,
        weight: 15,
        description: "Not enough restorative sleep",
        action: Some("Wind down 30 minutes earlier to aim for 6+ hours"),
        fires: |m| (4.0..6.0).contains(&m.sleep_hours),
    },
    RiskRule {
        factor: RiskFactor::Mood,
        weight: 40,
        description: "Mood is critically low",
        action: Some("Reach out to someone you trust and share how you feel"),
        fires: |m| m.mood_score <= 3,
    },
    RiskRule {
        factor: RiskFactor::Mood,
        weight: 20,
        description: "Mood trending downward",
        action: Some("Do a short grounding exercise or journaling session"),
        fires: |m| m.mood_score > 3 && m.mood_score <= 5,
    },
    RiskRule {
        factor: RiskFactor::Messaging,
        weight: 15,
        description: "Limited social touchpoints",
        action: Some("Send a quick check-in message to a friend"),
        fires: |m| m.messages_sent < 3,
    },
    RiskRule {
        factor: RiskFactor::Movement,
        weight: 10,
        description: "Low movement",
        action: Some("Take a 5-minute walk or stretch break"),
        fires: |m| m.steps < 1000,
    },
    RiskRule {
        factor: RiskFactor::ScreenTime,
        weight: 10,
        description: "Heavy screen time",
        action: Some("Try a mini digital detox for one hour"),
        fires: |m| m.app_usage_hours > 6.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fired(metrics: &BehavioralMetrics) -> Vec<&'static str> {
        RISK_RULES
            .iter()
            .filter(|r| r.fires(metrics))
            .map(|r| r.description)
            .collect()
    }

    #[test]
    fn test_sleep_boundaries() {
        let at = |sleep| BehavioralMetrics::new(sleep, 8, 20, 8000, 2.0);

        assert_eq!(fired(&at(3.99)), vec!["Severely low sleep"]);
        assert_eq!(fired(&at(4.0)), vec!["Not enough restorative sleep"]);
        assert_eq!(fired(&at(5.99)), vec!["Not enough restorative sleep"]);
        assert!(fired(&at(6.0)).is_empty());
    }

    #[test]
    fn test_mood_boundaries() {
        let at = |mood| BehavioralMetrics::new(8.0, mood, 20, 8000, 2.0);

        assert_eq!(fired(&at(3)), vec!["Mood is critically low"]);
        assert_eq!(fired(&at(4)), vec!["Mood trending downward"]);
        assert_eq!(fired(&at(5)), vec!["Mood trending downward"]);
        assert!(fired(&at(6)).is_empty());
    }

    #[test]
    fn test_single_threshold_factors() {
        assert_eq!(
            fired(&BehavioralMetrics::new(8.0, 8, 2, 8000, 2.0)),
            vec!["Limited social touchpoints"]
        );
        assert!(fired(&BehavioralMetrics::new(8.0, 8, 3, 8000, 2.0)).is_empty());

        assert_eq!(
            fired(&BehavioralMetrics::new(8.0, 8, 20, 999, 2.0)),
            vec!["Low movement"]
        );
        assert!(fired(&BehavioralMetrics::new(8.0, 8, 20, 1000, 2.0)).is_empty());

        assert_eq!(
            fired(&BehavioralMetrics::new(8.0, 8, 20, 8000, 6.01)),
            vec!["Heavy screen time"]
        );
        assert!(fired(&BehavioralMetrics::new(8.0, 8, 20, 8000, 6.0)).is_empty());
    }

    #[test]
    fn test_each_factor_fires_at_most_once() {
        let sleeps = [0.0, 3.9, 4.0, 5.5, 6.0, 12.0, 24.0];
        let moods = 1..=10u8;

        for sleep in sleeps {
            for mood in moods.clone() {
                let metrics = BehavioralMetrics::new(sleep, mood, 0, 0, 24.0);
                let mut per_factor: HashMap<_, u32> = HashMap::new();
                for rule in RISK_RULES.iter().filter(|r| r.fires(&metrics)) {
                    *per_factor.entry(rule.factor).or_default() += 1;
                }
                assert!(per_factor.values().all(|&n| n == 1));
            }
        }
    }

    #[test]
    fn test_every_rule_defines_an_action() {
        assert!(RISK_RULES.iter().all(|r| r.action.is_some()));
        assert_eq!(RISK_RULES[0].delta(), 0.3);
    }
}
