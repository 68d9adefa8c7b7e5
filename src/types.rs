//! Core data types for MindGuard
//!
//! This module defines the input record (daily behavioral metrics), the stored
//! entry shape handed out by the repository, and the two engine outputs: the
//! risk assessment and the emotion result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-reported behavioral metrics for a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralMetrics {
    /// Hours slept (0-24)
    pub sleep_hours: f64,
    /// Mood on a 1-10 scale
    pub mood_score: u8,
    /// Messages sent during the day
    pub messages_sent: u32,
    /// Step count
    pub steps: u32,
    /// Screen/app usage in hours (0-24)
    pub app_usage_hours: f64,
    /// Observation time; filled in by the repository when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl BehavioralMetrics {
    pub fn new(
        sleep_hours: f64,
        mood_score: u8,
        messages_sent: u32,
        steps: u32,
        app_usage_hours: f64,
    ) -> Self {
        Self {
            sleep_hours,
            mood_score,
            messages_sent,
            steps,
            app_usage_hours,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A metrics record after it has been appended to the repository
///
/// `timestamp` is authoritative; `metrics.timestamp` is never serialized.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredEntry {
    /// Positive, strictly increasing identifier
    pub id: u64,
    /// Time the entry was observed (or appended, if the caller gave none)
    pub timestamp: DateTime<Utc>,
    /// The submitted metrics
    #[serde(flatten)]
    pub metrics: BehavioralMetrics,
}

#[derive(Serialize)]
struct StoredEntryRepr<'a> {
    id: u64,
    timestamp: &'a DateTime<Utc>,
    sleep_hours: f64,
    mood_score: u8,
    messages_sent: u32,
    steps: u32,
    app_usage_hours: f64,
}

impl Serialize for StoredEntry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StoredEntryRepr {
            id: self.id,
            timestamp: &self.timestamp,
            sleep_hours: self.metrics.sleep_hours,
            mood_score: self.metrics.mood_score,
            messages_sent: self.metrics.messages_sent,
            steps: self.metrics.steps,
            app_usage_hours: self.metrics.app_usage_hours,
        }
        .serialize(serializer)
    }
}

/// Categorical risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavioral factor a risk rule is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Sleep,
    Mood,
    Messaging,
    Movement,
    ScreenTime,
}

/// A factor that contributed to the risk score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Factor that fired; `None` for the balanced-day sentinel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<RiskFactor>,
    /// Human-readable explanation
    pub description: String,
    /// Contribution to the risk score
    pub contribution: f64,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.factor {
            Some(_) => write!(f, "{} (+{:.2})", self.description, self.contribution),
            None => f.write_str(&self.description),
        }
    }
}

/// Output of the behavioral risk engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk score in [0, 1], rounded to 2 decimals
    pub risk_score: f64,
    /// Level derived from the unrounded score
    pub risk_level: RiskLevel,
    /// Factors that fired, in rule order (never empty)
    pub drivers: Vec<Driver>,
    /// Suggested actions, one per fired rule (never empty)
    pub recommended_actions: Vec<String>,
    /// Headline suggestion for the level
    pub suggestion: String,
    /// Display color (hex) for the level
    pub color: String,
}

/// Coarse stress classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Low => "low",
            StressLevel::Medium => "medium",
            StressLevel::High => "high",
        }
    }

    /// Parse a label case-insensitively, ignoring surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(StressLevel::Low),
            "medium" => Some(StressLevel::Medium),
            "high" => Some(StressLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an emotion result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionSource {
    Remote,
    Heuristic,
}

/// Output of the emotion inference engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    pub primary_emotion: String,
    /// Confidence in [0, 1], rounded to 2 decimals
    pub confidence: f64,
    /// Secondary labels; never contains `primary_emotion`
    pub supporting_emotions: Vec<String>,
    pub stress_level: StressLevel,
    pub summary: String,
    pub recommendation: String,
    pub source: EmotionSource,
}

/// Round to 2 decimal places for display
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_metrics_deserialize_without_timestamp() {
        let json = r#"{
            "sleep_hours": 6.5,
            "mood_score": 7,
            "messages_sent": 25,
            "steps": 5000,
            "app_usage_hours": 3.0
        }"#;
        let metrics: BehavioralMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics, BehavioralMetrics::new(6.5, 7, 25, 5000, 3.0));
        assert!(metrics.timestamp.is_none());
    }

    #[test]
    fn test_negative_counts_rejected_by_type() {
        let json = r#"{
            "sleep_hours": 6.5,
            "mood_score": 7,
            "messages_sent": -1,
            "steps": 5000,
            "app_usage_hours": 3.0
        }"#;
        assert!(serde_json::from_str::<BehavioralMetrics>(json).is_err());
    }

    #[test]
    fn test_stored_entry_is_flat() {
        let entry = StoredEntry {
            id: 3,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
            metrics: BehavioralMetrics::new(7.0, 6, 10, 4000, 2.0),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["mood_score"], 6);
        assert_eq!(value["timestamp"], "2024-01-15T08:00:00Z");
    }

    #[test]
    fn test_stored_entry_writes_one_timestamp() {
        let stored_at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        let entry = StoredEntry {
            id: 1,
            timestamp: stored_at,
            metrics: BehavioralMetrics::new(7.0, 6, 10, 4000, 2.0)
                .with_timestamp(Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json.matches("\"timestamp\"").count(), 1);

        let parsed: StoredEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.timestamp, stored_at);
        assert_eq!(parsed.metrics.timestamp, None);
    }

    #[test]
    fn test_stress_label_parsing() {
        assert_eq!(StressLevel::from_label("High"), Some(StressLevel::High));
        assert_eq!(StressLevel::from_label(" MEDIUM "), Some(StressLevel::Medium));
        assert_eq!(StressLevel::from_label("low"), Some(StressLevel::Low));
        assert_eq!(StressLevel::from_label("severe"), None);
    }

    #[test]
    fn test_driver_display() {
        let driver = Driver {
            factor: Some(RiskFactor::Sleep),
            description: "Severely low sleep".to_string(),
            contribution: 0.3,
        };
        assert_eq!(driver.to_string(), "Severely low sleep (+0.30)");
    }

    #[test]
    fn test_levels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&StressLevel::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.666666), 0.67);
        assert_eq!(round2(1.0), 1.0);
    }
}
