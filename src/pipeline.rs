//! Orchestration
//!
//! This module provides the public API that thin transport adapters (the CLI,
//! or an HTTP layer) call: validate input, run the engines, and keep the
//! entry history.

use crate::config::{EmotionConfig, DEFAULT_LATEST_WINDOW};
use crate::emotion::EmotionAnalyzer;
use crate::encoder::{AssessedEntry, ReportBody, ReportEncoder};
use crate::error::MindGuardError;
use crate::repository::EntryRepository;
use crate::risk::RiskEngine;
use crate::trend::TrendSummary;
use crate::types::{BehavioralMetrics, EmotionResult, RiskAssessment, StoredEntry};
use crate::validation::{validate_journal, validate_metrics};

/// Assess one day of metrics given as JSON and return a JSON report (stateless, one-shot).
///
/// # Example
/// ```ignore
/// let report = predict_risk(r#"{"sleep_hours": 7, "mood_score": 6, ...}"#)?;
/// ```
pub fn predict_risk(metrics_json: &str) -> Result<String, MindGuardError> {
    let metrics: BehavioralMetrics = serde_json::from_str(metrics_json)?;
    validate_metrics(&metrics)?;

    let assessment = RiskEngine::evaluate(&metrics);
    ReportEncoder::new().encode_to_json(ReportBody::Risk(assessment))
}

/// Analyze journal text and return a JSON report (stateless, one-shot).
///
/// Uses the environment's remote configuration when present.
pub fn analyze_journal(text: &str) -> Result<String, MindGuardError> {
    validate_journal(text)?;

    let result = crate::emotion::analyze(text);
    ReportEncoder::new().encode_to_json(ReportBody::Emotion(result))
}

/// Stateful processor holding the entry history and the emotion analyzer
pub struct Processor {
    repository: EntryRepository,
    analyzer: EmotionAnalyzer,
    latest_window: usize,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor {
    /// Create an offline processor with the default latest window (7 entries)
    pub fn new() -> Self {
        Self::with_analyzer(EmotionAnalyzer::offline())
    }

    /// Create a processor using the given emotion configuration
    pub fn with_config(config: &EmotionConfig) -> Self {
        Self::with_analyzer(EmotionAnalyzer::new(config))
    }

    pub fn with_analyzer(analyzer: EmotionAnalyzer) -> Self {
        Self {
            repository: EntryRepository::new(),
            analyzer,
            latest_window: DEFAULT_LATEST_WINDOW,
        }
    }

    /// Set the number of entries returned by [`Processor::latest`]
    pub fn with_latest_window(mut self, entries: usize) -> Self {
        self.latest_window = entries;
        self
    }

    /// Validate and store metrics
    pub fn submit(&self, metrics: BehavioralMetrics) -> Result<StoredEntry, MindGuardError> {
        validate_metrics(&metrics)?;
        Ok(self.repository.append(metrics))
    }

    /// Validate and assess metrics without storing them
    pub fn predict(&self, metrics: &BehavioralMetrics) -> Result<RiskAssessment, MindGuardError> {
        validate_metrics(metrics)?;
        Ok(RiskEngine::evaluate(metrics))
    }

    /// Assess the most recently submitted entry
    pub fn predict_latest(&self) -> Result<RiskAssessment, MindGuardError> {
        let entry = self.repository.last().ok_or(MindGuardError::NoDataAvailable)?;
        Ok(RiskEngine::evaluate(&entry.metrics))
    }

    /// Assess a stored entry by id
    pub fn predict_entry(&self, id: u64) -> Result<RiskAssessment, MindGuardError> {
        let entry = self
            .repository
            .get(id)
            .ok_or(MindGuardError::EntryNotFound(id))?;
        Ok(RiskEngine::evaluate(&entry.metrics))
    }

    /// Validate and classify journal text
    pub fn analyze_text(&self, text: &str) -> Result<EmotionResult, MindGuardError> {
        validate_journal(text)?;
        Ok(self.analyzer.analyze(text))
    }

    pub fn entries(&self) -> Vec<StoredEntry> {
        self.repository.list_all()
    }

    /// The latest window of entries, most recent last
    pub fn latest(&self) -> Vec<StoredEntry> {
        self.repository.list_latest(self.latest_window)
    }

    /// Latest entries paired with their assessments
    pub fn history(&self) -> Vec<AssessedEntry> {
        self.latest()
            .into_iter()
            .map(|entry| AssessedEntry {
                assessment: RiskEngine::evaluate(&entry.metrics),
                entry,
            })
            .collect()
    }

    /// Trend over the latest window; `None` before any submission
    pub fn trend(&self) -> Option<TrendSummary> {
        TrendSummary::from_entries(&self.latest())
    }

    pub fn entry_count(&self) -> usize {
        self.repository.len()
    }

    pub fn remote_enabled(&self) -> bool {
        self.analyzer.remote_enabled()
    }

    /// Drop all stored entries
    pub fn clear(&self) {
        self.repository.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::{EmotionSource, RiskLevel, StressLevel};

    #[test]
    fn test_predict_risk_stateless() {
        let json = r#"{
            "sleep_hours": 3.5,
            "mood_score": 2,
            "messages_sent": 1,
            "steps": 400,
            "app_usage_hours": 9.5
        }"#;
        let report = predict_risk(json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(value["kind"], "risk");
        assert_eq!(value["body"]["risk_score"], 1.0);
        assert_eq!(value["body"]["risk_level"], "high");
        assert_eq!(value["body"]["drivers"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_predict_risk_rejects_out_of_range() {
        let json = r#"{
            "sleep_hours": 30,
            "mood_score": 5,
            "messages_sent": 1,
            "steps": 400,
            "app_usage_hours": 2
        }"#;
        assert!(matches!(
            predict_risk(json),
            Err(MindGuardError::Validation(ValidationError::SleepHours(_)))
        ));
        assert!(matches!(predict_risk("not json"), Err(MindGuardError::JsonError(_))));
    }

    #[test]
    fn test_analyze_journal_rejects_short_text() {
        assert!(matches!(
            analyze_journal("short"),
            Err(MindGuardError::Validation(ValidationError::JournalLength { .. }))
        ));
    }

    #[test]
    fn test_predict_latest_requires_data() {
        let processor = Processor::new();
        assert!(matches!(
            processor.predict_latest(),
            Err(MindGuardError::NoDataAvailable)
        ));
        assert!(processor.trend().is_none());
    }

    #[test]
    fn test_submit_then_predict_latest() {
        let processor = Processor::new();
        processor
            .submit(BehavioralMetrics::new(8.0, 8, 20, 8000, 2.0))
            .unwrap();
        processor
            .submit(BehavioralMetrics::new(5.0, 4, 2, 800, 7.0))
            .unwrap();

        let assessment = processor.predict_latest().unwrap();
        // 0.15 + 0.20 + 0.15 + 0.10 + 0.10
        assert_eq!(assessment.risk_score, 0.7);
        assert_eq!(assessment.risk_level, RiskLevel::High);

        let first = processor.predict_entry(1).unwrap();
        assert_eq!(first.risk_level, RiskLevel::Low);
        assert!(matches!(
            processor.predict_entry(9),
            Err(MindGuardError::EntryNotFound(9))
        ));
    }

    #[test]
    fn test_submit_rejects_invalid_without_storing() {
        let processor = Processor::new();
        let result = processor.submit(BehavioralMetrics::new(7.0, 0, 2, 800, 7.0));

        assert!(matches!(
            result,
            Err(MindGuardError::Validation(ValidationError::MoodScore(0)))
        ));
        assert_eq!(processor.entry_count(), 0);
    }

    #[test]
    fn test_latest_window_and_history() {
        let processor = Processor::new().with_latest_window(3);
        for sleep in [8.0, 7.0, 6.0, 5.0, 3.0] {
            processor
                .submit(BehavioralMetrics::new(sleep, 7, 20, 8000, 2.0))
                .unwrap();
        }

        let latest = processor.latest();
        assert_eq!(latest.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3, 4, 5]);

        let history = processor.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].assessment.risk_score, 0.3);

        let trend = processor.trend().unwrap();
        assert_eq!(trend.entries, 3);
        assert_eq!(trend.avg_sleep_hours, 4.67);
        assert_eq!(processor.entries().len(), 5);
    }

    #[test]
    fn test_clear_resets_history() {
        let processor = Processor::new();
        processor
            .submit(BehavioralMetrics::new(8.0, 8, 20, 8000, 2.0))
            .unwrap();
        processor.clear();

        assert_eq!(processor.entry_count(), 0);
        let entry = processor
            .submit(BehavioralMetrics::new(8.0, 8, 20, 8000, 2.0))
            .unwrap();
        assert_eq!(entry.id, 1);
    }

    #[test]
    fn test_analyze_text_offline() {
        let processor = Processor::new();
        assert!(!processor.remote_enabled());

        let result = processor
            .analyze_text("Deadline pressure all week, I feel anxious and tired.")
            .unwrap();
        assert_eq!(result.stress_level, StressLevel::High);
        assert_eq!(result.primary_emotion, "anxiety");
        assert_eq!(result.source, EmotionSource::Heuristic);
    }
}
