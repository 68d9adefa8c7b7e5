//! Keyword-based emotion and stress estimation
//!
//! Deterministic fallback used whenever the remote classifier is unavailable.
//! Keywords match as substrings of the lower-cased text.

use crate::types::{round2, EmotionResult, EmotionSource, StressLevel};

/// Negative keywords mapped to their emotion label, in tie-break order
pub const NEGATIVE_KEYWORDS: &[(&str, &str)] = &[
    ("anxious", "anxiety"),
    ("scared", "fear"),
    ("afraid", "fear"),
    ("tired", "fatigue"),
    ("exhausted", "fatigue"),
    ("sad", "sadness"),
    ("depressed", "sadness"),
    ("lonely", "loneliness"),
    ("stress", "stress"),
    ("angry", "anger"),
];

/// Positive keywords mapped to their emotion label, scanned after the negatives
pub const POSITIVE_KEYWORDS: &[(&str, &str)] = &[
    ("grateful", "gratitude"),
    ("happy", "joy"),
    ("excited", "excitement"),
    ("calm", "calm"),
    ("peaceful", "calm"),
];

pub const STRESS_SIGNALS: &[&str] = &["deadline", "pressure", "overwhelmed", "panic", "worry", "urgent"];

/// Labels that count as positive when choosing a recommendation
const POSITIVE_LABELS: &[&str] = &["gratitude", "joy", "calm"];

const DEFAULT_EMOTION: &str = "calm";
const NO_MATCH_CONFIDENCE: f64 = 0.55;
const MAX_CONFIDENCE: f64 = 0.9;

/// Heuristic emotion classifier
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    /// Classify journal text without any external I/O
    pub fn analyze(text: &str) -> EmotionResult {
        let lowered = text.to_lowercase();
        let counts = count_labels(&lowered);

        let (primary, supporting, confidence) = match pick_primary(&counts) {
            None => (DEFAULT_EMOTION.to_string(), Vec::new(), NO_MATCH_CONFIDENCE),
            Some((primary, primary_hits)) => {
                let total: u32 = counts.iter().map(|(_, n)| n).sum();
                let supporting: Vec<String> = counts
                    .iter()
                    .filter(|(label, _)| *label != primary)
                    .map(|(label, _)| label.to_string())
                    .collect();
                let confidence = (primary_hits as f64 / total as f64).min(MAX_CONFIDENCE);
                (primary.to_string(), supporting, confidence)
            }
        };

        let stress_level = stress_level(&lowered);

        EmotionResult {
            summary: build_summary(&primary, stress_level),
            recommendation: build_recommendation(&primary, stress_level),
            primary_emotion: primary,
            confidence: round2(confidence),
            supporting_emotions: supporting,
            stress_level,
            source: EmotionSource::Heuristic,
        }
    }
}

/// Hit counts per label, in order of first match (negatives first)
fn count_labels(lowered: &str) -> Vec<(&'static str, u32)> {
    let mut counts: Vec<(&'static str, u32)> = Vec::new();

    for (token, label) in NEGATIVE_KEYWORDS.iter().chain(POSITIVE_KEYWORDS) {
        if !lowered.contains(token) {
            continue;
        }
        match counts.iter_mut().find(|(l, _)| *l == *label) {
            Some((_, n)) => *n += 1,
            None => counts.push((*label, 1)),
        }
    }

    counts
}

/// Highest hit count wins; ties go to the label matched first
fn pick_primary(counts: &[(&'static str, u32)]) -> Option<(&'static str, u32)> {
    counts
        .iter()
        .copied()
        .fold(None, |best, (label, n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((label, n)),
        })
}

/// Distinct stress signals: two or more is high, one is medium
pub fn stress_level(lowered: &str) -> StressLevel {
    let hits = STRESS_SIGNALS.iter().filter(|s| lowered.contains(*s)).count();
    match hits {
        0 => StressLevel::Low,
        1 => StressLevel::Medium,
        _ => StressLevel::High,
    }
}

fn build_summary(primary: &str, stress: StressLevel) -> String {
    format!("Your journal shows dominant {} tones with {} stress.", primary, stress)
}

fn build_recommendation(primary: &str, stress: StressLevel) -> String {
    let text = match stress {
        StressLevel::High => "Pause for deep breathing and reach out to a trusted person today.",
        StressLevel::Medium => {
            "Schedule a short restorative activity and share your feelings with someone you trust."
        }
        StressLevel::Low if POSITIVE_LABELS.contains(&primary) => {
            "Keep reinforcing these positive habits and note what sparked them."
        }
        StressLevel::Low => "Take a mindful break and practice gentle movement or journaling.",
    };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_grateful_and_calm_tie_goes_to_first_match() {
        let result = HeuristicClassifier::analyze("I feel grateful and calm today");

        assert_eq!(result.primary_emotion, "gratitude");
        assert_eq!(result.supporting_emotions, vec!["calm".to_string()]);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.stress_level, StressLevel::Low);
        assert_eq!(
            result.recommendation,
            "Keep reinforcing these positive habits and note what sparked them."
        );
        assert_eq!(result.source, EmotionSource::Heuristic);
    }

    #[test]
    fn test_no_matches_defaults_to_calm() {
        let result = HeuristicClassifier::analyze("Went to the store and bought bread.");

        assert_eq!(result.primary_emotion, "calm");
        assert!(result.supporting_emotions.is_empty());
        assert_eq!(result.confidence, 0.55);
        assert_eq!(result.stress_level, StressLevel::Low);
        assert_eq!(
            result.summary,
            "Your journal shows dominant calm tones with low stress."
        );
    }

    #[test]
    fn test_stress_escalation_overrides_emotions() {
        let result = HeuristicClassifier::analyze(
            "So happy and grateful, but the deadline pressure has me overwhelmed.",
        );

        assert_eq!(result.stress_level, StressLevel::High);
        assert_eq!(
            result.recommendation,
            "Pause for deep breathing and reach out to a trusted person today."
        );
    }

    #[test]
    fn test_single_stress_signal_is_medium() {
        let result = HeuristicClassifier::analyze("Small worry about tomorrow's meeting.");
        assert_eq!(result.stress_level, StressLevel::Medium);
    }

    #[test]
    fn test_repeated_label_wins_over_single() {
        // "tired" and "exhausted" both map to fatigue
        let result = HeuristicClassifier::analyze("Tired, exhausted and a bit sad tonight.");

        assert_eq!(result.primary_emotion, "fatigue");
        assert_eq!(result.supporting_emotions, vec!["sadness".to_string()]);
        assert_eq!(result.confidence, 0.67);
        assert_eq!(
            result.recommendation,
            "Take a mindful break and practice gentle movement or journaling."
        );
    }

    #[test]
    fn test_confidence_capped() {
        let result = HeuristicClassifier::analyze("So tired. Completely exhausted all day long.");

        assert_eq!(result.primary_emotion, "fatigue");
        assert!(result.supporting_emotions.is_empty());
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        // "stressed" contains "stress"
        let result = HeuristicClassifier::analyze("I am STRESSED about everything");
        assert_eq!(result.primary_emotion, "stress");
    }

    #[test]
    fn test_supporting_never_contains_primary() {
        let texts = [
            "anxious scared afraid tired exhausted sad depressed lonely stress angry",
            "grateful happy excited calm peaceful",
            "peaceful and calm, though a little lonely",
        ];
        for text in texts {
            let result = HeuristicClassifier::analyze(text);
            assert!(!result.supporting_emotions.contains(&result.primary_emotion));
            assert!((0.0..=1.0).contains(&result.confidence));
        }
    }

    #[test]
    fn test_stress_signals_counted_once_each() {
        assert_eq!(stress_level("panic panic panic"), StressLevel::Medium);
        assert_eq!(stress_level("panic and urgent"), StressLevel::High);
    }
}
