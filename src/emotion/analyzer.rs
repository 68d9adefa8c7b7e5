//! Remote-first emotion analysis with heuristic fallback

use crate::config::EmotionConfig;
use crate::emotion::heuristic::HeuristicClassifier;
use crate::emotion::remote::RemoteClassifier;
use crate::emotion::EmotionClassifier;
use crate::error::MindGuardError;
use crate::types::EmotionResult;

/// Emotion analyzer that tries one remote classification, then falls back.
///
/// `analyze` never fails: any remote error is logged and masked by the
/// keyword heuristic.
pub struct EmotionAnalyzer {
    remote: Option<Box<dyn EmotionClassifier + Send + Sync>>,
}

impl Default for EmotionAnalyzer {
    fn default() -> Self {
        Self::offline()
    }
}

impl EmotionAnalyzer {
    /// Build from configuration; remote is enabled only when a credential is set
    pub fn new(config: &EmotionConfig) -> Self {
        if !config.remote_enabled() {
            return Self::offline();
        }
        match RemoteClassifier::new(config) {
            Ok(classifier) => Self::with_classifier(classifier),
            Err(e) => {
                tracing::warn!(error = %e, "remote emotion classifier unavailable");
                Self::offline()
            }
        }
    }

    /// Build from environment variables
    pub fn from_env() -> Result<Self, MindGuardError> {
        Ok(Self::new(&EmotionConfig::from_env()?))
    }

    /// Heuristic-only analyzer
    pub fn offline() -> Self {
        Self { remote: None }
    }

    /// Use a custom remote classifier
    pub fn with_classifier<C>(classifier: C) -> Self
    where
        C: EmotionClassifier + Send + Sync + 'static,
    {
        Self {
            remote: Some(Box::new(classifier)),
        }
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// Classify journal text
    pub fn analyze(&self, text: &str) -> EmotionResult {
        if let Some(remote) = &self.remote {
            match remote.classify(text) {
                Ok(result) => return result,
                Err(e) => {
                    tracing::warn!(error = %e, "remote emotion classification failed, using heuristic fallback");
                }
            }
        }
        tracing::debug!("classifying journal text with keyword heuristic");
        HeuristicClassifier::analyze(text)
    }
}

/// Classify journal text using the environment's configuration.
///
/// The remote capability is checked on every call; a bad configuration
/// degrades to the heuristic path.
pub fn analyze(text: &str) -> EmotionResult {
    let analyzer = EmotionAnalyzer::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid emotion configuration, running offline");
        EmotionAnalyzer::offline()
    });
    analyzer.analyze(text)
}
