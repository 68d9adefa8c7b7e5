//! Runtime configuration
//!
//! Remote classifier settings are read from the environment. An absent or
//! blank credential disables the remote path entirely.

use crate::error::MindGuardError;
use std::env;
use std::time::Duration;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "OPENAI_MODEL";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MINDGUARD_REMOTE_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Near-deterministic sampling for classification
pub const CLASSIFIER_TEMPERATURE: f32 = 0.2;

/// Default number of entries in the "latest" window
pub const DEFAULT_LATEST_WINDOW: usize = 7;

/// Remote emotion classifier settings
#[derive(Debug, Clone)]
pub struct EmotionConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            temperature: CLASSIFIER_TEMPERATURE,
        }
    }
}

impl EmotionConfig {
    /// Build configuration from environment variables
    pub fn from_env() -> Result<Self, MindGuardError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MindGuardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.api_key = lookup(ENV_API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }

        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| {
                    MindGuardError::Config(format!(
                        "{} must be a positive integer, got {:?}",
                        ENV_TIMEOUT_SECS, raw
                    ))
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Whether a credential is present for the remote classifier
    pub fn remote_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Chat completions endpoint URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = EmotionConfig::from_lookup(lookup_from(&[])).unwrap();

        assert!(!config.remote_enabled());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.completions_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_blank_key_disables_remote() {
        let config = EmotionConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "   ")])).unwrap();
        assert!(!config.remote_enabled());
    }

    #[test]
    fn test_overrides() {
        let config = EmotionConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_MODEL, "gpt-4o-mini"),
            (ENV_BASE_URL, "http://localhost:9000/v1/"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert!(config.remote_enabled());
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.completions_url(), "http://localhost:9000/v1/chat/completions");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(EmotionConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")])).is_err());
        assert!(EmotionConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "0")])).is_err());
    }
}
