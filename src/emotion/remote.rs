//! Remote language-model emotion classifier
//!
//! Issues a single blocking chat-completions call with a bounded timeout and
//! parses the strict-JSON reply. Every failure is reported as a [`RemoteError`]
//! so the analyzer can fall back to the keyword heuristic.

use crate::config::EmotionConfig;
use crate::emotion::EmotionClassifier;
use crate::types::{round2, EmotionResult, EmotionSource, StressLevel};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

const DEFAULT_PRIMARY: &str = "calm";
const DEFAULT_CONFIDENCE: f64 = 0.65;
const DEFAULT_SUMMARY: &str = "You appear balanced with no alarming emotional spikes.";
const DEFAULT_RECOMMENDATION: &str =
    "Keep reflecting on your feelings and share them with a friend.";

/// Reasons the remote classifier could not produce a result
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote classifier is not configured")]
    NotConfigured,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote classifier returned HTTP {0}")]
    Status(u16),

    #[error("remote classifier returned no content")]
    EmptyResponse,

    #[error("malformed classifier response: {0}")]
    Malformed(String),
}

/// Fields the model is asked to return; any may be missing
#[derive(Debug, Deserialize)]
struct RemotePayload {
    primary_emotion: Option<String>,
    confidence: Option<f64>,
    supporting_emotions: Option<Vec<String>>,
    stress_level: Option<String>,
    summary: Option<String>,
    recommendation: Option<String>,
}

/// OpenAI-compatible chat-completions classifier
pub struct RemoteClassifier {
    client: Client,
    api_key: String,
    url: String,
    model: String,
    temperature: f32,
}

impl RemoteClassifier {
    /// Build a classifier; fails with `NotConfigured` when no credential is set
    pub fn new(config: &EmotionConfig) -> Result<Self, RemoteError> {
        let api_key = config.api_key.clone().ok_or(RemoteError::NotConfigured)?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key,
            url: config.completions_url(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn request_body(&self, text: &str) -> Value {
        json!({
            "model": self.model,
            "temperature": self.temperature,
            "response_format": { "type": "json_object" },
            "messages": [{ "role": "user", "content": build_prompt(text) }],
        })
    }
}

impl EmotionClassifier for RemoteClassifier {
    fn classify(&self, text: &str) -> Result<EmotionResult, RemoteError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(text))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let payload: Value = response.json()?;
        let content = extract_content(&payload).ok_or(RemoteError::EmptyResponse)?;
        parse_emotion_json(content)
    }
}

/// Instruction prompt embedding the journal text
pub fn build_prompt(text: &str) -> String {
    format!(
        "You are an empathetic mental health co-pilot. \
         Given the reflection below, classify the dominant and secondary emotions, \
         estimate stress level (low, medium, high), and propose one human-first coping \
         recommendation. Respond strictly as JSON with keys: primary_emotion (string), \
         confidence (0-1 float), supporting_emotions (array of strings), stress_level (string), \
         summary (string), recommendation (string). Reflection:\n\n{}",
        text.trim()
    )
}

/// Pull the assistant message text out of a chat-completions reply
pub fn extract_content(payload: &Value) -> Option<&str> {
    let choice = payload.get("choices")?.get(0)?;
    choice
        .get("message")
        .and_then(|m| m.get("content"))
        .or_else(|| choice.get("text"))
        .and_then(|c| c.as_str())
        .map(str::trim)
        .filter(|c| !c.is_empty())
}

/// Parse the model's JSON object into an [`EmotionResult`].
///
/// Missing keys take documented defaults. Stress labels match case-insensitively.
/// Keys present with the wrong type, or an unknown stress label, make the
/// whole reply malformed.
pub fn parse_emotion_json(content: &str) -> Result<EmotionResult, RemoteError> {
    let payload: RemotePayload = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| RemoteError::Malformed(e.to_string()))?;

    let primary = payload
        .primary_emotion
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PRIMARY.to_string());

    let confidence = payload.confidence.unwrap_or(DEFAULT_CONFIDENCE);
    if !confidence.is_finite() {
        return Err(RemoteError::Malformed("confidence is not finite".to_string()));
    }

    let mut supporting: Vec<String> = Vec::new();
    for label in payload.supporting_emotions.unwrap_or_default() {
        let label = label.trim().to_string();
        if label.is_empty()
            || label.eq_ignore_ascii_case(&primary)
            || supporting.iter().any(|s| s.eq_ignore_ascii_case(&label))
        {
            continue;
        }
        supporting.push(label);
    }

    let stress_level = match payload.stress_level {
        None => StressLevel::Low,
        Some(label) => StressLevel::from_label(&label).ok_or_else(|| {
            RemoteError::Malformed(format!("unknown stress_level {:?}", label))
        })?,
    };

    Ok(EmotionResult {
        primary_emotion: primary,
        confidence: round2(confidence.clamp(0.0, 1.0)),
        supporting_emotions: supporting,
        stress_level,
        summary: payload.summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
        recommendation: payload
            .recommendation
            .unwrap_or_else(|| DEFAULT_RECOMMENDATION.to_string()),
        source: EmotionSource::Remote,
    })
}

/// Models occasionally wrap JSON in a markdown fence
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}
