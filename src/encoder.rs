//! Report encoding
//!
//! Wraps engine outputs in a JSON envelope carrying producer metadata and the
//! computation time, so serialized results can be traced back to the instance
//! that produced them.

use crate::error::MindGuardError;
use crate::trend::TrendSummary;
use crate::types::{EmotionResult, RiskAssessment, StoredEntry};
use crate::{MINDGUARD_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current report envelope version
pub const REPORT_VERSION: &str = "1.0.0";

/// Producer metadata embedded in every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// One stored entry together with its assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessedEntry {
    pub entry: StoredEntry,
    pub assessment: RiskAssessment,
}

/// Report payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum ReportBody {
    Risk(RiskAssessment),
    Emotion(EmotionResult),
    History {
        entries: Vec<AssessedEntry>,
        trend: Option<TrendSummary>,
    },
}

/// Top-level report envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    #[serde(flatten)]
    pub body: ReportBody,
}

/// Encoder producing report envelopes
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn encode(&self, body: ReportBody) -> Report {
        Report {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: MINDGUARD_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            body,
        }
    }

    /// Encode to compact JSON
    pub fn encode_to_json(&self, body: ReportBody) -> Result<String, MindGuardError> {
        serde_json::to_string(&self.encode(body)).map_err(MindGuardError::JsonError)
    }

    /// Encode to pretty-printed JSON
    pub fn encode_to_json_pretty(&self, body: ReportBody) -> Result<String, MindGuardError> {
        serde_json::to_string_pretty(&self.encode(body)).map_err(MindGuardError::JsonError)
    }
}
