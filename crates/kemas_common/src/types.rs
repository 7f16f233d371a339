//! Core types for the normalization service.
//!
//! `NormalizationResult` is the stable shape the daemon hands back to
//! callers regardless of how messy the upstream payload was. Every field
//! degrades independently to its empty/absent default; extraction never
//! fails the request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One reported edit in the normalization summary.
///
/// `category` is an open tag ("slang", "short_form", "spelling", ...),
/// not an enum - the upstream model invents tags freely. Fields default
/// so a partially-filled change record still decodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizationChange {
    #[serde(default)]
    pub original_word: String,
    #[serde(default)]
    pub normalized_word: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub reason: String,
}

/// Count and percentage for one informal-feature category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureStat {
    #[serde(default)]
    pub count: u64,
    /// Percentage of total words, in [0, 100].
    #[serde(default)]
    pub percentage: f64,
}

/// Per-category breakdown of informal-language features in the input.
///
/// All fields default so a partially-populated upstream object still
/// decodes; a structurally alien value degrades to absent upstream of
/// this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InformalFeatureBreakdown {
    #[serde(default)]
    pub slang: FeatureStat,
    #[serde(default)]
    pub short_forms: FeatureStat,
    #[serde(default)]
    pub contractions: FeatureStat,
    #[serde(default)]
    pub english_usage: FeatureStat,
    #[serde(default)]
    pub typos_spelling: FeatureStat,
    #[serde(default)]
    pub total_words: u64,
    #[serde(default)]
    pub total_informal_count: u64,
    #[serde(default)]
    pub total_informal_percentage: f64,
}

/// Stable output of response extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NormalizationResult {
    /// Empty string when the upstream column was absent or unreadable.
    pub normalized_text: String,
    /// Upstream emission order preserved, no de-duplication.
    pub normalization_summary: Vec<NormalizationChange>,
    pub informal_features: Option<InformalFeatureBreakdown>,
    pub row_id: Option<String>,
}

// ============================================================================
// Caller-facing HTTP wire types (camelCase contract)
// ============================================================================

/// Body of `POST /v1/normalize`.
///
/// `input_text` is optional at the serde level so a missing field maps to
/// the validation error instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeRequest {
    #[serde(default)]
    pub input_text: Option<String>,
}

/// Successful response of `POST /v1/normalize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeResponse {
    pub success: bool,
    pub normalized_text: String,
    pub normalization_summary: Vec<NormalizationChange>,
    pub informal_features_percentage: Option<InformalFeatureBreakdown>,
    pub row_id: Option<String>,
    pub debug: DebugEcho,
}

/// Diagnostic echo of the raw upstream payload, returned to the caller
/// for traceability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugEcho {
    pub has_rows: bool,
    pub row_count: usize,
    pub first_row: Option<Value>,
    pub full_response: Value,
}

impl DebugEcho {
    pub fn from_payload(payload: &Value) -> Self {
        let rows = payload.get("rows").and_then(|r| r.as_array());
        Self {
            has_rows: rows.is_some(),
            row_count: rows.map(|r| r.len()).unwrap_or(0),
            first_row: rows.and_then(|r| r.first()).cloned(),
            full_response: payload.clone(),
        }
    }
}

/// Error body returned for every non-success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Response of `GET /v1/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
