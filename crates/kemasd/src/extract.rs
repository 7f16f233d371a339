//! Response extraction for the generative-table payload.
//!
//! The upstream service returns each output column in one of four shapes
//! depending on its current response format: a chat-completion envelope,
//! an object with a `text` field, a bare string, or an object with a
//! `value` field. Structured columns additionally arrive as JSON text
//! that may be wrapped in markdown code fences.
//!
//! Extraction is pure and infallible: every column degrades to its
//! empty/absent default on any mismatch, with a warn for malformed JSON
//! so the raw text survives for diagnosis. A bad column never fails the
//! request.

use kemas_common::{InformalFeatureBreakdown, NormalizationChange, NormalizationResult};
use serde_json::Value;
use tracing::{debug, warn};

/// Output column holding the normalized sentence.
pub const COL_NORMALIZED_TEXT: &str = "normalized_text";
/// Output column holding the per-word change list (JSON text).
pub const COL_NORMALIZATION_SUMMARY: &str = "normalization_summary";
/// Output column holding the feature breakdown (JSON text).
pub const COL_INFORMAL_FEATURES: &str = "informal_features_percentage";

/// The four observed shapes a column value can take.
///
/// `decode` resolves them in priority order; an envelope with an empty
/// candidate list or a non-string message body falls through to the next
/// shape rather than short-circuiting.
#[derive(Debug, Clone, PartialEq)]
pub enum RawGenerationValue {
    /// Chat-completion envelope: `choices[0].message.content`.
    Completion(String),
    /// Object with a string `text` field.
    TextField(String),
    /// The column value itself is a string.
    Bare(String),
    /// Object with a string `value` field.
    ValueField(String),
}

impl RawGenerationValue {
    pub fn decode(column: &Value) -> Option<Self> {
        if let Some(content) = column
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|x| x.as_str())
        {
            return Some(Self::Completion(content.to_string()));
        }
        if let Some(text) = column.get("text").and_then(|x| x.as_str()) {
            return Some(Self::TextField(text.to_string()));
        }
        if let Some(s) = column.as_str() {
            return Some(Self::Bare(s.to_string()));
        }
        column
            .get("value")
            .and_then(|x| x.as_str())
            .map(|s| Self::ValueField(s.to_string()))
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Completion(text) | Self::TextField(text) | Self::Bare(text) | Self::ValueField(text) => text,
        }
    }
}

/// Strip markdown code fences (``` or ```json) and surrounding whitespace.
pub fn strip_code_fence(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Resolve one column of the first row to its text, if any.
fn column_text(row: &Value, column: &str) -> Option<String> {
    row.get("columns")
        .and_then(|c| c.get(column))
        .and_then(RawGenerationValue::decode)
        .map(RawGenerationValue::into_text)
}

/// Fence-strip and parse a structured column. Parse failure is recovered
/// locally: warn with the raw text, return None.
fn parse_structured(column: &str, text: &str) -> Option<Value> {
    let clean = strip_code_fence(text);
    match serde_json::from_str(&clean) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Failed to parse {} as JSON: {} - raw text: {}", column, e, text);
            None
        }
    }
}

/// The upstream sometimes wraps the breakdown object in a one-element
/// array. Known format quirk: take element zero when a sequence shows up.
fn unwrap_singleton(v: Value) -> Option<Value> {
    match v {
        Value::Array(mut items) => {
            if items.is_empty() {
                None
            } else {
                Some(items.swap_remove(0))
            }
        }
        other => Some(other),
    }
}

/// Turn the raw row-insertion payload into a `NormalizationResult`.
///
/// Never fails: a missing row, missing column, unexpected shape, or
/// malformed embedded JSON each degrade that one field to its default.
pub fn extract_result(payload: &Value) -> NormalizationResult {
    debug!("raw gen-table payload: {}", payload);

    let row = payload.get("rows").and_then(|r| r.get(0));

    let normalized_text = row
        .and_then(|r| column_text(r, COL_NORMALIZED_TEXT))
        .unwrap_or_default();

    let normalization_summary = row
        .and_then(|r| column_text(r, COL_NORMALIZATION_SUMMARY))
        .and_then(|text| parse_structured(COL_NORMALIZATION_SUMMARY, &text))
        .and_then(|v| match serde_json::from_value::<Vec<NormalizationChange>>(v.clone()) {
            Ok(changes) => Some(changes),
            Err(e) => {
                warn!("Unexpected {} structure: {} - value: {}", COL_NORMALIZATION_SUMMARY, e, v);
                None
            }
        })
        .unwrap_or_default();

    let informal_features = row
        .and_then(|r| column_text(r, COL_INFORMAL_FEATURES))
        .and_then(|text| parse_structured(COL_INFORMAL_FEATURES, &text))
        .and_then(unwrap_singleton)
        .and_then(|v| match serde_json::from_value::<InformalFeatureBreakdown>(v.clone()) {
            Ok(breakdown) => Some(breakdown),
            Err(e) => {
                warn!("Unexpected {} structure: {} - value: {}", COL_INFORMAL_FEATURES, e, v);
                None
            }
        });

    let row_id = row
        .and_then(|r| r.get("ID"))
        .or_else(|| payload.get("ID"))
        .and_then(|x| x.as_str())
        .map(|s| s.to_string());

    NormalizationResult {
        normalized_text,
        normalization_summary,
        informal_features,
        row_id,
    }
}
