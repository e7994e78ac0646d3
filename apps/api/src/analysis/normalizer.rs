//! Normalizes raw model replies into a fixed-shape `AnalysisResult`.
//!
//! The model is told to emit a bare JSON object but does not always comply, so
//! the reply goes through a fallback ladder:
//!
//! 1. strip ```` ```json ```` / ```` ``` ```` fence markers and trim
//! 2. cut the span from the first `{` to the last `}` (drops surrounding prose)
//! 3. parse the span as a JSON object
//! 4. require `strengths`, `weaknesses`, `suggestions`, `assessment`
//! 5. stringify any required value that is not already a string
//!
//! `normalize_reply` is the strict stage and reports why a reply was rejected.
//! The analysis boundary (`analysis::service`) turns every rejection into the
//! parse-error result, so callers never see an error from this module.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::analysis::models::{AnalysisResult, REQUIRED_KEYS};

const JSON_FENCE_OPEN: &str = "```json";
const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The candidate span is not a JSON object.
    #[error("reply is not a valid JSON object: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("missing required keys in analysis: {0:?}")]
    MissingKeys(Vec<&'static str>),
}

/// Strict stage: returns the result or the reason the reply was rejected.
pub fn normalize_reply(raw: &str) -> Result<AnalysisResult, NormalizeError> {
    let cleaned = strip_code_fences(raw);
    let candidate = extract_json_span(&cleaned);

    let mut object: Map<String, Value> = serde_json::from_str(candidate)?;

    let missing: Vec<&'static str> = REQUIRED_KEYS
        .into_iter()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(NormalizeError::MissingKeys(missing));
    }

    let mut take = |key: &str| object.remove(key).map(coerce_to_string).unwrap_or_default();
    let strengths = take("strengths");
    let weaknesses = take("weaknesses");
    let suggestions = take("suggestions");
    let assessment = take("assessment");

    Ok(AnalysisResult {
        strengths,
        weaknesses,
        suggestions,
        assessment,
        extra: object,
    })
}

/// Removes every fence marker, wherever it appears, then trims.
fn strip_code_fences(text: &str) -> String {
    text.replace(JSON_FENCE_OPEN, "")
        .replace(FENCE, "")
        .trim()
        .to_string()
}

/// First `{` through last `}`; the whole text when there is no such pair.
fn extract_json_span(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

fn coerce_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
