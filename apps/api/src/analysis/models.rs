use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The four keys every analysis result carries, in display order of the JSON object.
pub const REQUIRED_KEYS: [&str; 4] = ["strengths", "weaknesses", "suggestions", "assessment"];

/// Prefix of the `strengths` text in a transport-error result. The underlying
/// error description is appended verbatim.
// Known wart: diagnostic text ends up in a content field.
pub const TRANSPORT_ERROR_PREFIX: &str = "Error during analysis: ";

/// One user submission. Both fields are validated as non-empty by the handlers.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// The fixed-shape analysis handed to the presentation layer.
///
/// The four named fields are always present as strings. Any other key the model
/// returned (e.g. `Match Percentage`) is kept untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub strengths: String,
    pub weaknesses: String,
    pub suggestions: String,
    pub assessment: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    pub fn new(
        strengths: impl Into<String>,
        weaknesses: impl Into<String>,
        suggestions: impl Into<String>,
        assessment: impl Into<String>,
    ) -> Self {
        Self {
            strengths: strengths.into(),
            weaknesses: weaknesses.into(),
            suggestions: suggestions.into(),
            assessment: assessment.into(),
            extra: Map::new(),
        }
    }

    /// Returned when the model replied but the reply could not be turned into
    /// a complete JSON object.
    pub fn parse_error() -> Self {
        Self::new(
            "Error: Could not parse the analysis results. Please try again.",
            "The system encountered an error while processing your resume.",
            "Please ensure your resume and job description are properly formatted and try again.",
            "Unable to complete the analysis at this time.",
        )
    }

    /// Returned when the remote call itself failed.
    pub fn transport_error(description: &str) -> Self {
        Self::new(
            format!("{TRANSPORT_ERROR_PREFIX}{description}"),
            "The system encountered an error while processing your request.",
            "Please try again or contact support if the issue persists.",
            "Analysis could not be completed due to a system error.",
        )
    }

    /// The match score as text, if the model supplied one.
    /// Tolerates the common spellings (`Match Percentage`, `match_percentage`, ...).
    pub fn match_percentage(&self) -> Option<String> {
        self.extra
            .iter()
            .find(|(key, _)| is_match_percentage_key(key))
            .map(|(_, value)| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .filter(|s| !s.trim().is_empty())
    }
}

fn is_match_percentage_key(key: &str) -> bool {
    let folded: String = key
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    folded == "matchpercentage"
}
