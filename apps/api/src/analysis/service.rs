//! Analysis boundary: prompt → model → normalizer, with every failure folded
//! into one of the two uniform fallback results.

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::analysis::normalizer::{normalize_reply, NormalizeError};
use crate::analysis::prompts::build_analysis_prompt;
use crate::llm_client::prompts::ANALYZER_JSON_SYSTEM;
use crate::llm_client::{ChatCompletion, LlmError, SamplingConfig, MODEL};

/// Why an analysis fell back to a fixed result.
#[derive(Debug, Error)]
pub enum AnalysisFailure {
    /// The model answered but the answer was unusable.
    #[error("could not parse model reply: {0}")]
    Parse(#[from] NormalizeError),

    /// The model could not be reached or refused the request.
    #[error("model call failed: {0}")]
    Transport(#[from] LlmError),
}

impl AnalysisFailure {
    /// The user-facing result for this failure category.
    pub fn into_result(self) -> AnalysisResult {
        match self {
            AnalysisFailure::Parse(_) => AnalysisResult::parse_error(),
            AnalysisFailure::Transport(e) => AnalysisResult::transport_error(&e.to_string()),
        }
    }
}

/// Strict pipeline: returns the normalized result or the tagged failure.
pub async fn run_analysis(
    llm: &dyn ChatCompletion,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AnalysisFailure> {
    let prompt = build_analysis_prompt(&request.resume_text, &request.job_description);

    let reply = llm
        .send_chat_completion(MODEL, ANALYZER_JSON_SYSTEM, &prompt, SamplingConfig::ANALYSIS)
        .await?;

    normalize_reply(&reply).map_err(|e| {
        warn!(error = %e, raw_reply = %reply, "Model reply rejected by normalizer");
        AnalysisFailure::Parse(e)
    })
}

/// Runs one analysis. Never fails: parse and transport failures become their
/// fixed four-field results so the caller can render every outcome the same way.
pub async fn analyze_resume(llm: &dyn ChatCompletion, request: &AnalysisRequest) -> AnalysisResult {
    let analysis_id = Uuid::new_v4();
    info!(
        %analysis_id,
        resume_chars = request.resume_text.chars().count(),
        job_description_chars = request.job_description.chars().count(),
        "Running resume analysis"
    );

    match run_analysis(llm, request).await {
        Ok(result) => result,
        Err(failure) => {
            match &failure {
                AnalysisFailure::Transport(e) => error!(%analysis_id, "API error: {e}"),
                AnalysisFailure::Parse(_) => warn!(%analysis_id, "Falling back to parse-error result"),
            }
            failure.into_result()
        }
    }
}
