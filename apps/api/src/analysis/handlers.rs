//! Axum route handlers for the Analysis JSON API.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::analysis::form::{validate_request, AnalysisForm};
use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::analysis::service::analyze_resume;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/analyze
///
/// Multipart upload: `resume` (PDF or DOCX) and `job_description` (text).
/// Model failures come back as the fixed fallback results with 200.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let request = AnalysisForm::from_multipart(multipart)
        .await?
        .into_request()
        .await?;

    Ok(Json(analyze_resume(state.llm.as_ref(), &request).await))
}

/// POST /api/v1/analyze/text
///
/// Same as the upload endpoint for callers that already have the resume text.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    validate_request(&request)?;

    Ok(Json(analyze_resume(state.llm.as_ref(), &request).await))
}
