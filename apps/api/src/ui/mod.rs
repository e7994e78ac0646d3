//! Presentation layer: the HTML upload form and results page.

use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Response},
};
use tracing::warn;

use crate::analysis::form::AnalysisForm;
use crate::analysis::service::analyze_resume;
use crate::errors::AppError;
use crate::state::AppState;

pub mod templates;

use templates::{render_form_page, render_results_page};

/// GET /
pub async fn handle_index() -> Html<String> {
    Html(render_form_page(None, ""))
}

/// POST /analyze
///
/// Input problems re-render the form with a message; everything after input
/// validation renders a results page, including the fallback results.
pub async fn handle_analyze_form(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match AnalysisForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => return form_error(e, ""),
    };
    let job_description = form.job_description.clone();

    let request = match form.into_request().await {
        Ok(request) => request,
        Err(e) => return form_error(e, &job_description),
    };

    let result = analyze_resume(state.llm.as_ref(), &request).await;
    Html(render_results_page(&result)).into_response()
}

fn form_error(error: AppError, job_description: &str) -> Response {
    let message = match &error {
        AppError::Validation(msg) => msg.clone(),
        other => {
            warn!("Analysis form rejected: {other}");
            format!("An error occurred during analysis: {}", other.user_message())
        }
    };

    (
        error.status(),
        Html(render_form_page(Some(&message), job_description)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_index_serves_form() {
        let Html(body) = handle_index().await;
        assert!(body.contains("Analyze Resume"));
    }

    #[test]
    fn test_form_error_keeps_validation_message_verbatim() {
        let response = form_error(
            AppError::Validation("Please enter a job description.".into()),
            "",
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_form_error_for_unreadable_document() {
        let response = form_error(
            AppError::UnprocessableEntity("Unable to read the DOCX document: bad zip".into()),
            "Rust role",
        );
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
