//! Multipart upload form shared by the HTML page and the JSON API.

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::analysis::models::AnalysisRequest;
use crate::errors::AppError;
use crate::extraction::extract_text_async;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

pub const MISSING_RESUME: &str = "Please upload a resume file.";
pub const MISSING_JOB_DESCRIPTION: &str = "Please enter a job description.";

/// An uploaded resume file.
#[derive(Debug)]
pub struct UploadedResume {
    pub filename: String,
    pub data: Bytes,
}

/// Raw form fields before validation.
#[derive(Debug, Default)]
pub struct AnalysisForm {
    pub resume: Option<UploadedResume>,
    pub job_description: String,
}

impl AnalysisForm {
    /// Reads the `resume` and `job_description` fields; unknown fields are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = AnalysisForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(RESUME_FIELD) => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let data = field.bytes().await?;
                    // Browsers send an empty part when no file was chosen.
                    if !data.is_empty() {
                        form.resume = Some(UploadedResume { filename, data });
                    }
                }
                Some(JOB_DESCRIPTION_FIELD) => {
                    form.job_description = field.text().await?;
                }
                other => debug!(field = ?other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    /// Checks both inputs are present, then extracts the resume text.
    pub async fn into_request(self) -> Result<AnalysisRequest, AppError> {
        let resume = self
            .resume
            .ok_or_else(|| AppError::Validation(MISSING_RESUME.to_string()))?;
        if self.job_description.trim().is_empty() {
            return Err(AppError::Validation(MISSING_JOB_DESCRIPTION.to_string()));
        }

        let resume_text = extract_text_async(resume.filename, resume.data).await?;

        Ok(AnalysisRequest {
            resume_text,
            job_description: self.job_description,
        })
    }
}

/// Rejects a text request with an empty field, using the same copy as the form.
pub fn validate_request(request: &AnalysisRequest) -> Result<(), AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(MISSING_RESUME.to_string()));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(MISSING_JOB_DESCRIPTION.to_string()));
    }
    Ok(())
}
