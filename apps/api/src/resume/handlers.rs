//! Axum route handlers for résumé scoring.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::upload::{extract_upload, ResumeForm};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub ats_score: u32,
    pub suggestions: String,
    /// Job-description keywords absent from the résumé.
    pub missing_keywords: Vec<String>,
}

/// POST /upload_resume
///
/// Multipart: `resume` file + `job_description` text. Scores the résumé
/// against the job description.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let form = ResumeForm::from_multipart(multipart).await?;

    let upload = form
        .resume
        .ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;
    let job_description = form
        .job_description
        .ok_or_else(|| AppError::Validation("Job description not provided".to_string()))?;

    let resume_text = extract_upload(
        state.extractor.clone(),
        state.config.upload_dir.clone(),
        upload,
    )
    .await?;

    let ats_score = state.scorer.score(&resume_text, &job_description);
    let missing_keywords = state.scorer.missing_keywords(&resume_text, &job_description);
    info!(
        "Scored resume: ats_score={ats_score} missing_keywords={}",
        missing_keywords.len()
    );

    Ok(Json(UploadResumeResponse {
        ats_score,
        suggestions: state.scorer.suggestion(ats_score).to_string(),
        missing_keywords,
    }))
}
