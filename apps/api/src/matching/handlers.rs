//! Axum route handlers for job matching.

use axum::extract::{Multipart, State};
use axum::Json;

use crate::errors::AppError;
use crate::matching::orchestrator::{match_jobs, MatchOutcome, MatchRequest};
use crate::resume::upload::{extract_upload, ResumeForm};
use crate::state::AppState;

/// POST /match_jobs_v2
///
/// Multipart: `job_description` (required), optional `resume` file, optional
/// `location`. Searches jobs using the description's top keywords and scores
/// each against the description (and résumé, when given).
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchOutcome>, AppError> {
    let form = ResumeForm::from_multipart(multipart).await?;

    let job_description = form
        .job_description
        .ok_or_else(|| AppError::Validation("Job description is required".to_string()))?;

    // An empty file part means "no résumé", not an error.
    let resume_text = match form.resume.filter(|r| !r.file_name.trim().is_empty()) {
        Some(upload) => Some(
            extract_upload(
                state.extractor.clone(),
                state.config.upload_dir.clone(),
                upload,
            )
            .await?,
        ),
        None => None,
    };

    let outcome = match_jobs(
        &state.scorer,
        state.job_source.as_ref(),
        state.link_source.as_ref(),
        MatchRequest {
            job_description: &job_description,
            resume_text: resume_text.as_deref(),
            location: form.location.as_deref(),
        },
    )
    .await?;

    Ok(Json(outcome))
}
