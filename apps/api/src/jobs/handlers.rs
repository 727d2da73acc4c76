//! Axum route handlers that expose the search collaborators directly.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::{JobRecord, LinkRecord};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobSearchQuery {
    pub keyword: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Deserialize)]
pub struct JobLinksQuery {
    pub title: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobLinksResponse {
    pub links: Vec<LinkRecord>,
}

/// GET /job_search?keyword=&location=
pub async fn handle_job_search(
    State(state): State<AppState>,
    Query(params): Query<JobSearchQuery>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let keyword = required(params.keyword, "Keyword parameter required")?;

    let jobs = state
        .job_source
        .search(&keyword, params.location.as_deref())
        .await?;

    Ok(Json(JobSearchResponse { jobs }))
}

/// GET /job_links?title=&location=
pub async fn handle_job_links(
    State(state): State<AppState>,
    Query(params): Query<JobLinksQuery>,
) -> Result<Json<JobLinksResponse>, AppError> {
    let title = required(params.title, "Title parameter required")?;

    let links = state
        .link_source
        .search(&title, params.location.as_deref())
        .await?;

    Ok(Json(JobLinksResponse { links }))
}

fn required(value: Option<String>, message: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(message.to_string()))
}
