//! External search collaborators: job postings (Adzuna) and supplementary job
//! links (Google Custom Search). Both sit behind traits so the matcher and the
//! handlers never depend on a concrete HTTP backend.
//!
//! `AppState` holds `Arc<dyn JobSource>` and `Arc<dyn LinkSource>`.

pub mod adzuna;
pub mod google;
pub mod handlers;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use adzuna::AdzunaClient;
pub use google::GoogleSearchClient;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for FetchError {
    /// Request URLs carry API keys as query parameters; they never leave here.
    fn from(e: reqwest::Error) -> Self {
        FetchError::Http(e.without_url())
    }
}

/// A job posting as returned by the job-search collaborator. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "job_title")]
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "job_url")]
    pub url: Option<String>,
    pub description: String,
}

/// A supplementary web result for a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub title: Option<String>,
    pub url: String,
    pub snippet: String,
}

#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search(
        &self,
        keyword: &str,
        location: Option<&str>,
    ) -> Result<Vec<JobRecord>, FetchError>;
}

#[async_trait]
pub trait LinkSource: Send + Sync {
    async fn search(
        &self,
        title: &str,
        location: Option<&str>,
    ) -> Result<Vec<LinkRecord>, FetchError>;
}
