//! Shared fixtures for handler tests: fake collaborators and a ready `AppState`.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::ats::{AtsConfig, AtsScorer};
use crate::auth::store::memory::MemoryUserStore;
use crate::config::{AdzunaConfig, Config, GoogleConfig};
use crate::jobs::{FetchError, JobRecord, JobSource, LinkRecord, LinkSource};
use crate::resume::extractor::FileTextExtractor;
use crate::state::AppState;

/// Serves three fixed jobs regardless of query.
pub struct StaticJobs;

#[async_trait]
impl JobSource for StaticJobs {
    async fn search(&self, _: &str, _: Option<&str>) -> Result<Vec<JobRecord>, FetchError> {
        Ok(vec![
            job(1, "Backend Engineer", "Python Flask APIs on AWS"),
            job(2, "Data Engineer", "Python SQL Spark pipelines"),
            job(3, "Web Developer", "Flask and JavaScript frontends"),
        ])
    }
}

pub struct FailingJobs;

#[async_trait]
impl JobSource for FailingJobs {
    async fn search(&self, _: &str, _: Option<&str>) -> Result<Vec<JobRecord>, FetchError> {
        Err(FetchError::Api {
            status: 500,
            message: "job search down".to_string(),
        })
    }
}

/// One link per title; lookups for "Data Engineer" fail.
pub struct StaticLinks;

#[async_trait]
impl LinkSource for StaticLinks {
    async fn search(&self, title: &str, _: Option<&str>) -> Result<Vec<LinkRecord>, FetchError> {
        if title == "Data Engineer" {
            return Err(FetchError::Api {
                status: 503,
                message: "quota exceeded".to_string(),
            });
        }
        Ok(vec![LinkRecord {
            title: Some(title.to_string()),
            url: format!("https://links.example/{title}"),
            snippet: format!("{title} openings for Python developers"),
        }])
    }
}

fn job(id: u32, title: &str, description: &str) -> JobRecord {
    JobRecord {
        title: title.to_string(),
        company: Some("Acme".to_string()),
        location: Some("Pune".to_string()),
        url: Some(format!("https://jobs.example/{id}")),
        description: description.to_string(),
    }
}

/// Keeps the upload directory alive for the duration of a test.
pub struct TestBackends {
    pub upload_dir: TempDir,
}

pub fn test_config(upload_dir: PathBuf) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        adzuna: AdzunaConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            app_id: "test".to_string(),
            app_key: "test".to_string(),
            country: "in".to_string(),
            results_per_page: 10,
        },
        google: GoogleConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "test".to_string(),
            cx: "test".to_string(),
            results: 5,
        },
        upstream_timeout_secs: 1,
        upload_dir,
        max_upload_bytes: 1024 * 1024,
        query_keyword_count: 5,
        extra_stopwords: Vec::new(),
        port: 0,
        rust_log: "debug".to_string(),
    }
}

fn build_state(job_source: Arc<dyn JobSource>) -> (AppState, TestBackends) {
    let upload_dir = tempfile::tempdir().expect("create upload dir");
    let config = test_config(upload_dir.path().to_path_buf());
    state_with_config(job_source, config, upload_dir)
}

fn state_with_config(
    job_source: Arc<dyn JobSource>,
    config: Config,
    upload_dir: TempDir,
) -> (AppState, TestBackends) {
    let state = AppState {
        scorer: Arc::new(AtsScorer::new(Arc::new(AtsConfig::default()))),
        users: Arc::new(MemoryUserStore::default()),
        job_source,
        link_source: Arc::new(StaticLinks),
        extractor: Arc::new(FileTextExtractor),
        config,
    };
    (state, TestBackends { upload_dir })
}

pub fn test_state() -> (AppState, TestBackends) {
    build_state(Arc::new(StaticJobs))
}

pub fn test_state_with_failing_jobs() -> (AppState, TestBackends) {
    build_state(Arc::new(FailingJobs))
}

pub fn test_state_with_upload_limit(max_upload_bytes: usize) -> (AppState, TestBackends) {
    let upload_dir = tempfile::tempdir().expect("create upload dir");
    let mut config = test_config(upload_dir.path().to_path_buf());
    config.max_upload_bytes = max_upload_bytes;
    state_with_config(Arc::new(StaticJobs), config, upload_dir)
}
