//! Adzuna job search client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::AdzunaConfig;
use crate::jobs::http::send_with_retry;
use crate::jobs::{FetchError, JobRecord, JobSource};

#[derive(Debug, Deserialize)]
struct AdzunaSearchResponse {
    #[serde(default)]
    results: Vec<AdzunaJob>,
}

#[derive(Debug, Deserialize)]
struct AdzunaJob {
    #[serde(default)]
    title: String,
    company: Option<AdzunaDisplayName>,
    location: Option<AdzunaDisplayName>,
    redirect_url: Option<String>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct AdzunaDisplayName {
    display_name: Option<String>,
}

impl From<AdzunaJob> for JobRecord {
    fn from(job: AdzunaJob) -> Self {
        JobRecord {
            title: job.title,
            company: job.company.and_then(|c| c.display_name),
            location: job.location.and_then(|l| l.display_name),
            url: job.redirect_url,
            description: job.description,
        }
    }
}

#[derive(Clone)]
pub struct AdzunaClient {
    client: Client,
    config: AdzunaConfig,
}

impl AdzunaClient {
    pub fn new(client: Client, config: AdzunaConfig) -> Self {
        Self { client, config }
    }

    fn search_url(&self) -> String {
        format!(
            "{}/jobs/{}/search/1",
            self.config.base_url.trim_end_matches('/'),
            self.config.country
        )
    }
}

#[async_trait]
impl JobSource for AdzunaClient {
    async fn search(
        &self,
        keyword: &str,
        location: Option<&str>,
    ) -> Result<Vec<JobRecord>, FetchError> {
        let url = self.search_url();
        let results_per_page = self.config.results_per_page.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("app_id", self.config.app_id.as_str()),
            ("app_key", self.config.app_key.as_str()),
            ("what", keyword),
            ("results_per_page", results_per_page.as_str()),
            ("content-type", "application/json"),
        ];
        if let Some(location) = location.filter(|l| !l.trim().is_empty()) {
            params.push(("where", location));
        }

        debug!("Adzuna search: what={keyword:?} where={location:?}");
        let response =
            send_with_retry("Adzuna", || self.client.get(&url).query(&params)).await?;
        let body: AdzunaSearchResponse = response.json().await?;

        info!("Adzuna returned {} jobs", body.results.len());
        Ok(body.results.into_iter().map(JobRecord::from).collect())
    }
}
