//! Job Match Orchestrator.
//!
//! Pipeline: job description → top keywords → job search → per-job scoring
//! (description, title, missing keywords, optional résumé) → link enrichment.
//! Only the link-enrichment step may fail per job without failing the request.

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ats::scorer::{missing_keywords, overlap_score};
use crate::ats::AtsScorer;
use crate::jobs::{FetchError, JobSource, LinkRecord, LinkSource};

/// Inputs for one matching request.
#[derive(Debug, Clone, Copy)]
pub struct MatchRequest<'a> {
    pub job_description: &'a str,
    pub resume_text: Option<&'a str>,
    pub location: Option<&'a str>,
}

/// A supplementary link with its snippet scored against the job description.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredLink {
    #[serde(flatten)]
    pub link: LinkRecord,
    pub ats_score: u32,
}

/// Per-job aggregate, built fresh per request.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub job_title: String,
    #[serde(rename = "title_ats_score")]
    pub title_score: u32,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_url: Option<String>,
    #[serde(rename = "user_job_description_ats_score")]
    pub description_score: u32,
    #[serde(rename = "missing_keywords_in_user_job_description")]
    pub missing_keywords: Vec<String>,
    #[serde(rename = "resume_job_ats_score", skip_serializing_if = "Option::is_none")]
    pub resume_score: Option<u32>,
    #[serde(rename = "missing_keywords_in_resume", skip_serializing_if = "Option::is_none")]
    pub resume_missing_keywords: Option<Vec<String>>,
    pub extra_links: Vec<ScoredLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub query_used: String,
    pub matched_jobs: Vec<MatchResult>,
}

/// Runs the full matching pipeline. Fails only when the job search fails.
pub async fn match_jobs(
    scorer: &AtsScorer,
    job_source: &dyn JobSource,
    link_source: &dyn LinkSource,
    request: MatchRequest<'_>,
) -> Result<MatchOutcome, FetchError> {
    let normalizer = scorer.normalizer();
    let query = normalizer
        .top_keywords(
            request.job_description,
            normalizer.config().query_keyword_count,
        )
        .join(" ");
    info!("Job search query: {query:?}");

    if query.is_empty() {
        info!("Job description has no keywords; skipping job search");
        return Ok(MatchOutcome {
            query_used: query,
            matched_jobs: Vec::new(),
        });
    }

    let jobs = job_source.search(&query, request.location).await?;
    debug!("Fetched {} jobs", jobs.len());

    let jd_tokens = normalizer.normalize(request.job_description);
    let resume_tokens = request.resume_text.map(|text| normalizer.normalize(text));

    // Fan out link lookups; join_all keeps input order.
    let link_results = join_all(
        jobs.iter()
            .map(|job| link_source.search(&job.title, job.location.as_deref())),
    )
    .await;

    let matched_jobs = jobs
        .into_iter()
        .zip(link_results)
        .map(|(job, links)| {
            let links = links.unwrap_or_else(|e| {
                warn!("Link search failed for job {:?}: {e}", job.title);
                Vec::new()
            });
            let job_tokens = normalizer.normalize(&job.description);

            let (resume_score, resume_missing_keywords) = match &resume_tokens {
                Some(resume_tokens) => (
                    Some(overlap_score(resume_tokens, &job_tokens)),
                    Some(missing_keywords(resume_tokens, &job_tokens)),
                ),
                None => (None, None),
            };

            let extra_links = links
                .into_iter()
                .map(|link| ScoredLink {
                    ats_score: scorer.score(request.job_description, &link.snippet),
                    link,
                })
                .collect();

            MatchResult {
                title_score: scorer.score(request.job_description, &job.title),
                description_score: overlap_score(&jd_tokens, &job_tokens),
                missing_keywords: missing_keywords(&jd_tokens, &job_tokens),
                resume_score,
                resume_missing_keywords,
                extra_links,
                job_title: job.title,
                company: job.company,
                location: job.location,
                job_url: job.url,
            }
        })
        .collect();

    Ok(MatchOutcome {
        query_used: query,
        matched_jobs,
    })
}
