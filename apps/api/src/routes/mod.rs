pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/signup", post(auth::handle_signup))
        .route("/login", post(auth::handle_login))
        // Scoring
        .route("/upload_resume", post(resume::handle_upload_resume))
        .route("/match_jobs_v2", post(matching::handle_match_jobs))
        // Search passthrough
        .route("/job_search", get(jobs::handle_job_search))
        .route("/job_links", get(jobs::handle_job_links))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
