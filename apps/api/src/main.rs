mod ats;
mod auth;
mod config;
mod db;
mod errors;
mod jobs;
mod matching;
mod models;
mod resume;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ats::AtsScorer;
use crate::auth::store::PgUserStore;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::jobs::{http::build_client, AdzunaClient, GoogleSearchClient};
use crate::resume::extractor::FileTextExtractor;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL user store
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    // Upload staging area
    std::fs::create_dir_all(&config.upload_dir).with_context(|| {
        format!(
            "Failed to create upload directory {}",
            config.upload_dir.display()
        )
    })?;

    // Initialize search collaborators (one shared HTTP client, bounded by timeout)
    let http = build_client(config.upstream_timeout_secs)?;
    let job_source = Arc::new(AdzunaClient::new(http.clone(), config.adzuna.clone()));
    let link_source = Arc::new(GoogleSearchClient::new(http, config.google.clone()));
    info!(
        "Search clients initialized (adzuna country: {}, timeout: {}s)",
        config.adzuna.country, config.upstream_timeout_secs
    );

    // Scoring configuration is immutable from here on
    let ats_config = Arc::new(config.ats_config());
    info!(
        "ATS scorer: {} stopwords, query uses top {} keywords",
        ats_config.stopwords.len(),
        ats_config.query_keyword_count
    );
    let scorer = Arc::new(AtsScorer::new(ats_config));

    // Build app state
    let state = AppState {
        config: config.clone(),
        scorer,
        users: Arc::new(PgUserStore::new(db)),
        job_source,
        link_source,
        extractor: Arc::new(FileTextExtractor),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
