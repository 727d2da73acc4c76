use std::sync::Arc;

use crate::ats::AtsScorer;
use crate::auth::store::UserStore;
use crate::config::Config;
use crate::jobs::{JobSource, LinkSource};
use crate::resume::extractor::SharedExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Keyword scorer built from the immutable `AtsConfig`.
    pub scorer: Arc<AtsScorer>,
    pub users: Arc<dyn UserStore>,
    /// Job postings backend. Default: Adzuna.
    pub job_source: Arc<dyn JobSource>,
    /// Supplementary link backend. Default: Google Custom Search.
    pub link_source: Arc<dyn LinkSource>,
    pub extractor: SharedExtractor,
}
