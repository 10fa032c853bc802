use std::sync::Arc;

use crate::config::Config;
use crate::guidance::advisor::GuidanceAdvisor;
use crate::matching::oracle::ScoringChain;
use crate::store::ScholarshipStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ScholarshipStore>,
    /// Oracle first, fallback scorer second.
    pub scorer: Arc<ScoringChain>,
    pub advisor: Arc<GuidanceAdvisor>,
    pub config: Config,
}
