//! Scoring oracle: pluggable, trait-based scorer for a profile against the catalog.
//!
//! `LlmMatchOracle` asks the model; `FallbackScorer` is the second
//! implementation. `ScoringChain` puts them in order and never fails.
//!
//! `AppState` holds an `Arc<ScoringChain>` built at startup.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::matching::fallback::FallbackScorer;
use crate::matching::prompts::{match_output_schema, MATCH_SYSTEM};
use crate::matching::request::{build_match_prompt, parse_oracle_reply};
use crate::matching::MatchCandidate;
use crate::models::profile::StudentProfile;
use crate::models::scholarship::Scholarship;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("oracle response was malformed: {0}")]
    Malformed(String),
}

/// The scoring trait. Implement this to swap backends without touching the
/// pipeline or handlers.
#[async_trait]
pub trait MatchOracle: Send + Sync {
    /// Short label reported to callers, e.g. "llm" or "fallback".
    fn backend(&self) -> &'static str;

    async fn score(
        &self,
        profile: &StudentProfile,
        catalog: &[Scholarship],
    ) -> Result<Vec<MatchCandidate>, OracleError>;
}

/// Scores the catalog with one model call.
pub struct LlmMatchOracle {
    llm: LlmClient,
}

impl LlmMatchOracle {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl MatchOracle for LlmMatchOracle {
    fn backend(&self) -> &'static str {
        "llm"
    }

    async fn score(
        &self,
        profile: &StudentProfile,
        catalog: &[Scholarship],
    ) -> Result<Vec<MatchCandidate>, OracleError> {
        let prompt = build_match_prompt(profile, catalog);
        let reply = self
            .llm
            .call_structured(&prompt, MATCH_SYSTEM, &match_output_schema())
            .await?;
        parse_oracle_reply(reply, catalog)
    }
}

/// Result of scoring, tagged with the backend that produced it.
#[derive(Debug, Clone)]
pub struct ScoredCatalog {
    pub candidates: Vec<MatchCandidate>,
    pub backend: &'static str,
}

/// Fallback chain: try the primary oracle (if configured), and on any failure
/// score with `FallbackScorer` instead. `score` never returns an error.
pub struct ScoringChain {
    primary: Option<Arc<dyn MatchOracle>>,
    fallback: FallbackScorer,
}

impl ScoringChain {
    pub fn new(primary: Option<Arc<dyn MatchOracle>>) -> Self {
        Self {
            primary,
            fallback: FallbackScorer,
        }
    }

    pub fn fallback_only() -> Self {
        Self::new(None)
    }

    pub async fn score(&self, profile: &StudentProfile, catalog: &[Scholarship]) -> ScoredCatalog {
        if catalog.is_empty() {
            return ScoredCatalog {
                candidates: vec![],
                backend: "none",
            };
        }

        if let Some(primary) = &self.primary {
            match primary.score(profile, catalog).await {
                Ok(candidates) => {
                    info!(
                        "Oracle '{}' scored {}/{} scholarships for profile {}",
                        primary.backend(),
                        candidates.len(),
                        catalog.len(),
                        profile.id
                    );
                    return ScoredCatalog {
                        candidates,
                        backend: primary.backend(),
                    };
                }
                Err(e) => {
                    warn!(
                        "Oracle '{}' failed for profile {}: {e}. Using fallback scores.",
                        primary.backend(),
                        profile.id
                    );
                }
            }
        }

        ScoredCatalog {
            candidates: self.fallback.score_catalog(profile, catalog),
            backend: self.fallback.backend(),
        }
    }
}
