//! Match generation: load profile and catalog, score, reduce, persist.
//!
//! Flow: get_profile → active_scholarships → ScoringChain::score →
//!       persist_candidates → GenerationOutcome.
//!
//! Oracle trouble never surfaces here; only persistence errors and an
//! unknown profile do.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::oracle::ScoringChain;
use crate::matching::reducer::persist_candidates;
use crate::models::scholarship_match::ScholarshipMatch;
use crate::store::ScholarshipStore;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    pub matches: Vec<ScholarshipMatch>,
    pub scorer_backend: &'static str,
    pub candidates_scored: usize,
}

pub async fn generate_matches(
    store: &dyn ScholarshipStore,
    scorer: &ScoringChain,
    profile_id: Uuid,
) -> Result<GenerationOutcome, AppError> {
    let profile = store
        .get_profile(profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {profile_id} not found")))?;

    let catalog = store.active_scholarships().await?;
    let scored = scorer.score(&profile, &catalog).await;
    let matches = persist_candidates(store, profile.id, &scored.candidates).await?;

    info!(
        "Generated {} matches for profile {} ({} candidates via {})",
        matches.len(),
        profile.id,
        scored.candidates.len(),
        scored.backend
    );

    Ok(GenerationOutcome {
        matches,
        scorer_backend: scored.backend,
        candidates_scored: scored.candidates.len(),
    })
}
