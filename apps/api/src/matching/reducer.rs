//! Threshold reducer: keeps candidates scoring at least `MIN_MATCH_SCORE` and
//! persists them as `new` matches.

use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::MatchCandidate;
use crate::models::scholarship_match::{NewMatch, ScholarshipMatch};
use crate::store::ScholarshipStore;

pub const MIN_MATCH_SCORE: u8 = 30;

/// Writes each surviving candidate and returns the stored rows in candidate order.
///
/// Candidates below the threshold are skipped without touching any existing row
/// for the same pair.
pub async fn persist_candidates(
    store: &dyn ScholarshipStore,
    profile_id: Uuid,
    candidates: &[MatchCandidate],
) -> Result<Vec<ScholarshipMatch>, AppError> {
    let mut persisted = Vec::new();
    for candidate in candidates {
        if candidate.match_score < MIN_MATCH_SCORE {
            debug!(
                "Skipping scholarship {} (score {} < {MIN_MATCH_SCORE})",
                candidate.scholarship_id, candidate.match_score
            );
            continue;
        }
        let row = store
            .upsert_match(NewMatch {
                profile_id,
                scholarship_id: candidate.scholarship_id,
                match_score: i32::from(candidate.match_score),
                ai_reasoning: &candidate.reasoning,
            })
            .await?;
        persisted.push(row);
    }
    Ok(persisted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::request::tests::new_scholarship;
    use crate::models::scholarship_match::MatchStatus;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn test_only_candidates_at_or_above_threshold_persist() {
        let (store, catalog) = MemoryStore::with_catalog(vec![
            new_scholarship("A", &[]),
            new_scholarship("B", &[]),
            new_scholarship("C", &[]),
        ]);
        let profile_id = Uuid::new_v4();
        let candidates = vec![
            MatchCandidate {
                scholarship_id: catalog[0].id,
                match_score: 25,
                reasoning: "Weak".to_string(),
            },
            MatchCandidate {
                scholarship_id: catalog[1].id,
                match_score: 45,
                reasoning: "Decent overlap with field".to_string(),
            },
            MatchCandidate {
                scholarship_id: catalog[2].id,
                match_score: 30,
                reasoning: "Borderline".to_string(),
            },
        ];

        let persisted = persist_candidates(&store, profile_id, &candidates)
            .await
            .unwrap();

        assert_eq!(persisted.len(), 2);
        let b = &persisted[0];
        assert_eq!(b.scholarship_id, catalog[1].id);
        assert_eq!(b.profile_id, profile_id);
        assert_eq!(b.match_score, 45);
        assert_eq!(b.status, MatchStatus::New);
        assert_eq!(b.ai_reasoning.as_deref(), Some("Decent overlap with field"));
        assert_eq!(persisted[1].scholarship_id, catalog[2].id);
        assert!(store
            .match_rows()
            .iter()
            .all(|m| m.scholarship_id != catalog[0].id));
    }

    #[tokio::test]
    async fn test_low_rescore_leaves_existing_row_untouched() {
        let (store, catalog) = MemoryStore::with_catalog(vec![new_scholarship("A", &[])]);
        let profile_id = Uuid::new_v4();
        let first = MatchCandidate {
            scholarship_id: catalog[0].id,
            match_score: 80,
            reasoning: "Strong".to_string(),
        };
        persist_candidates(&store, profile_id, &[first]).await.unwrap();

        let rescore = MatchCandidate {
            scholarship_id: catalog[0].id,
            match_score: 10,
            reasoning: "Weak".to_string(),
        };
        let persisted = persist_candidates(&store, profile_id, &[rescore]).await.unwrap();

        assert!(persisted.is_empty());
        let rows = store.match_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].match_score, 80);
    }
}
