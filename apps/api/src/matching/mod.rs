// Match generation: prompt construction, oracle call, response validation,
// fallback scoring, and the threshold reducer that persists surviving candidates.
// Dashboard views over persisted matches live here too.

pub mod dashboard;
pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod oracle;
pub mod prompts;
pub mod reducer;
pub mod request;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An unpersisted score for one scholarship, before the threshold filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub scholarship_id: Uuid,
    /// 0 – 100
    pub match_score: u8,
    pub reasoning: String,
}
