//! Match request builder: renders the scoring prompt and turns the oracle's
//! reply into validated candidates.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::llm_client::prompts::or_not_provided;
use crate::matching::oracle::OracleError;
use crate::matching::prompts::{ANY, MATCH_PROMPT_TEMPLATE, NOT_SPECIFIED};
use crate::matching::MatchCandidate;
use crate::models::profile::StudentProfile;
use crate::models::scholarship::Scholarship;

/// Renders every profile attribute; blank optional fields become "Not provided".
pub fn render_profile(profile: &StudentProfile) -> String {
    [
        format!("- Education Level: {}", profile.education_level),
        format!("- Field of Study: {}", profile.field_of_study),
        format!("- GPA: {}", or_not_provided(profile.gpa.as_deref())),
        format!("- Graduation Year: {}", profile.graduation_year),
        format!("- Skills: {}", or_not_provided(profile.skills.as_deref())),
        format!(
            "- Activities: {}",
            or_not_provided(profile.activities.as_deref())
        ),
        format!("- Financial Need: {}", profile.financial_need),
        format!("- Location Preference: {}", profile.location),
    ]
    .join("\n")
}

/// Renders one catalog entry. Empty eligibility lists become "Any".
pub fn render_scholarship(scholarship: &Scholarship) -> String {
    [
        format!("ID: {}", scholarship.id),
        format!("Title: {}", scholarship.title),
        format!("Type: {}", scholarship.scholarship_type),
        format!("Requirements: {}", scholarship.requirements),
        format!("Eligible Fields: {}", scholarship.eligible_fields.join_or(ANY)),
        format!("Eligible Levels: {}", scholarship.eligible_levels.join_or(ANY)),
        format!(
            "Min GPA: {}",
            scholarship
                .eligibility_gpa
                .as_deref()
                .filter(|g| !g.trim().is_empty())
                .unwrap_or(NOT_SPECIFIED)
        ),
        format!("Tags: {}", scholarship.tags.join_or("")),
    ]
    .join("\n")
}

/// Builds the single scoring request for a profile and the whole catalog.
pub fn build_match_prompt(profile: &StudentProfile, catalog: &[Scholarship]) -> String {
    let catalog_block = catalog
        .iter()
        .map(render_scholarship)
        .collect::<Vec<_>>()
        .join("\n\n");

    MATCH_PROMPT_TEMPLATE
        .replace("{profile_block}", &render_profile(profile))
        .replace("{catalog_block}", &catalog_block)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OracleReply {
    Wrapped { matches: Vec<RawCandidate> },
    Bare(Vec<RawCandidate>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCandidate {
    scholarship_id: String,
    match_score: f64,
    reasoning: String,
}

/// Validates the oracle's structured reply against the catalog that was sent.
///
/// Entries naming an unknown scholarship or carrying a non-finite score are
/// dropped; duplicates keep the first entry; scores are rounded and clamped to
/// 0 to 100. Coverage is not enforced, so a partial list is accepted. A reply of
/// the wrong shape, or one with no usable entry for a non-empty catalog, is an error.
pub fn parse_oracle_reply(
    reply: Value,
    catalog: &[Scholarship],
) -> Result<Vec<MatchCandidate>, OracleError> {
    let raw = match serde_json::from_value::<OracleReply>(reply)
        .map_err(|e| OracleError::Malformed(e.to_string()))?
    {
        OracleReply::Wrapped { matches } => matches,
        OracleReply::Bare(matches) => matches,
    };

    let known: HashSet<Uuid> = catalog.iter().map(|s| s.id).collect();
    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut candidates = Vec::with_capacity(raw.len());

    for entry in raw {
        let Ok(scholarship_id) = Uuid::parse_str(entry.scholarship_id.trim()) else {
            warn!("Oracle returned unparseable scholarshipId {:?}", entry.scholarship_id);
            continue;
        };
        if !known.contains(&scholarship_id) {
            warn!("Oracle scored unknown scholarship {scholarship_id}; dropping");
            continue;
        }
        if !entry.match_score.is_finite() {
            warn!("Oracle returned non-finite score for {scholarship_id}; dropping");
            continue;
        }
        if !seen.insert(scholarship_id) {
            continue;
        }
        candidates.push(MatchCandidate {
            scholarship_id,
            match_score: entry.match_score.round().clamp(0.0, 100.0) as u8,
            reasoning: entry.reasoning,
        });
    }

    if candidates.is_empty() && !catalog.is_empty() {
        return Err(OracleError::Malformed(
            "no usable matches in response".to_string(),
        ));
    }

    Ok(candidates)
}
