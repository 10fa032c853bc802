//! Guidance generation with a cache in front and a generic fallback behind.
//!
//! Flow: get_guidance (hit → return) → load profile + scholarship →
//!       GuidanceAdvisor::advise → insert_guidance → return stored row.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::guidance::prompts::{
    guidance_output_schema, GENERIC_CHECKLIST, GENERIC_ESSAY_TIPS,
    GENERIC_IMPROVEMENT_SUGGESTIONS, GUIDANCE_PROMPT_TEMPLATE, GUIDANCE_SYSTEM,
};
use crate::llm_client::prompts::or_not_provided;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::guidance::{ApplicationGuidance, GuidanceContent};
use crate::models::profile::StudentProfile;
use crate::models::scholarship::Scholarship;
use crate::store::ScholarshipStore;

/// Raw oracle reply. A field that is missing or of the wrong type becomes
/// `None` on its own; gaps are filled generically.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub essay_tips: Option<String>,
    #[serde(default, deserialize_with = "lenient_checklist")]
    pub checklist: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub improvement_suggestions: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

/// Accepts a list of strings or a single string. A string holding a JSON array
/// is decoded; any other string is split into one item per line or `;`.
fn lenient_checklist<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Items(Vec<String>),
        Text(String),
        Other(Value),
    }

    Ok(match Option::<Wire>::deserialize(deserializer)? {
        Some(Wire::Items(items)) => Some(items),
        Some(Wire::Text(text)) => Some(split_checklist(&text)),
        Some(Wire::Other(_)) | None => None,
    })
}

fn split_checklist(text: &str) -> Vec<String> {
    if let Ok(items) = serde_json::from_str::<Vec<String>>(text) {
        return items;
    }
    let is_bullet = |c: char| c == '-' || c == '*' || c == '•';
    text.split(|c: char| c == '\n' || c == ';')
        .map(|item| item.trim().trim_start_matches(is_bullet).trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
pub trait GuidanceOracle: Send + Sync {
    async fn draft(
        &self,
        profile: &StudentProfile,
        scholarship: &Scholarship,
    ) -> Result<GuidanceDraft, LlmError>;
}

pub struct LlmGuidanceOracle {
    llm: LlmClient,
}

impl LlmGuidanceOracle {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl GuidanceOracle for LlmGuidanceOracle {
    async fn draft(
        &self,
        profile: &StudentProfile,
        scholarship: &Scholarship,
    ) -> Result<GuidanceDraft, LlmError> {
        let prompt = build_guidance_prompt(profile, scholarship);
        let reply = self
            .llm
            .call_structured(&prompt, GUIDANCE_SYSTEM, &guidance_output_schema())
            .await?;
        Ok(serde_json::from_value(reply)?)
    }
}

pub fn build_guidance_prompt(profile: &StudentProfile, scholarship: &Scholarship) -> String {
    let profile_block = format!(
        "- Name: {}\n- Education Level: {}\n- Field of Study: {}\n- GPA: {}\n- Skills: {}\n- Activities: {}\n- Financial Need: {}",
        profile.name,
        profile.education_level,
        profile.field_of_study,
        or_not_provided(profile.gpa.as_deref()),
        or_not_provided(profile.skills.as_deref()),
        or_not_provided(profile.activities.as_deref()),
        profile.financial_need,
    );
    let scholarship_block = format!(
        "- Title: {}\n- Organization: {}\n- Type: {}\n- Amount: {}\n- Requirements: {}\n- Description: {}",
        scholarship.title,
        scholarship.organization,
        scholarship.scholarship_type,
        scholarship.amount,
        scholarship.requirements,
        scholarship.description,
    );
    GUIDANCE_PROMPT_TEMPLATE
        .replace("{profile_block}", &profile_block)
        .replace("{scholarship_block}", &scholarship_block)
}

pub fn generic_guidance() -> GuidanceContent {
    GuidanceDraft::default().into_content()
}

impl GuidanceDraft {
    /// Fills each missing or blank field from the generic guidance.
    pub fn into_content(self) -> GuidanceContent {
        let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        let checklist: Vec<String> = self
            .checklist
            .unwrap_or_default()
            .into_iter()
            .filter(|item| !item.trim().is_empty())
            .collect();

        GuidanceContent {
            essay_tips: non_blank(self.essay_tips).unwrap_or_else(|| GENERIC_ESSAY_TIPS.to_string()),
            checklist: if checklist.is_empty() {
                GENERIC_CHECKLIST.iter().map(|s| s.to_string()).collect()
            } else {
                checklist
            },
            improvement_suggestions: non_blank(self.improvement_suggestions)
                .unwrap_or_else(|| GENERIC_IMPROVEMENT_SUGGESTIONS.to_string()),
        }
    }
}

/// Produces guidance content. Never fails: without an oracle, or when the
/// oracle errors, the generic guidance is returned.
pub struct GuidanceAdvisor {
    oracle: Option<Arc<dyn GuidanceOracle>>,
}

impl GuidanceAdvisor {
    pub fn new(oracle: Option<Arc<dyn GuidanceOracle>>) -> Self {
        Self { oracle }
    }

    pub async fn advise(&self, profile: &StudentProfile, scholarship: &Scholarship) -> GuidanceContent {
        let Some(oracle) = &self.oracle else {
            return generic_guidance();
        };
        match oracle.draft(profile, scholarship).await {
            Ok(draft) => draft.into_content(),
            Err(e) => {
                warn!(
                    "Guidance oracle failed for profile {} / scholarship {}: {e}. Using generic guidance.",
                    profile.id, scholarship.id
                );
                generic_guidance()
            }
        }
    }
}

pub async fn get_or_create_guidance(
    store: &dyn ScholarshipStore,
    advisor: &GuidanceAdvisor,
    profile_id: Uuid,
    scholarship_id: Uuid,
) -> Result<ApplicationGuidance, AppError> {
    if let Some(cached) = store.get_guidance(profile_id, scholarship_id).await? {
        return Ok(cached);
    }

    let profile = store.get_profile(profile_id).await?;
    let scholarship = store.get_scholarship(scholarship_id).await?;
    let (Some(profile), Some(scholarship)) = (profile, scholarship) else {
        return Err(AppError::NotFound(
            "Profile or scholarship not found".to_string(),
        ));
    };

    let content = advisor.advise(&profile, &scholarship).await;
    let stored = store
        .insert_guidance(profile_id, scholarship_id, &content)
        .await?;
    info!("Stored guidance {} for profile {profile_id}", stored.id);
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::generator::tests::new_profile;
    use crate::matching::request::tests::{new_scholarship, profile, scholarship};
    use crate::store::memory::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingOracle {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GuidanceOracle for CountingOracle {
        async fn draft(
            &self,
            _profile: &StudentProfile,
            scholarship: &Scholarship,
        ) -> Result<GuidanceDraft, LlmError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GuidanceDraft {
                essay_tips: Some(format!("Tell {} about your research (draft {n})", scholarship.title)),
                checklist: Some(vec!["Request two recommendation letters".to_string()]),
                improvement_suggestions: None,
            })
        }
    }

    struct BrokenOracle;

    #[async_trait]
    impl GuidanceOracle for BrokenOracle {
        async fn draft(
            &self,
            _profile: &StudentProfile,
            _scholarship: &Scholarship,
        ) -> Result<GuidanceDraft, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    #[tokio::test]
    async fn test_second_request_is_served_from_cache() {
        let (store, catalog) = MemoryStore::with_catalog(vec![new_scholarship("STEM Award", &[])]);
        let profile = store
            .create_profile("user-g", &new_profile("Physics", "graduate-student"))
            .await
            .unwrap();
        let oracle = Arc::new(CountingOracle {
            calls: AtomicUsize::new(0),
        });
        let advisor = GuidanceAdvisor::new(Some(oracle.clone()));

        let first = get_or_create_guidance(&store, &advisor, profile.id, catalog[0].id)
            .await
            .unwrap();
        let second = get_or_create_guidance(&store, &advisor, profile.id, catalog[0].id)
            .await
            .unwrap();

        assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(store.guidance_rows(), 1);
        assert_eq!(first.essay_tips, "Tell STEM Award about your research (draft 0)");
        assert_eq!(first.improvement_suggestions, GENERIC_IMPROVEMENT_SUGGESTIONS);
    }

    #[tokio::test]
    async fn test_unknown_scholarship_is_not_found() {
        let store = MemoryStore::new();
        let profile = store
            .create_profile("user-h", &new_profile("Physics", "graduate-student"))
            .await
            .unwrap();
        let err = get_or_create_guidance(&store, &GuidanceAdvisor::new(None), profile.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.guidance_rows(), 0);
    }

    #[tokio::test]
    async fn test_oracle_failure_yields_generic_guidance() {
        let advisor = GuidanceAdvisor::new(Some(Arc::new(BrokenOracle)));
        let content = advisor
            .advise(&profile("Art", "undergraduate-freshman"), &scholarship("A", &[]))
            .await;
        assert_eq!(content, generic_guidance());
        assert_eq!(content.essay_tips, GENERIC_ESSAY_TIPS);
        assert_eq!(
            content.checklist,
            vec!["Complete application form", "Submit transcripts", "Write personal statement"]
        );
    }

    #[test]
    fn test_blank_fields_are_filled() {
        let draft = GuidanceDraft {
            essay_tips: Some("  ".to_string()),
            checklist: Some(vec![]),
            improvement_suggestions: Some("Publish a paper".to_string()),
        };
        let content = draft.into_content();
        assert_eq!(content.essay_tips, GENERIC_ESSAY_TIPS);
        assert_eq!(content.checklist.len(), 3);
        assert_eq!(content.improvement_suggestions, "Publish a paper");
    }

    #[test]
    fn test_string_checklist_keeps_the_other_fields() {
        let draft: GuidanceDraft = serde_json::from_str(
            r#"{"essayTips":"Tailored tip","checklist":"Transcript; Essay","improvementSuggestions":"Tailored advice"}"#,
        )
        .unwrap();
        let content = draft.into_content();
        assert_eq!(content.essay_tips, "Tailored tip");
        assert_eq!(content.checklist, vec!["Transcript", "Essay"]);
        assert_eq!(content.improvement_suggestions, "Tailored advice");
    }

    #[test]
    fn test_checklist_string_forms() {
        let draft: GuidanceDraft = serde_json::from_value(serde_json::json!({
            "checklist": "- Request transcript\n- Draft essay\n\n"
        }))
        .unwrap();
        assert_eq!(
            draft.checklist.unwrap(),
            vec!["Request transcript", "Draft essay"]
        );

        let encoded: GuidanceDraft = serde_json::from_value(serde_json::json!({
            "checklist": "[\"Submit FAFSA\",\"Upload resume\"]"
        }))
        .unwrap();
        assert_eq!(encoded.checklist.unwrap(), vec!["Submit FAFSA", "Upload resume"]);
    }

    #[test]
    fn test_wrong_typed_fields_fall_back_individually() {
        let draft: GuidanceDraft = serde_json::from_value(serde_json::json!({
            "essayTips": {"text": "nested"},
            "checklist": 3,
            "improvementSuggestions": "Volunteer at a clinic"
        }))
        .unwrap();
        let content = draft.into_content();
        assert_eq!(content.essay_tips, GENERIC_ESSAY_TIPS);
        assert_eq!(content.checklist.len(), GENERIC_CHECKLIST.len());
        assert_eq!(content.improvement_suggestions, "Volunteer at a clinic");
    }

    #[test]
    fn test_output_schema_lists_the_three_fields() {
        let schema = guidance_output_schema();
        assert_eq!(schema.tool_name, "record_guidance");
        assert_eq!(schema.input_schema["properties"]["checklist"]["type"], "array");
        assert_eq!(
            schema.input_schema["required"],
            serde_json::json!(["essayTips", "checklist", "improvementSuggestions"])
        );
    }

    #[test]
    fn test_prompt_carries_profile_and_scholarship_details() {
        let prompt = build_guidance_prompt(
            &profile("Computer Science", "undergraduate-junior"),
            &scholarship("STEM Excellence", &[]),
        );
        assert!(prompt.contains("- Name: Priya Sharma"));
        assert!(prompt.contains("- GPA: Not provided"));
        assert!(prompt.contains("- Title: STEM Excellence"));
        assert!(prompt.contains("- Organization: Test Foundation"));
        assert!(prompt.contains("record_guidance"));
    }
}
