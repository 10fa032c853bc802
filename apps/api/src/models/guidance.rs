use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationGuidance {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub scholarship_id: Uuid,
    pub essay_tips: String,
    pub checklist: Vec<String>,
    pub improvement_suggestions: String,
    pub created_at: DateTime<Utc>,
}

/// Guidance content before it is keyed and stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceContent {
    pub essay_tips: String,
    pub checklist: Vec<String>,
    pub improvement_suggestions: String,
}
