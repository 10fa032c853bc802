use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::tags::TagList;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    pub id: Uuid,
    pub title: String,
    pub organization: String,
    /// Free-text currency string, e.g. "$15,000" or "₹16,50,000".
    pub amount: String,
    /// "YYYY-MM-DD"
    pub deadline: String,
    pub description: String,
    pub requirements: String,
    #[sqlx(try_from = "Vec<String>")]
    pub tags: TagList,
    #[serde(rename = "type")]
    pub scholarship_type: String,
    pub eligibility_gpa: Option<String>,
    /// Empty means any field.
    #[sqlx(try_from = "Vec<String>")]
    pub eligible_fields: TagList,
    /// Empty means any level.
    #[sqlx(try_from = "Vec<String>")]
    pub eligible_levels: TagList,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Catalog entry as supplied by seeding or import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewScholarship {
    pub title: String,
    pub organization: String,
    pub amount: String,
    pub deadline: String,
    pub description: String,
    pub requirements: String,
    #[serde(default)]
    pub tags: TagList,
    #[serde(rename = "type")]
    pub scholarship_type: String,
    pub eligibility_gpa: Option<String>,
    #[serde(default)]
    pub eligible_fields: TagList,
    #[serde(default)]
    pub eligible_levels: TagList,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl NewScholarship {
    pub fn into_scholarship(self, id: Uuid) -> Scholarship {
        Scholarship {
            id,
            title: self.title,
            organization: self.organization,
            amount: self.amount,
            deadline: self.deadline,
            description: self.description,
            requirements: self.requirements,
            tags: self.tags,
            scholarship_type: self.scholarship_type,
            eligibility_gpa: self.eligibility_gpa,
            eligible_fields: self.eligible_fields,
            eligible_levels: self.eligible_levels,
            is_active: self.is_active,
            created_at: Utc::now(),
        }
    }
}
