use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::scholarship::Scholarship;
use super::UnknownVariant;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    New,
    Favorited,
    Passed,
    Applied,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::New => "new",
            MatchStatus::Favorited => "favorited",
            MatchStatus::Passed => "passed",
            MatchStatus::Applied => "applied",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(MatchStatus::New),
            "favorited" => Ok(MatchStatus::Favorited),
            "passed" => Ok(MatchStatus::Passed),
            "applied" => Ok(MatchStatus::Applied),
            other => Err(UnknownVariant {
                kind: "match status",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for MatchStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipMatch {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub scholarship_id: Uuid,
    /// 0 – 100
    pub match_score: i32,
    pub ai_reasoning: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}

/// A persisted match joined with its catalog entry, as the dashboard reads it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchWithScholarship {
    #[serde(flatten)]
    pub record: ScholarshipMatch,
    pub scholarship: Scholarship,
}

/// Parameters for writing one scored candidate.
pub struct NewMatch<'a> {
    pub profile_id: Uuid,
    pub scholarship_id: Uuid,
    pub match_score: i32,
    pub ai_reasoning: &'a str,
}
