use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::UnknownVariant;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FinancialNeed {
    Low,
    Moderate,
    High,
    Critical,
}

impl FinancialNeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialNeed::Low => "low",
            FinancialNeed::Moderate => "moderate",
            FinancialNeed::High => "high",
            FinancialNeed::Critical => "critical",
        }
    }
}

impl FromStr for FinancialNeed {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(FinancialNeed::Low),
            "moderate" => Ok(FinancialNeed::Moderate),
            "high" => Ok(FinancialNeed::High),
            "critical" => Ok(FinancialNeed::Critical),
            other => Err(UnknownVariant {
                kind: "financial need",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for FinancialNeed {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for FinancialNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LocationPreference {
    Local,
    National,
    International,
    NoPreference,
}

impl LocationPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationPreference::Local => "local",
            LocationPreference::National => "national",
            LocationPreference::International => "international",
            LocationPreference::NoPreference => "no-preference",
        }
    }
}

impl FromStr for LocationPreference {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(LocationPreference::Local),
            "national" => Ok(LocationPreference::National),
            "international" => Ok(LocationPreference::International),
            "no-preference" => Ok(LocationPreference::NoPreference),
            other => Err(UnknownVariant {
                kind: "location preference",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for LocationPreference {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for LocationPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub education_level: String,
    pub field_of_study: String,
    pub gpa: Option<String>,
    pub graduation_year: String,
    pub skills: Option<String>,
    pub activities: Option<String>,
    #[sqlx(try_from = "String")]
    pub financial_need: FinancialNeed,
    #[sqlx(try_from = "String")]
    pub location: LocationPreference,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A fully validated profile ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudentProfile {
    pub name: String,
    pub email: String,
    pub education_level: String,
    pub field_of_study: String,
    pub gpa: Option<String>,
    pub graduation_year: String,
    pub skills: Option<String>,
    pub activities: Option<String>,
    pub financial_need: FinancialNeed,
    pub location: LocationPreference,
}

/// A validated partial update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub education_level: Option<String>,
    pub field_of_study: Option<String>,
    pub gpa: Option<String>,
    pub graduation_year: Option<String>,
    pub skills: Option<String>,
    pub activities: Option<String>,
    pub financial_need: Option<FinancialNeed>,
    pub location: Option<LocationPreference>,
}

impl StudentProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch to an in-memory profile.
    #[cfg(test)]
    pub fn apply_to(&self, profile: &mut StudentProfile) {
        fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
        fn set_opt(slot: &mut Option<String>, value: &Option<String>) {
            if value.is_some() {
                *slot = value.clone();
            }
        }

        set(&mut profile.name, &self.name);
        set(&mut profile.email, &self.email);
        set(&mut profile.education_level, &self.education_level);
        set(&mut profile.field_of_study, &self.field_of_study);
        set_opt(&mut profile.gpa, &self.gpa);
        set(&mut profile.graduation_year, &self.graduation_year);
        set_opt(&mut profile.skills, &self.skills);
        set_opt(&mut profile.activities, &self.activities);
        set(&mut profile.financial_need, &self.financial_need);
        set(&mut profile.location, &self.location);
        profile.updated_at = Utc::now();
    }
}
