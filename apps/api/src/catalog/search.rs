//! Catalog search filters.

use serde::Deserialize;

use crate::models::scholarship::Scholarship;

/// Structured catalog filter. Every unset criterion matches everything, and an
/// empty eligibility list on a scholarship means it is open to any field/level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScholarshipFilter {
    pub scholarship_type: Option<String>,
    /// Matches when the scholarship carries at least one of these tags.
    pub tags: Vec<String>,
    pub field_of_study: Option<String>,
    pub education_level: Option<String>,
}

// In-memory mirror of the WHERE clause in `PgStore::search_scholarships`.
#[cfg(test)]
impl ScholarshipFilter {
    pub fn matches(&self, scholarship: &Scholarship) -> bool {
        if let Some(t) = &self.scholarship_type {
            if &scholarship.scholarship_type != t {
                return false;
            }
        }
        if !self.tags.is_empty()
            && !scholarship
                .tags
                .iter()
                .any(|tag| self.tags.iter().any(|wanted| wanted == tag))
        {
            return false;
        }
        if let Some(field) = &self.field_of_study {
            let fields = &scholarship.eligible_fields;
            if !fields.is_empty() && !fields.iter().any(|f| f == field) {
                return false;
            }
        }
        if let Some(level) = &self.education_level {
            let levels = &scholarship.eligible_levels;
            if !levels.is_empty() && !levels.iter().any(|l| l == level) {
                return false;
            }
        }
        true
    }
}

/// Query string for `GET /api/scholarships/search`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(rename = "type")]
    pub scholarship_type: Option<String>,
    /// Comma-separated.
    pub tags: Option<String>,
    pub field_of_study: Option<String>,
    pub education_level: Option<String>,
}

impl SearchQuery {
    pub fn into_filter(self) -> ScholarshipFilter {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        ScholarshipFilter {
            scholarship_type: non_blank(self.scholarship_type),
            tags: self
                .tags
                .map(|raw| {
                    raw.split(',')
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            field_of_study: non_blank(self.field_of_study),
            education_level: non_blank(self.education_level),
        }
    }
}
