//! In-memory store used by unit and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::ScholarshipStore;
use crate::catalog::search::ScholarshipFilter;
use crate::errors::AppError;
use crate::models::guidance::{ApplicationGuidance, GuidanceContent};
use crate::models::profile::{NewStudentProfile, StudentProfile, StudentProfilePatch};
use crate::models::scholarship::{NewScholarship, Scholarship};
use crate::models::scholarship_match::{
    MatchStatus, MatchWithScholarship, NewMatch, ScholarshipMatch,
};

#[derive(Default)]
struct Tables {
    profiles: Vec<StudentProfile>,
    scholarships: Vec<Scholarship>,
    matches: Vec<ScholarshipMatch>,
    guidance: Vec<ApplicationGuidance>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts catalog entries and returns them with their assigned ids.
    pub fn with_catalog(catalog: Vec<NewScholarship>) -> (Self, Vec<Scholarship>) {
        let store = Self::new();
        let inserted: Vec<Scholarship> = catalog
            .into_iter()
            .map(|s| s.into_scholarship(Uuid::new_v4()))
            .collect();
        store.tables.lock().unwrap().scholarships = inserted.clone();
        (store, inserted)
    }

    pub fn match_rows(&self) -> Vec<ScholarshipMatch> {
        self.tables.lock().unwrap().matches.clone()
    }

    pub fn guidance_rows(&self) -> usize {
        self.tables.lock().unwrap().guidance.len()
    }
}

#[async_trait]
impl ScholarshipStore for MemoryStore {
    async fn create_profile(
        &self,
        user_id: &str,
        profile: &NewStudentProfile,
    ) -> Result<StudentProfile, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.profiles.iter().any(|p| p.user_id == user_id) {
            return Err(AppError::Validation(format!(
                "A profile already exists for user {user_id}"
            )));
        }
        let now = Utc::now();
        let created = StudentProfile {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            education_level: profile.education_level.clone(),
            field_of_study: profile.field_of_study.clone(),
            gpa: profile.gpa.clone(),
            graduation_year: profile.graduation_year.clone(),
            skills: profile.skills.clone(),
            activities: profile.activities.clone(),
            financial_need: profile.financial_need,
            location: profile.location,
            created_at: now,
            updated_at: now,
        };
        tables.profiles.push(created.clone());
        Ok(created)
    }

    async fn get_profile(&self, profile_id: Uuid) -> Result<Option<StudentProfile>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.profiles.iter().find(|p| p.id == profile_id).cloned())
    }

    async fn get_profile_by_user(
        &self,
        user_id: &str,
    ) -> Result<Option<StudentProfile>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn update_profile(
        &self,
        profile_id: Uuid,
        patch: &StudentProfilePatch,
    ) -> Result<Option<StudentProfile>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .profiles
            .iter_mut()
            .find(|p| p.id == profile_id)
            .map(|profile| {
                patch.apply_to(profile);
                profile.clone()
            }))
    }

    async fn active_scholarships(&self) -> Result<Vec<Scholarship>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .scholarships
            .iter()
            .filter(|s| s.is_active)
            .cloned()
            .collect())
    }

    async fn get_scholarship(
        &self,
        scholarship_id: Uuid,
    ) -> Result<Option<Scholarship>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .scholarships
            .iter()
            .find(|s| s.id == scholarship_id)
            .cloned())
    }

    async fn search_scholarships(
        &self,
        filter: &ScholarshipFilter,
    ) -> Result<Vec<Scholarship>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .scholarships
            .iter()
            .filter(|s| s.is_active && filter.matches(s))
            .cloned()
            .collect())
    }

    async fn count_scholarships(&self) -> Result<i64, AppError> {
        Ok(self.tables.lock().unwrap().scholarships.len() as i64)
    }

    async fn replace_catalog(&self, catalog: &[NewScholarship]) -> Result<usize, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.matches.clear();
        tables.guidance.clear();
        tables.scholarships = catalog
            .iter()
            .cloned()
            .map(|s| s.into_scholarship(Uuid::new_v4()))
            .collect();
        Ok(catalog.len())
    }

    async fn upsert_match(&self, new_match: NewMatch<'_>) -> Result<ScholarshipMatch, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(existing) = tables.matches.iter_mut().find(|m| {
            m.profile_id == new_match.profile_id && m.scholarship_id == new_match.scholarship_id
        }) {
            existing.match_score = new_match.match_score;
            existing.ai_reasoning = Some(new_match.ai_reasoning.to_string());
            return Ok(existing.clone());
        }
        let created = ScholarshipMatch {
            id: Uuid::new_v4(),
            profile_id: new_match.profile_id,
            scholarship_id: new_match.scholarship_id,
            match_score: new_match.match_score,
            ai_reasoning: Some(new_match.ai_reasoning.to_string()),
            status: MatchStatus::New,
            created_at: Utc::now(),
        };
        tables.matches.push(created.clone());
        Ok(created)
    }

    async fn matches_for_profile(
        &self,
        profile_id: Uuid,
        status: MatchStatus,
    ) -> Result<Vec<MatchWithScholarship>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<MatchWithScholarship> = tables
            .matches
            .iter()
            .filter(|m| m.profile_id == profile_id && m.status == status)
            .filter_map(|m| {
                tables
                    .scholarships
                    .iter()
                    .find(|s| s.id == m.scholarship_id)
                    .map(|s| MatchWithScholarship {
                        record: m.clone(),
                        scholarship: s.clone(),
                    })
            })
            .collect();
        rows.sort_by(|a, b| b.record.match_score.cmp(&a.record.match_score));
        Ok(rows)
    }

    async fn update_match_status(
        &self,
        match_id: Uuid,
        status: MatchStatus,
    ) -> Result<Option<ScholarshipMatch>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .map(|m| {
                m.status = status;
                m.clone()
            }))
    }

    async fn get_guidance(
        &self,
        profile_id: Uuid,
        scholarship_id: Uuid,
    ) -> Result<Option<ApplicationGuidance>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .guidance
            .iter()
            .find(|g| g.profile_id == profile_id && g.scholarship_id == scholarship_id)
            .cloned())
    }

    async fn insert_guidance(
        &self,
        profile_id: Uuid,
        scholarship_id: Uuid,
        content: &GuidanceContent,
    ) -> Result<ApplicationGuidance, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(existing) = tables
            .guidance
            .iter()
            .find(|g| g.profile_id == profile_id && g.scholarship_id == scholarship_id)
        {
            return Ok(existing.clone());
        }
        let created = ApplicationGuidance {
            id: Uuid::new_v4(),
            profile_id,
            scholarship_id,
            essay_tips: content.essay_tips.clone(),
            checklist: content.checklist.clone(),
            improvement_suggestions: content.improvement_suggestions.clone(),
            created_at: Utc::now(),
        };
        tables.guidance.push(created.clone());
        Ok(created)
    }
}
