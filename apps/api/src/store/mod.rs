//! Persistence port. Handlers and pipelines talk to `dyn ScholarshipStore`; the
//! service runs on `PgStore`, tests run on the in-memory store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::search::ScholarshipFilter;
use crate::errors::AppError;
use crate::models::guidance::{ApplicationGuidance, GuidanceContent};
use crate::models::profile::{NewStudentProfile, StudentProfile, StudentProfilePatch};
use crate::models::scholarship::{NewScholarship, Scholarship};
use crate::models::scholarship_match::{
    MatchStatus, MatchWithScholarship, NewMatch, ScholarshipMatch,
};

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;

#[async_trait]
pub trait ScholarshipStore: Send + Sync {
    // --- Student profiles ---
    async fn create_profile(
        &self,
        user_id: &str,
        profile: &NewStudentProfile,
    ) -> Result<StudentProfile, AppError>;

    async fn get_profile(&self, profile_id: Uuid) -> Result<Option<StudentProfile>, AppError>;

    async fn get_profile_by_user(&self, user_id: &str)
        -> Result<Option<StudentProfile>, AppError>;

    async fn update_profile(
        &self,
        profile_id: Uuid,
        patch: &StudentProfilePatch,
    ) -> Result<Option<StudentProfile>, AppError>;

    // --- Scholarship catalog ---
    async fn active_scholarships(&self) -> Result<Vec<Scholarship>, AppError>;

    async fn get_scholarship(&self, scholarship_id: Uuid)
        -> Result<Option<Scholarship>, AppError>;

    async fn search_scholarships(
        &self,
        filter: &ScholarshipFilter,
    ) -> Result<Vec<Scholarship>, AppError>;

    async fn count_scholarships(&self) -> Result<i64, AppError>;

    /// Clears matches, guidance and the catalog, then inserts `catalog`.
    async fn replace_catalog(&self, catalog: &[NewScholarship]) -> Result<usize, AppError>;

    // --- Matches ---
    /// Inserts a `new` match, or refreshes score and reasoning of the existing
    /// row for the same (profile, scholarship) pair while keeping its status.
    async fn upsert_match(&self, new_match: NewMatch<'_>) -> Result<ScholarshipMatch, AppError>;

    /// Matches for a profile in one status, best score first.
    async fn matches_for_profile(
        &self,
        profile_id: Uuid,
        status: MatchStatus,
    ) -> Result<Vec<MatchWithScholarship>, AppError>;

    async fn update_match_status(
        &self,
        match_id: Uuid,
        status: MatchStatus,
    ) -> Result<Option<ScholarshipMatch>, AppError>;

    // --- Application guidance ---
    async fn get_guidance(
        &self,
        profile_id: Uuid,
        scholarship_id: Uuid,
    ) -> Result<Option<ApplicationGuidance>, AppError>;

    /// Stores guidance for the pair. If a record already exists the stored one
    /// is returned unchanged.
    async fn insert_guidance(
        &self,
        profile_id: Uuid,
        scholarship_id: Uuid,
        content: &GuidanceContent,
    ) -> Result<ApplicationGuidance, AppError>;
}
