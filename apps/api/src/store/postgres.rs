use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
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

const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|e| e.code())
        .map(|code| code == UNIQUE_VIOLATION)
        .unwrap_or(false)
}

#[async_trait]
impl ScholarshipStore for PgStore {
    async fn create_profile(
        &self,
        user_id: &str,
        profile: &NewStudentProfile,
    ) -> Result<StudentProfile, AppError> {
        let result = sqlx::query_as::<_, StudentProfile>(
            r#"
            INSERT INTO student_profiles
                (id, user_id, name, email, education_level, field_of_study, gpa,
                 graduation_year, skills, activities, financial_need, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.education_level)
        .bind(&profile.field_of_study)
        .bind(profile.gpa.as_deref())
        .bind(&profile.graduation_year)
        .bind(profile.skills.as_deref())
        .bind(profile.activities.as_deref())
        .bind(profile.financial_need.as_str())
        .bind(profile.location.as_str())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(e) if is_unique_violation(&e) => Err(AppError::Validation(format!(
                "A profile already exists for user {user_id}"
            ))),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_profile(&self, profile_id: Uuid) -> Result<Option<StudentProfile>, AppError> {
        Ok(
            sqlx::query_as::<_, StudentProfile>("SELECT * FROM student_profiles WHERE id = $1")
                .bind(profile_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_profile_by_user(
        &self,
        user_id: &str,
    ) -> Result<Option<StudentProfile>, AppError> {
        Ok(sqlx::query_as::<_, StudentProfile>(
            "SELECT * FROM student_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn update_profile(
        &self,
        profile_id: Uuid,
        patch: &StudentProfilePatch,
    ) -> Result<Option<StudentProfile>, AppError> {
        Ok(sqlx::query_as::<_, StudentProfile>(
            r#"
            UPDATE student_profiles SET
                name            = COALESCE($2, name),
                email           = COALESCE($3, email),
                education_level = COALESCE($4, education_level),
                field_of_study  = COALESCE($5, field_of_study),
                gpa             = COALESCE($6, gpa),
                graduation_year = COALESCE($7, graduation_year),
                skills          = COALESCE($8, skills),
                activities      = COALESCE($9, activities),
                financial_need  = COALESCE($10, financial_need),
                location        = COALESCE($11, location),
                updated_at      = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(patch.name.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.education_level.as_deref())
        .bind(patch.field_of_study.as_deref())
        .bind(patch.gpa.as_deref())
        .bind(patch.graduation_year.as_deref())
        .bind(patch.skills.as_deref())
        .bind(patch.activities.as_deref())
        .bind(patch.financial_need.map(|n| n.as_str()))
        .bind(patch.location.map(|l| l.as_str()))
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn active_scholarships(&self) -> Result<Vec<Scholarship>, AppError> {
        Ok(sqlx::query_as::<_, Scholarship>(
            "SELECT * FROM scholarships WHERE is_active ORDER BY created_at, title",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_scholarship(
        &self,
        scholarship_id: Uuid,
    ) -> Result<Option<Scholarship>, AppError> {
        Ok(
            sqlx::query_as::<_, Scholarship>("SELECT * FROM scholarships WHERE id = $1")
                .bind(scholarship_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn search_scholarships(
        &self,
        filter: &ScholarshipFilter,
    ) -> Result<Vec<Scholarship>, AppError> {
        // Empty eligibility lists mean "any", mirroring ScholarshipFilter::matches.
        Ok(sqlx::query_as::<_, Scholarship>(
            r#"
            SELECT * FROM scholarships
            WHERE is_active
              AND ($1::text IS NULL OR scholarship_type = $1)
              AND (cardinality($2::text[]) = 0 OR tags && $2::text[])
              AND ($3::text IS NULL OR cardinality(eligible_fields) = 0 OR $3 = ANY(eligible_fields))
              AND ($4::text IS NULL OR cardinality(eligible_levels) = 0 OR $4 = ANY(eligible_levels))
            ORDER BY created_at, title
            "#,
        )
        .bind(filter.scholarship_type.as_deref())
        .bind(filter.tags.as_slice())
        .bind(filter.field_of_study.as_deref())
        .bind(filter.education_level.as_deref())
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_scholarships(&self) -> Result<i64, AppError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM scholarships")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn replace_catalog(&self, catalog: &[NewScholarship]) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM scholarship_matches")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM application_guidance")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM scholarships")
            .execute(&mut *tx)
            .await?;

        for scholarship in catalog {
            sqlx::query(
                r#"
                INSERT INTO scholarships
                    (id, title, organization, amount, deadline, description, requirements,
                     tags, scholarship_type, eligibility_gpa, eligible_fields, eligible_levels,
                     is_active)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&scholarship.title)
            .bind(&scholarship.organization)
            .bind(&scholarship.amount)
            .bind(&scholarship.deadline)
            .bind(&scholarship.description)
            .bind(&scholarship.requirements)
            .bind(scholarship.tags.as_slice())
            .bind(&scholarship.scholarship_type)
            .bind(scholarship.eligibility_gpa.as_deref())
            .bind(scholarship.eligible_fields.as_slice())
            .bind(scholarship.eligible_levels.as_slice())
            .bind(scholarship.is_active)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!("Replaced scholarship catalog with {} entries", catalog.len());
        Ok(catalog.len())
    }

    async fn upsert_match(&self, new_match: NewMatch<'_>) -> Result<ScholarshipMatch, AppError> {
        Ok(sqlx::query_as::<_, ScholarshipMatch>(
            r#"
            INSERT INTO scholarship_matches
                (id, profile_id, scholarship_id, match_score, ai_reasoning, status)
            VALUES ($1, $2, $3, $4, $5, 'new')
            ON CONFLICT (profile_id, scholarship_id) DO UPDATE
            SET match_score = EXCLUDED.match_score,
                ai_reasoning = EXCLUDED.ai_reasoning
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_match.profile_id)
        .bind(new_match.scholarship_id)
        .bind(new_match.match_score)
        .bind(new_match.ai_reasoning)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn matches_for_profile(
        &self,
        profile_id: Uuid,
        status: MatchStatus,
    ) -> Result<Vec<MatchWithScholarship>, AppError> {
        let records = sqlx::query_as::<_, ScholarshipMatch>(
            r#"
            SELECT * FROM scholarship_matches
            WHERE profile_id = $1 AND status = $2
            ORDER BY match_score DESC, created_at
            "#,
        )
        .bind(profile_id)
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        if records.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<Uuid> = records.iter().map(|m| m.scholarship_id).collect();
        let mut scholarships: HashMap<Uuid, Scholarship> =
            sqlx::query_as::<_, Scholarship>("SELECT * FROM scholarships WHERE id = ANY($1)")
                .bind(&ids)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|s| (s.id, s))
                .collect();

        // Same-scholarship rows cannot repeat for one profile (unique index), so each
        // catalog entry is moved out exactly once.
        Ok(records
            .into_iter()
            .filter_map(|record| {
                scholarships
                    .remove(&record.scholarship_id)
                    .map(|scholarship| MatchWithScholarship {
                        record,
                        scholarship,
                    })
            })
            .collect())
    }

    async fn update_match_status(
        &self,
        match_id: Uuid,
        status: MatchStatus,
    ) -> Result<Option<ScholarshipMatch>, AppError> {
        Ok(sqlx::query_as::<_, ScholarshipMatch>(
            "UPDATE scholarship_matches SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(match_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn get_guidance(
        &self,
        profile_id: Uuid,
        scholarship_id: Uuid,
    ) -> Result<Option<ApplicationGuidance>, AppError> {
        Ok(sqlx::query_as::<_, ApplicationGuidance>(
            "SELECT * FROM application_guidance WHERE profile_id = $1 AND scholarship_id = $2",
        )
        .bind(profile_id)
        .bind(scholarship_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_guidance(
        &self,
        profile_id: Uuid,
        scholarship_id: Uuid,
        content: &GuidanceContent,
    ) -> Result<ApplicationGuidance, AppError> {
        let inserted = sqlx::query_as::<_, ApplicationGuidance>(
            r#"
            INSERT INTO application_guidance
                (id, profile_id, scholarship_id, essay_tips, checklist, improvement_suggestions)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (profile_id, scholarship_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(profile_id)
        .bind(scholarship_id)
        .bind(&content.essay_tips)
        .bind(&content.checklist)
        .bind(&content.improvement_suggestions)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(guidance) = inserted {
            return Ok(guidance);
        }

        // Lost the race to a concurrent writer: the stored record wins.
        self.get_guidance(profile_id, scholarship_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "guidance for ({profile_id}, {scholarship_id}) vanished after conflict"
                ))
            })
    }
}
