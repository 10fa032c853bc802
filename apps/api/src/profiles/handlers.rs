use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::profile::StudentProfile;
use crate::profiles::validation::{validate_new_profile, validate_profile_patch, ProfileForm};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub user_id: Option<String>,
    pub profile: Option<ProfileForm>,
}

/// POST /api/profile
pub async fn handle_create_profile(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateProfileRequest>,
) -> Result<Json<StudentProfile>, AppError> {
    let form = req.profile.unwrap_or_default();
    let new_profile = validate_new_profile(&form, &state.config.allowed_email_domains)?;

    let user_id = req
        .user_id
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Validation("User ID is required".to_string()))?;

    let profile = state.store.create_profile(&user_id, &new_profile).await?;
    info!("Created profile {} for user {}", profile.id, user_id);
    Ok(Json(profile))
}

/// GET /api/profile/:userId
pub async fn handle_get_profile_by_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<String>,
) -> Result<Json<StudentProfile>, AppError> {
    state
        .store
        .get_profile_by_user(&user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
}

/// GET /api/profile/id/:profileId
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AppPath(profile_id): AppPath<Uuid>,
) -> Result<Json<StudentProfile>, AppError> {
    state
        .store
        .get_profile(profile_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Profile {profile_id} not found")))
}

/// PUT /api/profile/:id
pub async fn handle_update_profile(
    State(state): State<AppState>,
    AppPath(profile_id): AppPath<Uuid>,
    AppJson(form): AppJson<ProfileForm>,
) -> Result<Json<StudentProfile>, AppError> {
    let patch = validate_profile_patch(&form, &state.config.allowed_email_domains)?;
    if patch.is_empty() {
        return handle_get_profile(State(state), AppPath(profile_id)).await;
    }
    let profile = state
        .store
        .update_profile(profile_id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {profile_id} not found")))?;
    info!("Updated profile {profile_id}");
    Ok(Json(profile))
}
