use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::guidance::advisor::get_or_create_guidance;
use crate::models::guidance::ApplicationGuidance;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceRequest {
    pub profile_id: Option<Uuid>,
    pub scholarship_id: Option<Uuid>,
}

/// POST /api/guidance
pub async fn handle_create_guidance(
    State(state): State<AppState>,
    AppJson(req): AppJson<GuidanceRequest>,
) -> Result<Json<ApplicationGuidance>, AppError> {
    let (Some(profile_id), Some(scholarship_id)) = (req.profile_id, req.scholarship_id) else {
        return Err(AppError::Validation(
            "Profile ID and Scholarship ID are required".to_string(),
        ));
    };
    let guidance =
        get_or_create_guidance(state.store.as_ref(), &state.advisor, profile_id, scholarship_id)
            .await?;
    Ok(Json(guidance))
}

/// GET /api/guidance/:profileId/:scholarshipId
pub async fn handle_get_guidance(
    State(state): State<AppState>,
    AppPath((profile_id, scholarship_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<ApplicationGuidance>, AppError> {
    state
        .store
        .get_guidance(profile_id, scholarship_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Guidance not found".to_string()))
}
