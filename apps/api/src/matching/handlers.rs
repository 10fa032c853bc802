use axum::{
    extract::State,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::matching::dashboard::{
    apply_view, compute_stats, DashboardQuery, DashboardStats, SortKey, ViewFilter,
};
use crate::matching::generator::{generate_matches, GenerationOutcome};
use crate::models::scholarship_match::{MatchStatus, MatchWithScholarship, ScholarshipMatch};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMatchesRequest {
    pub profile_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub matches: Vec<MatchWithScholarship>,
    pub stats: DashboardStats,
}

/// Missing status means `new`; anything else must name a known status.
fn parse_status(raw: Option<&str>) -> Result<MatchStatus, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(MatchStatus::New),
        Some(s) => s.parse().map_err(|e| AppError::Validation(format!("{e}"))),
    }
}

/// POST /api/matches/generate
pub async fn handle_generate_matches(
    State(state): State<AppState>,
    AppJson(req): AppJson<GenerateMatchesRequest>,
) -> Result<Json<GenerationOutcome>, AppError> {
    let profile_id = req
        .profile_id
        .ok_or_else(|| AppError::Validation("Profile ID is required".to_string()))?;

    let outcome = generate_matches(state.store.as_ref(), &state.scorer, profile_id).await?;
    Ok(Json(outcome))
}

/// GET /api/matches/:profileId?status=
pub async fn handle_list_matches(
    State(state): State<AppState>,
    AppPath(profile_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<StatusQuery>,
) -> Result<Json<Vec<MatchWithScholarship>>, AppError> {
    let status = parse_status(query.status.as_deref())?;
    Ok(Json(state.store.matches_for_profile(profile_id, status).await?))
}

/// GET /api/matches/:profileId/dashboard
///
/// Stats are computed over the status-filtered set, before the view filters.
pub async fn handle_dashboard(
    State(state): State<AppState>,
    AppPath(profile_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let status = parse_status(query.status.as_deref())?;
    let sort = match query.sort.as_deref() {
        None | Some("") => SortKey::default(),
        Some(s) => s.parse().map_err(|e| AppError::Validation(format!("{e}")))?,
    };
    let filter = ViewFilter {
        scholarship_type: query.scholarship_type.filter(|t| !t.is_empty()),
        min_amount: query.min_amount,
        due_within_days: query.due_within_days,
    };

    let rows = state.store.matches_for_profile(profile_id, status).await?;
    let today = Utc::now().date_naive();
    let stats = compute_stats(&rows, today);
    let matches = apply_view(rows, &filter, sort, today);

    Ok(Json(DashboardResponse { matches, stats }))
}

/// PUT /api/matches/:matchId/status
pub async fn handle_update_match_status(
    State(state): State<AppState>,
    AppPath(match_id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateStatusRequest>,
) -> Result<Json<ScholarshipMatch>, AppError> {
    let raw = req
        .status
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Status is required".to_string()))?;
    let status = parse_status(Some(&raw))?;

    let updated = state
        .store
        .update_match_status(match_id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Match {match_id} not found")))?;
    info!("Match {match_id} moved to {status}");
    Ok(Json(updated))
}
