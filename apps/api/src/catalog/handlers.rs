use axum::{
    extract::State,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::catalog::search::SearchQuery;
use crate::catalog::seed::seed_catalog;
use crate::errors::AppError;
use crate::extract::AppQuery;
use crate::models::scholarship::Scholarship;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub count: usize,
}

/// GET /api/scholarships
pub async fn handle_list_scholarships(
    State(state): State<AppState>,
) -> Result<Json<Vec<Scholarship>>, AppError> {
    Ok(Json(state.store.active_scholarships().await?))
}

/// GET /api/scholarships/search
pub async fn handle_search_scholarships(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Json<Vec<Scholarship>>, AppError> {
    let filter = query.into_filter();
    Ok(Json(state.store.search_scholarships(&filter).await?))
}

/// POST /api/seed-data
///
/// Bulk reseed: removes every match and guidance record along with the old catalog.
pub async fn handle_seed_data(
    State(state): State<AppState>,
) -> Result<Json<SeedResponse>, AppError> {
    let count = state.store.replace_catalog(&seed_catalog()).await?;
    info!("Seeded {count} scholarships");
    Ok(Json(SeedResponse {
        message: "Sample data seeded successfully".to_string(),
        count,
    }))
}
