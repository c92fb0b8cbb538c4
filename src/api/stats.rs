//! Provider dashboard statistics endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, services::stats::DashboardStats};

/// Get a provider's dashboard numbers
#[utoipa::path(
    get,
    path = "/providers/{id}/stats",
    tag = "stats",
    params(
        ("id" = i32, Path, description = "Provider ID")
    ),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn get_dashboard(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.stats.dashboard(provider_id).await?;
    Ok(Json(stats))
}
