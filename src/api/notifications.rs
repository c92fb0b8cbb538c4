//! Notification endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::notification::Notification};

/// List a provider's notifications, newest first
#[utoipa::path(
    get,
    path = "/providers/{id}/notifications",
    tag = "notifications",
    params(
        ("id" = i32, Path, description = "Provider ID")
    ),
    responses(
        (status = 200, description = "Provider's notifications", body = Vec<Notification>),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn list_notifications(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state
        .services
        .directory
        .list_notifications(provider_id)
        .await?;
    Ok(Json(notifications))
}

/// Mark a notification as read
#[utoipa::path(
    post,
    path = "/notifications/{id}/read",
    tag = "notifications",
    params(
        ("id" = i32, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked read", body = Notification),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Notification>> {
    let notification = state.services.directory.mark_notification_read(id).await?;
    Ok(Json(notification))
}
