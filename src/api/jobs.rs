//! Lifecycle job trigger endpoints
//!
//! Invoked by an external time-based trigger (cron, systemd timer). Each
//! job is idempotent-safe to re-run and returns an aggregate count.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Aggregate result of a batch job
#[derive(Serialize, ToSchema)]
pub struct JobResult {
    /// Number of items the job acted on
    pub count: u64,
}

/// Send reminders for tomorrow's confirmed reservations
#[utoipa::path(
    post,
    path = "/jobs/reminders",
    tag = "jobs",
    responses(
        (status = 200, description = "Reminders attempted", body = JobResult)
    )
)]
pub async fn send_reminders(State(state): State<crate::AppState>) -> AppResult<Json<JobResult>> {
    let count = state.services.jobs.send_reminders(Utc::now()).await?;
    Ok(Json(JobResult { count }))
}

/// Mark yesterday's still-confirmed reservations as no-shows
#[utoipa::path(
    post,
    path = "/jobs/no-show-sweep",
    tag = "jobs",
    responses(
        (status = 200, description = "Reservations marked", body = JobResult)
    )
)]
pub async fn no_show_sweep(State(state): State<crate::AppState>) -> AppResult<Json<JobResult>> {
    let count = state.services.jobs.mark_no_shows(Utc::now()).await?;
    Ok(Json(JobResult { count }))
}

/// Purge old read notifications
#[utoipa::path(
    post,
    path = "/jobs/purge-notifications",
    tag = "jobs",
    responses(
        (status = 200, description = "Notifications deleted", body = JobResult)
    )
)]
pub async fn purge_notifications(
    State(state): State<crate::AppState>,
) -> AppResult<Json<JobResult>> {
    let count = state.services.jobs.purge_notifications(Utc::now()).await?;
    Ok(Json(JobResult { count }))
}

/// Send each active provider its daily report
#[utoipa::path(
    post,
    path = "/jobs/daily-report",
    tag = "jobs",
    responses(
        (status = 200, description = "Providers notified", body = JobResult)
    )
)]
pub async fn daily_report(State(state): State<crate::AppState>) -> AppResult<Json<JobResult>> {
    let count = state.services.jobs.daily_report(Utc::now()).await?;
    Ok(Json(JobResult { count }))
}
