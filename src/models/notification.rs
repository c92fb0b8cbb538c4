//! Notification model
//!
//! Notifications are advisory only. Failing to create one must never roll
//! back the reservation or cancellation that triggered it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::NotificationType;

/// Advisory notification delivered to a provider
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i32,
    pub provider_id: i32,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub reservation_id: Option<i32>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// New notification to insert
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub provider_id: i32,
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub reservation_id: Option<i32>,
}
