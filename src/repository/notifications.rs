//! Notifications repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::notification::{NewNotification, Notification},
};

#[derive(Clone)]
pub struct NotificationsRepository {
    pool: Pool<Postgres>,
}

impl NotificationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a notification
    pub async fn insert(&self, data: &NewNotification) -> AppResult<Notification> {
        let row = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (provider_id, kind, title, message, reservation_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.provider_id)
        .bind(data.kind)
        .bind(&data.title)
        .bind(&data.message)
        .bind(data.reservation_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// List notifications for a provider, newest first
    pub async fn list_for_provider(&self, provider_id: i32) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE provider_id = $1 ORDER BY created_at DESC",
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Mark a notification as read
    pub async fn mark_read(&self, id: i32) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Notification with id {} not found", id)))
    }

    /// Delete read notifications created before the cutoff
    pub async fn purge_read_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM notifications WHERE read = TRUE AND created_at < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
