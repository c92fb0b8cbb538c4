//! Providers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::provider::{CreateProvider, Provider, ProviderPublic, UpdateProvider},
};

#[derive(Clone)]
pub struct ProvidersRepository {
    pool: Pool<Postgres>,
}

impl ProvidersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get provider by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Provider> {
        sqlx::query_as::<_, Provider>("SELECT * FROM providers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Provider with id {} not found", id)))
    }

    /// Public view of an active provider by slug
    pub async fn get_public_by_slug(&self, slug: &str) -> AppResult<ProviderPublic> {
        sqlx::query_as::<_, ProviderPublic>(
            r#"
            SELECT id, slug, business_name, description, address,
                   requires_full_payment, deposit_percentage,
                   refund_cancellation_hours, no_refund_cancellation_hours,
                   mp_public_key
            FROM providers
            WHERE slug = $1 AND active = TRUE
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Provider '{}' not found", slug)))
    }

    /// List all providers
    pub async fn list(&self) -> AppResult<Vec<Provider>> {
        let rows = sqlx::query_as::<_, Provider>("SELECT * FROM providers ORDER BY business_name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List active provider IDs, for the daily report fan-out
    pub async fn list_active_ids(&self) -> AppResult<Vec<i32>> {
        let ids = sqlx::query_scalar::<_, i32>("SELECT id FROM providers WHERE active = TRUE ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    /// Create a provider
    pub async fn create(&self, data: &CreateProvider) -> AppResult<Provider> {
        let row = sqlx::query_as::<_, Provider>(
            r#"
            INSERT INTO providers (
                slug, business_name, description, address, contact_email,
                mp_access_token, mp_public_key, requires_full_payment,
                deposit_percentage, refund_cancellation_hours, no_refund_cancellation_hours
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7,
                    COALESCE($8, FALSE), COALESCE($9, 50),
                    COALESCE($10, 24), COALESCE($11, 2))
            RETURNING *
            "#,
        )
        .bind(&data.slug)
        .bind(&data.business_name)
        .bind(&data.description)
        .bind(&data.address)
        .bind(&data.contact_email)
        .bind(&data.mp_access_token)
        .bind(&data.mp_public_key)
        .bind(data.requires_full_payment)
        .bind(data.deposit_percentage)
        .bind(data.refund_cancellation_hours)
        .bind(data.no_refund_cancellation_hours)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Slug '{}' is already taken", data.slug))
            }
            _ => AppError::Database(e),
        })?;
        Ok(row)
    }

    /// Update a provider (partial)
    pub async fn update(&self, id: i32, data: &UpdateProvider) -> AppResult<Provider> {
        let current = self.get_by_id(id).await?;

        let row = sqlx::query_as::<_, Provider>(
            r#"
            UPDATE providers SET
                business_name = $2,
                description = $3,
                address = $4,
                contact_email = $5,
                mp_access_token = $6,
                mp_public_key = $7,
                requires_full_payment = $8,
                deposit_percentage = $9,
                refund_cancellation_hours = $10,
                no_refund_cancellation_hours = $11,
                active = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.business_name.as_ref().unwrap_or(&current.business_name))
        .bind(data.description.as_ref().or(current.description.as_ref()))
        .bind(data.address.as_ref().or(current.address.as_ref()))
        .bind(data.contact_email.as_ref().unwrap_or(&current.contact_email))
        .bind(data.mp_access_token.as_ref().or(current.mp_access_token.as_ref()))
        .bind(data.mp_public_key.as_ref().or(current.mp_public_key.as_ref()))
        .bind(data.requires_full_payment.unwrap_or(current.requires_full_payment))
        .bind(data.deposit_percentage.unwrap_or(current.deposit_percentage))
        .bind(data.refund_cancellation_hours.unwrap_or(current.refund_cancellation_hours))
        .bind(data.no_refund_cancellation_hours.unwrap_or(current.no_refund_cancellation_hours))
        .bind(data.active.unwrap_or(current.active))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
