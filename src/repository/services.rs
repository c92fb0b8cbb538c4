//! Services (offerings) repository for database operations

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::service::{CreateService, Service, UpdateService},
};

#[derive(Clone)]
pub struct ServicesRepository {
    pool: Pool<Postgres>,
}

impl ServicesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get service by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Service> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service with id {} not found", id)))
    }

    /// List services for a provider
    pub async fn list_for_provider(&self, provider_id: i32) -> AppResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE provider_id = $1 ORDER BY name",
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List active services for a provider (public booking page)
    pub async fn list_active_for_provider(&self, provider_id: i32) -> AppResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE provider_id = $1 AND active = TRUE ORDER BY name",
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a service
    pub async fn create(&self, provider_id: i32, data: &CreateService) -> AppResult<Service> {
        if data.price < Decimal::ZERO {
            return Err(AppError::Validation("price must be >= 0".to_string()));
        }
        if data.duration_minutes < 15 {
            return Err(AppError::Validation(
                "duration_minutes must be >= 15".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (provider_id, name, description, category, price, duration_minutes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(provider_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.category)
        .bind(data.price)
        .bind(data.duration_minutes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a service (partial)
    pub async fn update(&self, id: i32, data: &UpdateService) -> AppResult<Service> {
        let current = self.get_by_id(id).await?;

        let price = data.price.unwrap_or(current.price);
        let duration = data.duration_minutes.unwrap_or(current.duration_minutes);
        if price < Decimal::ZERO {
            return Err(AppError::Validation("price must be >= 0".to_string()));
        }
        if duration < 15 {
            return Err(AppError::Validation(
                "duration_minutes must be >= 15".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services SET
                name = $2, description = $3, category = $4,
                price = $5, duration_minutes = $6, active = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.name.as_ref().unwrap_or(&current.name))
        .bind(data.description.as_ref().or(current.description.as_ref()))
        .bind(data.category.as_ref().or(current.category.as_ref()))
        .bind(price)
        .bind(duration)
        .bind(data.active.unwrap_or(current.active))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete a service
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Service with id {} not found", id)));
        }
        Ok(())
    }
}
