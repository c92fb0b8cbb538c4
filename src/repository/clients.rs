//! Clients repository for database operations

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, ClientDetails, CreateClient},
    models::reservation::Reservation,
};

/// Contact details supplied with a public booking request, used when the
/// client does not exist yet for this provider.
#[derive(Debug, Clone)]
pub struct ClientContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Clone)]
pub struct ClientsRepository {
    pool: Pool<Postgres>,
}

impl ClientsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get client by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Client> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client with id {} not found", id)))
    }

    /// Find a client by (provider, DNI), creating it if absent.
    ///
    /// Race-safe: concurrent first-time bookings with the same DNI hit the
    /// (provider_id, dni) unique constraint; ON CONFLICT DO NOTHING plus the
    /// follow-up select make both callers land on the same row.
    pub async fn find_or_create(
        &self,
        provider_id: i32,
        dni: &str,
        contact: &ClientContact,
    ) -> AppResult<Client> {
        let inserted = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (provider_id, dni, first_name, last_name, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (provider_id, dni) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(provider_id)
        .bind(dni)
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(client) = inserted {
            return Ok(client);
        }

        sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE provider_id = $1 AND dni = $2",
        )
        .bind(provider_id)
        .bind(dni)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Internal("Client upsert lost its row".to_string()))
    }

    /// List clients for a provider, optionally filtered by a search term
    pub async fn list_for_provider(
        &self,
        provider_id: i32,
        search: Option<&str>,
    ) -> AppResult<Vec<Client>> {
        let rows = match search {
            Some(q) => {
                let pattern = format!("%{}%", q);
                sqlx::query_as::<_, Client>(
                    r#"
                    SELECT * FROM clients
                    WHERE provider_id = $1
                      AND (first_name ILIKE $2 OR last_name ILIKE $2
                           OR dni ILIKE $2 OR email ILIKE $2)
                    ORDER BY registered_at DESC
                    "#,
                )
                .bind(provider_id)
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Client>(
                    "SELECT * FROM clients WHERE provider_id = $1 ORDER BY registered_at DESC",
                )
                .bind(provider_id)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Create a client explicitly (provider pre-registration)
    pub async fn create(&self, provider_id: i32, data: &CreateClient) -> AppResult<Client> {
        let row = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (
                provider_id, first_name, last_name, email, dni, phone, birth_date, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(provider_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.dni)
        .bind(&data.phone)
        .bind(data.birth_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Client with DNI '{}' already exists", data.dni))
            }
            _ => AppError::Database(e),
        })?;
        Ok(row)
    }

    /// Set or clear the blocked flag
    pub async fn set_blocked(&self, id: i32, blocked: bool) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            "UPDATE clients SET blocked = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(blocked)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client with id {} not found", id)))
    }

    /// Client detail with reservation history and total spend
    pub async fn get_details(&self, id: i32) -> AppResult<ClientDetails> {
        let client = self.get_by_id(id).await?;

        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE client_id = $1 ORDER BY date DESC, start_time DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let total_spent: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount_paid), 0)
            FROM reservations
            WHERE client_id = $1 AND status IN ('confirmada', 'completada')
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ClientDetails {
            client,
            reservations,
            total_spent,
        })
    }
}
