//! Client (provider-scoped customer record) model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::reservation::Reservation;

/// Customer record scoped to one provider.
///
/// DNI uniqueness is enforced per provider, not globally.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub id: i32,
    pub provider_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// National ID, unique within the provider
    pub dni: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub blocked: bool,
    pub registered_at: DateTime<Utc>,
    pub last_visit: Option<DateTime<Utc>>,
}

/// Create client request (provider-initiated pre-registration)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClient {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 20))]
    pub dni: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Client detail with booking history and aggregate spend
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientDetails {
    #[serde(flatten)]
    pub client: Client,
    pub reservations: Vec<Reservation>,
    /// Sum of amount_paid over confirmed/completed reservations
    pub total_spent: Decimal,
}

/// Query parameters for client listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ClientQuery {
    /// Free-text search over name, surname, DNI and email
    pub q: Option<String>,
}
