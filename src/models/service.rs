//! Service (bookable offering) model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A bookable offering with fixed price and duration.
///
/// Not tied to a specific agenda: any active service may be booked against
/// any active agenda of the same provider.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Service {
    pub id: i32,
    pub provider_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Price (>= 0)
    pub price: Decimal,
    /// Duration in minutes (>= 15)
    pub duration_minutes: i32,
    pub active: bool,
}

/// Create service request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateService {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Decimal,
    #[validate(range(min = 15))]
    pub duration_minutes: i32,
}

/// Update service request (partial)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateService {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub active: Option<bool>,
}
