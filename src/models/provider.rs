//! Provider (prestador) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Provider model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Provider {
    pub id: i32,
    /// Unique public booking-page slug
    pub slug: String,
    pub business_name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub contact_email: String,
    /// Payment processor access token (never exposed publicly)
    #[serde(skip_serializing)]
    pub mp_access_token: Option<String>,
    pub mp_public_key: Option<String>,
    /// When true the full service price is charged up front
    pub requires_full_payment: bool,
    /// Deposit percentage (0-100) charged when full payment is not required
    pub deposit_percentage: Decimal,
    /// Cancelling at least this many hours ahead grants a refund
    pub refund_cancellation_hours: i32,
    /// Advisory minimum notice shown on the booking page
    pub no_refund_cancellation_hours: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Provider {
    /// Whether a payment processor is configured for this provider
    pub fn has_payment_processor(&self) -> bool {
        self.mp_access_token.as_deref().map(|t| !t.is_empty()).unwrap_or(false)
    }
}

/// Public view of a provider for the booking page (no credentials)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ProviderPublic {
    pub id: i32,
    pub slug: String,
    pub business_name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub requires_full_payment: bool,
    pub deposit_percentage: Decimal,
    pub refund_cancellation_hours: i32,
    pub no_refund_cancellation_hours: i32,
    pub mp_public_key: Option<String>,
}

/// Create provider request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProvider {
    #[validate(length(min = 2, max = 100))]
    pub slug: String,
    #[validate(length(min = 1, max = 200))]
    pub business_name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    #[validate(email)]
    pub contact_email: String,
    pub mp_access_token: Option<String>,
    pub mp_public_key: Option<String>,
    pub requires_full_payment: Option<bool>,
    pub deposit_percentage: Option<Decimal>,
    pub refund_cancellation_hours: Option<i32>,
    pub no_refund_cancellation_hours: Option<i32>,
}

/// Update provider request (partial)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProvider {
    pub business_name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub mp_access_token: Option<String>,
    pub mp_public_key: Option<String>,
    pub requires_full_payment: Option<bool>,
    pub deposit_percentage: Option<Decimal>,
    pub refund_cancellation_hours: Option<i32>,
    pub no_refund_cancellation_hours: Option<i32>,
    pub active: Option<bool>,
}
