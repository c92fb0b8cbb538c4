//! Reservation model and related types

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::enums::{PaymentStatus, ReservationStatus};

/// Reservation model from database.
///
/// `end_time` is computed from the service duration at creation and never
/// recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    /// Opaque public code for lookup and receipts
    pub code: Uuid,
    pub agenda_id: i32,
    pub client_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: ReservationStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    /// Payment processor reference, set by payment confirmation
    pub mp_payment_id: Option<String>,
    /// Payment processor checkout preference, set at admission
    pub mp_preference_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
}

/// Reservation with client and service names for listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ReservationDetails {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub reservation: Reservation,
    pub client_first_name: String,
    pub client_last_name: String,
    pub client_phone: Option<String>,
    pub service_name: String,
}

/// Cancel reservation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CancelReservation {
    /// Free-text cancellation reason
    pub reason: Option<String>,
}

/// Confirm reservation request (payment-webhook stand-in)
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmReservation {
    /// Payment processor payment identifier
    pub payment_id: String,
    /// Amount actually collected by the processor
    pub amount: Decimal,
}

/// Query parameters for reservation listings
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReservationQuery {
    /// Filter from this date (YYYY-MM-DD)
    pub date_from: Option<NaiveDate>,
    /// Filter until this date (YYYY-MM-DD)
    pub date_to: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
}
