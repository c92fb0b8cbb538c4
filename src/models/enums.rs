//! Shared domain enums
//!
//! Wire names keep the Spanish labels used by the booking frontend
//! ("pendiente", "no_asistio", ...), mapped onto Postgres enum types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// ReservationStatus
// ---------------------------------------------------------------------------

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reservation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pendiente,
    Confirmada,
    Cancelada,
    Completada,
    NoAsistio,
}

impl ReservationStatus {
    /// Statuses that occupy a slot on the agenda
    pub fn blocks_slot(self) -> bool {
        matches!(self, ReservationStatus::Pendiente | ReservationStatus::Confirmada)
    }

    /// Terminal statuses are never reused
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReservationStatus::Cancelada | ReservationStatus::Completada | ReservationStatus::NoAsistio
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReservationStatus::Pendiente => "pendiente",
            ReservationStatus::Confirmada => "confirmada",
            ReservationStatus::Cancelada => "cancelada",
            ReservationStatus::Completada => "completada",
            ReservationStatus::NoAsistio => "no_asistio",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// PaymentStatus
// ---------------------------------------------------------------------------

/// Payment state of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing paid yet
    Pendiente,
    /// Deposit paid
    Sena,
    /// Paid in full
    Total,
    /// Refunded
    Devuelto,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentStatus::Pendiente => "pendiente",
            PaymentStatus::Sena => "sena",
            PaymentStatus::Total => "total",
            PaymentStatus::Devuelto => "devuelto",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// NotificationType
// ---------------------------------------------------------------------------

/// Advisory notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NuevaReserva,
    Cancelacion,
    Recordatorio,
    Pago,
}
