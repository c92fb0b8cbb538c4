//! Public booking endpoints (no authentication)
//!
//! The availability read is advisory: the returned slots can go stale before
//! submission, and the admission controller re-validates at commit time.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::reservation::Reservation,
    services::booking::{BookingOutcome, BookingRequest},
    services::directory::BookingPage,
};

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    /// Agenda ID
    pub agenda_id: i32,
    /// Service ID
    pub service_id: i32,
    /// Date (YYYY-MM-DD)
    pub date: String,
}

/// Public reservation submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    pub provider_id: i32,
    #[validate(length(min = 1, max = 20))]
    pub dni: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub agenda_id: i32,
    pub service_id: i32,
    /// Date (YYYY-MM-DD)
    pub date: String,
    /// Start time (HH:MM), one of the advertised slots
    pub start_time: String,
}

/// Get the public booking page data for a provider slug
#[utoipa::path(
    get,
    path = "/public/{slug}",
    tag = "public",
    params(
        ("slug" = String, Path, description = "Provider slug")
    ),
    responses(
        (status = 200, description = "Booking page data", body = BookingPage),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn booking_page(
    State(state): State<crate::AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<BookingPage>> {
    let page = state.services.directory.booking_page(&slug).await?;
    Ok(Json(page))
}

/// List available slot start times for an agenda, date and service
#[utoipa::path(
    get,
    path = "/public/availability",
    tag = "public",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Free start times as HH:MM strings", body = Vec<String>),
        (status = 400, description = "Invalid date or closed agenda"),
        (status = 404, description = "Agenda or service not found")
    )
)]
pub async fn availability(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<String>>> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{}'", query.date)))?;

    let slots = state
        .services
        .availability
        .free_slots(query.agenda_id, query.service_id, date)
        .await?;
    Ok(Json(slots))
}

/// Submit a reservation for a free slot
#[utoipa::path(
    post,
    path = "/public/reservations",
    tag = "public",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = BookingOutcome),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Client is blocked"),
        (status = 404, description = "Provider, agenda or service not found"),
        (status = 409, description = "Slot no longer available")
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<BookingOutcome>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let date = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{}'", request.date)))?;
    let start_time = NaiveTime::parse_from_str(&request.start_time, "%H:%M")
        .map_err(|_| AppError::Validation(format!("Invalid start_time '{}'", request.start_time)))?;

    let outcome = state
        .services
        .booking
        .book(BookingRequest {
            provider_id: request.provider_id,
            dni: request.dni,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            agenda_id: request.agenda_id,
            service_id: request.service_id,
            date,
            start_time,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Look up a reservation by its public code (receipt lookup)
#[utoipa::path(
    get,
    path = "/public/reservations/{code}",
    tag = "public",
    params(
        ("code" = Uuid, Path, description = "Reservation code")
    ),
    responses(
        (status = 200, description = "Reservation", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn reservation_by_code(
    State(state): State<crate::AppState>,
    Path(code): Path<Uuid>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.booking.get_by_code(code).await?;
    Ok(Json(reservation))
}
