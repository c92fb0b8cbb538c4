//! Reservation management endpoints (provider dashboard)

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::reservation::{
        CancelReservation, ConfirmReservation, Reservation, ReservationDetails, ReservationQuery,
    },
};

/// List a provider's reservations with optional filters
#[utoipa::path(
    get,
    path = "/providers/{id}/reservations",
    tag = "reservations",
    params(
        ("id" = i32, Path, description = "Provider ID"),
        ReservationQuery
    ),
    responses(
        (status = 200, description = "Provider's reservations", body = Vec<ReservationDetails>),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
    Query(query): Query<ReservationQuery>,
) -> AppResult<Json<Vec<ReservationDetails>>> {
    let reservations = state
        .services
        .booking
        .list_for_provider(provider_id, &query)
        .await?;
    Ok(Json(reservations))
}

/// Get a reservation by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    params(
        ("id" = i32, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.booking.get_by_id(id).await?;
    Ok(Json(reservation))
}

/// Cancel a reservation, attempting a refund when the policy allows it
#[utoipa::path(
    post,
    path = "/reservations/{id}/cancel",
    tag = "reservations",
    params(
        ("id" = i32, Path, description = "Reservation ID")
    ),
    request_body = CancelReservation,
    responses(
        (status = 200, description = "Reservation cancelled", body = Reservation),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation already in a terminal state")
    )
)]
pub async fn cancel_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CancelReservation>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .services
        .cancellation
        .cancel(id, request.reason.as_deref())
        .await?;
    Ok(Json(reservation))
}

/// Confirm a pending reservation (payment confirmation stand-in)
#[utoipa::path(
    post,
    path = "/reservations/{id}/confirm",
    tag = "reservations",
    params(
        ("id" = i32, Path, description = "Reservation ID")
    ),
    request_body = ConfirmReservation,
    responses(
        (status = 200, description = "Reservation confirmed", body = Reservation),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation not pending")
    )
)]
pub async fn confirm_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ConfirmReservation>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .services
        .booking
        .confirm(id, &request.payment_id, request.amount)
        .await?;
    Ok(Json(reservation))
}

/// Retry a refund for manual reconciliation
#[utoipa::path(
    post,
    path = "/reservations/{id}/refund",
    tag = "reservations",
    params(
        ("id" = i32, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Refund processed", body = Reservation),
        (status = 404, description = "Reservation not found"),
        (status = 502, description = "Payment processor failure")
    )
)]
pub async fn refund_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.cancellation.retry_refund(id).await?;
    Ok(Json(reservation))
}
