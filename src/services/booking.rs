//! Reservation admission controller
//!
//! Turns a slot-selection request into a durable pending reservation,
//! enforcing blocklist, schedule and non-overlap invariants. The payment
//! preference step is deliberately non-atomic: a processor failure leaves
//! the reservation pending with no preference id, and the caller can tell
//! that apart from a failed admission.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::enums::{NotificationType, PaymentStatus, ReservationStatus},
    models::notification::NewNotification,
    models::reservation::Reservation,
    repository::{clients::ClientContact, Repository},
    services::email::EmailService,
    services::payments::{PaymentPreference, PaymentsService},
};

/// A public booking submission
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub provider_id: i32,
    pub dni: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub agenda_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

/// Outcome of a successful admission
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingOutcome {
    pub reservation: Reservation,
    /// Checkout data when the provider has a payment processor configured
    /// and the preference was created
    pub payment: Option<PaymentPreference>,
    /// True when a processor was configured but the preference call failed;
    /// the reservation stands and payment is reconciled manually
    pub payment_init_failed: bool,
}

#[derive(Clone)]
pub struct BookingService {
    repository: Repository,
    payments: PaymentsService,
    email: EmailService,
}

impl BookingService {
    pub fn new(repository: Repository, payments: PaymentsService, email: EmailService) -> Self {
        Self {
            repository,
            payments,
            email,
        }
    }

    /// Admit a booking request
    pub async fn book(&self, request: BookingRequest) -> AppResult<BookingOutcome> {
        let provider = self.repository.providers.get_by_id(request.provider_id).await?;
        if !provider.active {
            return Err(AppError::NotFound(format!(
                "Provider with id {} not found",
                provider.id
            )));
        }

        let agenda = self.repository.agendas.get_by_id(request.agenda_id).await?;
        let service = self.repository.services.get_by_id(request.service_id).await?;

        if agenda.provider_id != provider.id || service.provider_id != provider.id {
            return Err(AppError::Validation(
                "Agenda and service must belong to the provider".to_string(),
            ));
        }
        if !service.active {
            return Err(AppError::Validation("Service is not active".to_string()));
        }
        if !agenda.is_open_on(request.date) {
            return Err(AppError::Validation(format!(
                "Agenda is not open on {}",
                request.date
            )));
        }
        if request.date < Utc::now().date_naive() {
            return Err(AppError::Validation("Date is in the past".to_string()));
        }

        let (end_time, wrapped) = request
            .start_time
            .overflowing_add_signed(Duration::minutes(service.duration_minutes as i64));
        let (open, close) = agenda.opening_interval();
        if wrapped != 0 || request.start_time < open || end_time > close {
            return Err(AppError::Validation(format!(
                "Requested time {} does not fit the opening hours",
                request.start_time.format("%H:%M")
            )));
        }

        // Idempotent upsert keyed by (provider, DNI)
        let client = self
            .repository
            .clients
            .find_or_create(
                provider.id,
                &request.dni,
                &ClientContact {
                    first_name: request.first_name.clone(),
                    last_name: request.last_name.clone(),
                    email: request.email.clone(),
                    phone: request.phone.clone(),
                },
            )
            .await?;

        if client.blocked {
            return Err(AppError::ClientBlocked(
                "Client is blocked by this provider".to_string(),
            ));
        }

        let total_amount = service.price;
        let amount_due = if provider.requires_full_payment {
            total_amount
        } else {
            total_amount * provider.deposit_percentage / Decimal::from(100)
        };

        // Commit-time overlap re-check lives inside create_checked
        let reservation = self
            .repository
            .reservations
            .create_checked(
                agenda.id,
                client.id,
                service.id,
                request.date,
                request.start_time,
                end_time,
                total_amount,
            )
            .await?;

        let mut payment = None;
        let mut payment_init_failed = false;

        if provider.has_payment_processor() {
            let token = provider.mp_access_token.as_deref().unwrap_or_default();
            let title = format!("{} - {}", service.name, provider.business_name);
            match self
                .payments
                .create_preference(token, &title, amount_due, &reservation.code.to_string())
                .await
            {
                Ok(preference) => {
                    self.repository
                        .reservations
                        .set_preference_id(reservation.id, &preference.id)
                        .await?;
                    payment = Some(preference);
                }
                Err(e) => {
                    // Reservation stands; payment state is reconciled manually
                    tracing::warn!(
                        reservation = reservation.id,
                        "Payment preference creation failed: {}",
                        e
                    );
                    payment_init_failed = true;
                }
            }
        }

        let reservation = match payment {
            Some(_) => self.repository.reservations.get_by_id(reservation.id).await?,
            None => reservation,
        };

        Ok(BookingOutcome {
            reservation,
            payment,
            payment_init_failed,
        })
    }

    /// Look up a reservation by its public code
    pub async fn get_by_code(&self, code: uuid::Uuid) -> AppResult<Reservation> {
        self.repository.reservations.get_by_code(code).await
    }

    /// Look up a reservation by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Reservation> {
        self.repository.reservations.get_by_id(id).await
    }

    /// List a provider's reservations with optional filters
    pub async fn list_for_provider(
        &self,
        provider_id: i32,
        query: &crate::models::reservation::ReservationQuery,
    ) -> AppResult<Vec<crate::models::reservation::ReservationDetails>> {
        self.repository.providers.get_by_id(provider_id).await?;
        self.repository.reservations.list_for_provider(provider_id, query).await
    }

    /// Confirm a pending reservation once payment came through.
    ///
    /// Stands in for the processor webhook: records the payment reference
    /// and amount, then raises the provider notification and the client
    /// confirmation email, both best-effort.
    pub async fn confirm(
        &self,
        reservation_id: i32,
        payment_id: &str,
        amount: Decimal,
    ) -> AppResult<Reservation> {
        let reservation = self.repository.reservations.get_by_id(reservation_id).await?;
        if reservation.status != ReservationStatus::Pendiente {
            return Err(AppError::Conflict(format!(
                "Reservation is {}, only pending reservations can be confirmed",
                reservation.status
            )));
        }

        let payment_status = if reservation.amount_paid + amount >= reservation.total_amount {
            PaymentStatus::Total
        } else {
            PaymentStatus::Sena
        };

        let reservation = self
            .repository
            .reservations
            .confirm(reservation_id, payment_id, amount, payment_status)
            .await?;

        let agenda = self.repository.agendas.get_by_id(reservation.agenda_id).await?;
        let provider = self.repository.providers.get_by_id(agenda.provider_id).await?;
        let client = self.repository.clients.get_by_id(reservation.client_id).await?;
        let service = self.repository.services.get_by_id(reservation.service_id).await?;

        if let Err(e) = self
            .email
            .send_booking_confirmation(
                &client.email,
                &client.first_name,
                &provider.business_name,
                provider.address.as_deref(),
                &service.name,
                &reservation.date.to_string(),
                &reservation.start_time.format("%H:%M").to_string(),
                &reservation.code.to_string(),
                provider.refund_cancellation_hours,
            )
            .await
        {
            tracing::warn!(reservation = reservation.id, "Confirmation email failed: {}", e);
        }

        let notification = NewNotification {
            provider_id: provider.id,
            kind: NotificationType::NuevaReserva,
            title: "Nueva Reserva".to_string(),
            message: format!(
                "Nueva reserva de {} {} para {}",
                client.first_name, client.last_name, service.name
            ),
            reservation_id: Some(reservation.id),
        };
        if let Err(e) = self.repository.notifications.insert(&notification).await {
            tracing::warn!(reservation = reservation.id, "Notification creation failed: {}", e);
        }

        Ok(reservation)
    }
}
