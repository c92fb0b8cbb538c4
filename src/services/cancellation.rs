//! Cancellation flow and refund policy
//!
//! Refund eligibility is a pure function of the reservation's scheduled
//! moment, the current time and the provider's configured threshold. The
//! refund call itself only proceeds when a processor payment id is recorded;
//! otherwise the cancellation completes without a refund attempt.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::enums::NotificationType,
    models::notification::NewNotification,
    models::reservation::Reservation,
    repository::Repository,
    services::{email::EmailService, payments::PaymentsService},
};

/// True iff the fractional hours until the scheduled moment reach the
/// provider's refund threshold.
pub fn refund_eligible(scheduled: NaiveDateTime, now: DateTime<Utc>, refund_hours: i32) -> bool {
    let remaining = scheduled.signed_duration_since(now.naive_utc());
    let hours_until = remaining.num_seconds() as f64 / 3600.0;
    hours_until >= refund_hours as f64
}

#[derive(Clone)]
pub struct CancellationService {
    repository: Repository,
    payments: PaymentsService,
    email: EmailService,
}

impl CancellationService {
    pub fn new(repository: Repository, payments: PaymentsService, email: EmailService) -> Self {
        Self {
            repository,
            payments,
            email,
        }
    }

    /// Cancel a reservation, attempting a refund when the policy allows it.
    ///
    /// The refund, email and notification steps are all best-effort: the
    /// cancellation persists even when every one of them fails.
    pub async fn cancel(&self, reservation_id: i32, reason: Option<&str>) -> AppResult<Reservation> {
        let reservation = self.repository.reservations.get_by_id(reservation_id).await?;
        if reservation.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "Reservation is already {}",
                reservation.status
            )));
        }

        let now = Utc::now();
        let reservation = self
            .repository
            .reservations
            .cancel(reservation_id, now, reason)
            .await?;

        let agenda = self.repository.agendas.get_by_id(reservation.agenda_id).await?;
        let provider = self.repository.providers.get_by_id(agenda.provider_id).await?;
        let client = self.repository.clients.get_by_id(reservation.client_id).await?;
        let service = self.repository.services.get_by_id(reservation.service_id).await?;

        if let Err(e) = self.try_refund(&reservation, &provider, &client, now).await {
            tracing::warn!(reservation = reservation.id, "Refund attempt failed: {}", e);
        }

        if let Err(e) = self
            .email
            .send_cancellation(
                &client.email,
                &client.first_name,
                &provider.business_name,
                &service.name,
                &reservation.date.to_string(),
                &reservation.start_time.format("%H:%M").to_string(),
                &reservation.code.to_string(),
                reason,
            )
            .await
        {
            tracing::warn!(reservation = reservation.id, "Cancellation email failed: {}", e);
        }

        let notification = NewNotification {
            provider_id: provider.id,
            kind: NotificationType::Cancelacion,
            title: "Reserva Cancelada".to_string(),
            message: format!(
                "La reserva del {} a las {} fue cancelada. Motivo: {}",
                reservation.date,
                reservation.start_time.format("%H:%M"),
                reason.unwrap_or("-")
            ),
            reservation_id: Some(reservation.id),
        };
        if let Err(e) = self.repository.notifications.insert(&notification).await {
            tracing::warn!(reservation = reservation.id, "Notification creation failed: {}", e);
        }

        self.repository.reservations.get_by_id(reservation.id).await
    }

    /// Explicit refund retry for manual reconciliation
    pub async fn retry_refund(&self, reservation_id: i32) -> AppResult<Reservation> {
        let reservation = self.repository.reservations.get_by_id(reservation_id).await?;
        let agenda = self.repository.agendas.get_by_id(reservation.agenda_id).await?;
        let provider = self.repository.providers.get_by_id(agenda.provider_id).await?;
        let client = self.repository.clients.get_by_id(reservation.client_id).await?;

        self.try_refund(&reservation, &provider, &client, Utc::now()).await?;
        self.repository.reservations.get_by_id(reservation_id).await
    }

    async fn try_refund(
        &self,
        reservation: &Reservation,
        provider: &crate::models::Provider,
        client: &crate::models::Client,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let payment_id = match reservation.mp_payment_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => return Ok(()),
        };

        let scheduled = reservation.date.and_time(reservation.start_time);
        if !refund_eligible(scheduled, now, provider.refund_cancellation_hours) {
            tracing::info!(
                reservation = reservation.id,
                "Refund skipped: outside the {}h cancellation window",
                provider.refund_cancellation_hours
            );
            return Ok(());
        }

        let token = provider.mp_access_token.as_deref().unwrap_or_default();
        self.payments.refund(token, payment_id).await?;
        self.repository.reservations.mark_refunded(reservation.id).await?;

        if let Err(e) = self
            .email
            .send_refund_notice(
                &client.email,
                &client.first_name,
                &provider.business_name,
                &reservation.code.to_string(),
                &reservation.amount_paid.to_string(),
            )
            .await
        {
            tracing::warn!(reservation = reservation.id, "Refund email failed: {}", e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn refund_granted_outside_threshold() {
        let now = Utc::now();
        let scheduled = now.naive_utc() + Duration::hours(25);
        assert!(refund_eligible(scheduled, now, 24));
    }

    #[test]
    fn refund_denied_inside_threshold() {
        let now = Utc::now();
        let scheduled = now.naive_utc() + Duration::hours(23);
        assert!(!refund_eligible(scheduled, now, 24));
    }

    #[test]
    fn refund_boundary_is_inclusive() {
        let now = Utc::now();
        let scheduled = now.naive_utc() + Duration::hours(24);
        assert!(refund_eligible(scheduled, now, 24));
    }

    #[test]
    fn past_reservation_is_never_eligible() {
        let now = Utc::now();
        let scheduled = now.naive_utc() - Duration::hours(1);
        assert!(!refund_eligible(scheduled, now, 24));
    }
}
