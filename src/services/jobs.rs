//! Lifecycle jobs, entry points for an external time-based trigger
//!
//! There is no internal scheduler: each job is invoked over HTTP at fixed
//! times of day and runs to completion. Every job is safe to re-run, and
//! batch jobs continue past per-item failures, reporting aggregate counts.

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::AppResult,
    models::enums::NotificationType,
    models::notification::NewNotification,
    repository::Repository,
    services::email::EmailService,
};

#[derive(Clone)]
pub struct JobsService {
    repository: Repository,
    email: EmailService,
    notification_retention_days: i64,
}

impl JobsService {
    pub fn new(repository: Repository, email: EmailService, notification_retention_days: i64) -> Self {
        Self {
            repository,
            email,
            notification_retention_days,
        }
    }

    /// Send reminders for every confirmed reservation dated tomorrow.
    /// Returns the number of attempted reminders.
    pub async fn send_reminders(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let tomorrow = now.date_naive() + Duration::days(1);
        let rows = self.repository.reservations.confirmed_on(tomorrow).await?;

        let mut attempted = 0u64;
        for row in &rows {
            attempted += 1;

            if let Err(e) = self
                .email
                .send_reminder(
                    &row.client_email,
                    &row.client_first_name,
                    &row.provider_name,
                    row.provider_address.as_deref(),
                    &row.service_name,
                    &row.date.to_string(),
                    &row.start_time.format("%H:%M").to_string(),
                )
                .await
            {
                tracing::warn!(reservation = row.reservation_id, "Reminder email failed: {}", e);
            }

            let notification = NewNotification {
                provider_id: row.provider_id,
                kind: NotificationType::Recordatorio,
                title: "Recordatorio de Reserva".to_string(),
                message: format!(
                    "Reserva manana a las {} ({})",
                    row.start_time.format("%H:%M"),
                    row.service_name
                ),
                reservation_id: Some(row.reservation_id),
            };
            if let Err(e) = self.repository.notifications.insert(&notification).await {
                tracing::warn!(reservation = row.reservation_id, "Reminder notification failed: {}", e);
            }
        }

        tracing::info!("Sent {} reminders for {}", attempted, tomorrow);
        Ok(attempted)
    }

    /// Mark every still-confirmed reservation dated yesterday as a no-show.
    /// Blind daily-granularity sweep; re-running is a no-op.
    pub async fn mark_no_shows(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let yesterday = now.date_naive() - Duration::days(1);
        let marked = self.repository.reservations.mark_no_shows(yesterday).await?;
        tracing::info!("Marked {} reservations as no-show for {}", marked, yesterday);
        Ok(marked)
    }

    /// Delete read notifications older than the configured retention
    pub async fn purge_notifications(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let cutoff = now - Duration::days(self.notification_retention_days);
        let deleted = self.repository.notifications.purge_read_before(cutoff).await?;
        tracing::info!("Purged {} read notifications older than {}", deleted, cutoff);
        Ok(deleted)
    }

    /// Send each active provider a summary of today's reservations.
    /// Providers with no reservations are skipped. Returns the number of
    /// providers notified.
    pub async fn daily_report(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let today = now.date_naive();
        let provider_ids = self.repository.providers.list_active_ids().await?;

        let mut notified = 0u64;
        for provider_id in provider_ids {
            let rows = match self.repository.reservations.report_rows(provider_id, today).await {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!(provider = provider_id, "Report query failed: {}", e);
                    continue;
                }
            };
            if rows.is_empty() {
                continue;
            }

            let provider = match self.repository.providers.get_by_id(provider_id).await {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(provider = provider_id, "Report provider lookup failed: {}", e);
                    continue;
                }
            };

            let mut message = format!(
                "Buenos dias,\n\nReporte de turnos para hoy {}:\n\nTotal de reservas: {}\n\nDetalle:\n",
                today, rows.len()
            );
            let mut income = rust_decimal::Decimal::ZERO;
            for row in &rows {
                message.push_str(&format!(
                    "[{}] {} - {} {}\n   Servicio: {}\n   Tel: {}\n",
                    row.status,
                    row.start_time.format("%H:%M"),
                    row.client_first_name,
                    row.client_last_name,
                    row.service_name,
                    row.client_phone.as_deref().unwrap_or("N/A"),
                ));
                if matches!(
                    row.status,
                    crate::models::ReservationStatus::Confirmada
                        | crate::models::ReservationStatus::Completada
                ) {
                    income += row.amount_paid;
                }
            }
            message.push_str(&format!("\nIngresos del dia: ${}\n", income));

            if let Err(e) = self
                .email
                .send_daily_report(&provider.contact_email, &today.to_string(), &message)
                .await
            {
                tracing::warn!(provider = provider_id, "Report email failed: {}", e);
            }

            let notification = NewNotification {
                provider_id,
                kind: NotificationType::Recordatorio,
                title: "Reporte Diario".to_string(),
                message: format!("Tienes {} reservas para hoy", rows.len()),
                reservation_id: None,
            };
            if let Err(e) = self.repository.notifications.insert(&notification).await {
                tracing::warn!(provider = provider_id, "Report notification failed: {}", e);
            }

            notified += 1;
        }

        tracing::info!("Daily report sent to {} providers", notified);
        Ok(notified)
    }
}
