//! Reservations repository: the booking ledger
//!
//! Admission is guarded here. `create_checked` re-validates interval overlap
//! inside a transaction that locks the agenda row, so at most one reservation
//! can claim a given interval no matter how stale the availability read was.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::enums::{PaymentStatus, ReservationStatus},
    models::reservation::{Reservation, ReservationDetails, ReservationQuery},
};

/// Joined row used by the daily reminder job
#[derive(Debug, Clone, FromRow)]
pub struct ReminderRow {
    pub reservation_id: i32,
    pub code: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub client_first_name: String,
    pub client_email: String,
    pub service_name: String,
    pub provider_id: i32,
    pub provider_name: String,
    pub provider_address: Option<String>,
}

/// Joined row used by the per-provider daily report
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub start_time: NaiveTime,
    pub status: ReservationStatus,
    pub client_first_name: String,
    pub client_last_name: String,
    pub client_phone: Option<String>,
    pub service_name: String,
    pub amount_paid: Decimal,
}

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get reservation by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Get reservation by its public code
    pub async fn get_by_code(&self, code: Uuid) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", code)))
    }

    /// Busy [start,end) intervals on an agenda/date, pending or confirmed only
    pub async fn busy_intervals(
        &self,
        agenda_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<(NaiveTime, NaiveTime)>> {
        let rows: Vec<(NaiveTime, NaiveTime)> = sqlx::query_as(
            r#"
            SELECT start_time, end_time FROM reservations
            WHERE agenda_id = $1 AND date = $2
              AND status IN ('pendiente', 'confirmada')
            ORDER BY start_time
            "#,
        )
        .bind(agenda_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a pending reservation, failing with SlotConflict if the
    /// requested interval is no longer free.
    ///
    /// The agenda row lock serializes concurrent admissions on the same
    /// agenda; the overlap re-check then sees every committed competitor.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_checked(
        &self,
        agenda_id: i32,
        client_id: i32,
        service_id: i32,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        total_amount: Decimal,
    ) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<i32> = sqlx::query_scalar("SELECT id FROM agendas WHERE id = $1 FOR UPDATE")
            .bind(agenda_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(AppError::NotFound(format!("Agenda with id {} not found", agenda_id)));
        }

        // Half-open interval intersection against live bookings
        let occupied: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservations
                WHERE agenda_id = $1 AND date = $2
                  AND status IN ('pendiente', 'confirmada')
                  AND NOT ($4 <= start_time OR $3 >= end_time)
            )
            "#,
        )
        .bind(agenda_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .fetch_one(&mut *tx)
        .await?;

        if occupied {
            return Err(AppError::SlotConflict(format!(
                "Slot {} on {} is no longer available",
                start_time.format("%H:%M"),
                date
            )));
        }

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (
                code, agenda_id, client_id, service_id, date,
                start_time, end_time, total_amount
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(agenda_id)
        .bind(client_id)
        .bind(service_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .bind(total_amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(reservation)
    }

    /// Store the payment preference id returned by the processor
    pub async fn set_preference_id(&self, id: i32, preference_id: &str) -> AppResult<()> {
        sqlx::query("UPDATE reservations SET mp_preference_id = $2 WHERE id = $1")
            .bind(id)
            .bind(preference_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// List reservations for a provider with optional date/status filters
    pub async fn list_for_provider(
        &self,
        provider_id: i32,
        query: &ReservationQuery,
    ) -> AppResult<Vec<ReservationDetails>> {
        let rows = sqlx::query_as::<_, ReservationDetails>(
            r#"
            SELECT r.*, c.first_name AS client_first_name, c.last_name AS client_last_name,
                   c.phone AS client_phone, s.name AS service_name
            FROM reservations r
            JOIN agendas a ON r.agenda_id = a.id
            JOIN clients c ON r.client_id = c.id
            JOIN services s ON r.service_id = s.id
            WHERE a.provider_id = $1
              AND ($2::date IS NULL OR r.date >= $2)
              AND ($3::date IS NULL OR r.date <= $3)
              AND ($4::reservation_status IS NULL OR r.status = $4)
            ORDER BY r.date DESC, r.start_time DESC
            "#,
        )
        .bind(provider_id)
        .bind(query.date_from)
        .bind(query.date_to)
        .bind(query.status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Mark a reservation cancelled, recording timestamp and reason
    pub async fn cancel(
        &self,
        id: i32,
        cancelled_at: DateTime<Utc>,
        reason: Option<&str>,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = 'cancelada', cancelled_at = $2, cancellation_reason = COALESCE($3, '')
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(cancelled_at)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Confirm a reservation after payment, recording what was collected
    pub async fn confirm(
        &self,
        id: i32,
        payment_id: &str,
        amount: Decimal,
        payment_status: PaymentStatus,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = 'confirmada', payment_status = $4,
                mp_payment_id = $2, amount_paid = amount_paid + $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payment_id)
        .bind(amount)
        .bind(payment_status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Record that the paid amount was refunded
    pub async fn mark_refunded(&self, id: i32) -> AppResult<()> {
        sqlx::query("UPDATE reservations SET payment_status = 'devuelto' WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Confirmed reservations on a date, with contact details for reminders
    pub async fn confirmed_on(&self, date: NaiveDate) -> AppResult<Vec<ReminderRow>> {
        let rows = sqlx::query_as::<_, ReminderRow>(
            r#"
            SELECT r.id AS reservation_id, r.code, r.date, r.start_time,
                   c.first_name AS client_first_name, c.email AS client_email,
                   s.name AS service_name,
                   p.id AS provider_id, p.business_name AS provider_name,
                   p.address AS provider_address
            FROM reservations r
            JOIN clients c ON r.client_id = c.id
            JOIN services s ON r.service_id = s.id
            JOIN agendas a ON r.agenda_id = a.id
            JOIN providers p ON a.provider_id = p.id
            WHERE r.date = $1 AND r.status = 'confirmada'
            ORDER BY r.start_time
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Blind sweep: every reservation on the date still confirmed is presumed
    /// unattended. Re-running is a no-op on already-transitioned rows.
    pub async fn mark_no_shows(&self, date: NaiveDate) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE reservations SET status = 'no_asistio' WHERE date = $1 AND status = 'confirmada'",
        )
        .bind(date)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// A provider's reservations on a date, for the daily report
    pub async fn report_rows(&self, provider_id: i32, date: NaiveDate) -> AppResult<Vec<ReportRow>> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT r.start_time, r.status,
                   c.first_name AS client_first_name, c.last_name AS client_last_name,
                   c.phone AS client_phone, s.name AS service_name, r.amount_paid
            FROM reservations r
            JOIN agendas a ON r.agenda_id = a.id
            JOIN clients c ON r.client_id = c.id
            JOIN services s ON r.service_id = s.id
            WHERE a.provider_id = $1 AND r.date = $2
            ORDER BY r.start_time
            "#,
        )
        .bind(provider_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Count a provider's confirmed reservations on a date
    pub async fn count_confirmed_on(&self, provider_id: i32, date: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM reservations r
            JOIN agendas a ON r.agenda_id = a.id
            WHERE a.provider_id = $1 AND r.date = $2 AND r.status = 'confirmada'
            "#,
        )
        .bind(provider_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count a provider's pending reservations
    pub async fn count_pending(&self, provider_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM reservations r
            JOIN agendas a ON r.agenda_id = a.id
            WHERE a.provider_id = $1 AND r.status = 'pendiente'
            "#,
        )
        .bind(provider_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Collected income over confirmed/completed reservations in a month
    pub async fn month_income(&self, provider_id: i32, year: i32, month: u32) -> AppResult<Decimal> {
        let income: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(r.amount_paid), 0) FROM reservations r
            JOIN agendas a ON r.agenda_id = a.id
            WHERE a.provider_id = $1
              AND EXTRACT(YEAR FROM r.date) = $2
              AND EXTRACT(MONTH FROM r.date) = $3
              AND r.status IN ('confirmada', 'completada')
            "#,
        )
        .bind(provider_id)
        .bind(year)
        .bind(month as i32)
        .fetch_one(&self.pool)
        .await?;
        Ok(income)
    }

    /// Upcoming confirmed reservations for the provider dashboard
    pub async fn upcoming(
        &self,
        provider_id: i32,
        from: NaiveDate,
        limit: i64,
    ) -> AppResult<Vec<ReservationDetails>> {
        let rows = sqlx::query_as::<_, ReservationDetails>(
            r#"
            SELECT r.*, c.first_name AS client_first_name, c.last_name AS client_last_name,
                   c.phone AS client_phone, s.name AS service_name
            FROM reservations r
            JOIN agendas a ON r.agenda_id = a.id
            JOIN clients c ON r.client_id = c.id
            JOIN services s ON r.service_id = s.id
            WHERE a.provider_id = $1 AND r.date >= $2 AND r.status = 'confirmada'
            ORDER BY r.date, r.start_time
            LIMIT $3
            "#,
        )
        .bind(provider_id)
        .bind(from)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
