//! Agendas repository for database operations

use chrono::NaiveTime;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::agenda::{Agenda, CreateAgenda, UpdateAgenda},
};

fn parse_time(value: &str, field: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("Invalid {} '{}'", field, value)))
}

/// An agenda with no active weekday can never be booked
fn ensure_open_weekday(days: &[bool; 7]) -> AppResult<()> {
    if days.iter().any(|&d| d) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "At least one weekday must be active".to_string(),
        ))
    }
}

#[derive(Clone)]
pub struct AgendasRepository {
    pool: Pool<Postgres>,
}

impl AgendasRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get agenda by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Agenda> {
        sqlx::query_as::<_, Agenda>("SELECT * FROM agendas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Agenda with id {} not found", id)))
    }

    /// List agendas for a provider
    pub async fn list_for_provider(&self, provider_id: i32) -> AppResult<Vec<Agenda>> {
        let rows = sqlx::query_as::<_, Agenda>(
            "SELECT * FROM agendas WHERE provider_id = $1 ORDER BY name",
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List active agendas for a provider (public booking page)
    pub async fn list_active_for_provider(&self, provider_id: i32) -> AppResult<Vec<Agenda>> {
        let rows = sqlx::query_as::<_, Agenda>(
            "SELECT * FROM agendas WHERE provider_id = $1 AND active = TRUE ORDER BY name",
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create an agenda
    pub async fn create(&self, provider_id: i32, data: &CreateAgenda) -> AppResult<Agenda> {
        let open = parse_time(&data.open_time, "open_time")?;
        let close = parse_time(&data.close_time, "close_time")?;
        if close <= open {
            return Err(AppError::Validation(
                "close_time must be after open_time".to_string(),
            ));
        }

        // Mon-Fri default open, weekend default closed
        let days = [
            data.monday.unwrap_or(true),
            data.tuesday.unwrap_or(true),
            data.wednesday.unwrap_or(true),
            data.thursday.unwrap_or(true),
            data.friday.unwrap_or(true),
            data.saturday.unwrap_or(false),
            data.sunday.unwrap_or(false),
        ];
        ensure_open_weekday(&days)?;

        let row = sqlx::query_as::<_, Agenda>(
            r#"
            INSERT INTO agendas (
                provider_id, name, description, open_time, close_time,
                monday, tuesday, wednesday, thursday, friday, saturday, sunday
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(provider_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(open)
        .bind(close)
        .bind(days[0])
        .bind(days[1])
        .bind(days[2])
        .bind(days[3])
        .bind(days[4])
        .bind(days[5])
        .bind(days[6])
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an agenda (partial)
    pub async fn update(&self, id: i32, data: &UpdateAgenda) -> AppResult<Agenda> {
        let current = self.get_by_id(id).await?;

        let open = match &data.open_time {
            Some(v) => parse_time(v, "open_time")?,
            None => current.open_time,
        };
        let close = match &data.close_time {
            Some(v) => parse_time(v, "close_time")?,
            None => current.close_time,
        };
        if close <= open {
            return Err(AppError::Validation(
                "close_time must be after open_time".to_string(),
            ));
        }

        let days = [
            data.monday.unwrap_or(current.monday),
            data.tuesday.unwrap_or(current.tuesday),
            data.wednesday.unwrap_or(current.wednesday),
            data.thursday.unwrap_or(current.thursday),
            data.friday.unwrap_or(current.friday),
            data.saturday.unwrap_or(current.saturday),
            data.sunday.unwrap_or(current.sunday),
        ];
        ensure_open_weekday(&days)?;

        let row = sqlx::query_as::<_, Agenda>(
            r#"
            UPDATE agendas SET
                name = $2, description = $3, open_time = $4, close_time = $5,
                monday = $6, tuesday = $7, wednesday = $8, thursday = $9,
                friday = $10, saturday = $11, sunday = $12, active = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.name.as_ref().unwrap_or(&current.name))
        .bind(data.description.as_ref().or(current.description.as_ref()))
        .bind(open)
        .bind(close)
        .bind(days[0])
        .bind(days[1])
        .bind(days[2])
        .bind(days[3])
        .bind(days[4])
        .bind(days[5])
        .bind(days[6])
        .bind(data.active.unwrap_or(current.active))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete an agenda
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM agendas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Agenda with id {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minute_and_second_forms() {
        assert_eq!(
            parse_time("09:30", "open_time").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("09:30:00", "open_time").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert!(parse_time("930", "open_time").is_err());
    }

    #[test]
    fn week_with_one_open_day_is_accepted() {
        let mut days = [false; 7];
        days[3] = true;
        assert!(ensure_open_weekday(&days).is_ok());
    }

    #[test]
    fn fully_closed_week_is_rejected() {
        let err = ensure_open_weekday(&[false; 7]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
