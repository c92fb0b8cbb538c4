//! Provider dashboard statistics

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::reservation::ReservationDetails,
    repository::Repository,
};

/// Headline numbers for a provider's dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    /// Confirmed reservations dated today
    pub reservations_today: i64,
    /// Reservations awaiting confirmation
    pub reservations_pending: i64,
    /// Income collected this month (confirmed + completed)
    pub month_income: Decimal,
    /// Next upcoming confirmed reservations
    pub upcoming: Vec<ReservationDetails>,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn dashboard(&self, provider_id: i32) -> AppResult<DashboardStats> {
        self.repository.providers.get_by_id(provider_id).await?;

        let today = Utc::now().date_naive();
        let reservations_today = self
            .repository
            .reservations
            .count_confirmed_on(provider_id, today)
            .await?;
        let reservations_pending = self.repository.reservations.count_pending(provider_id).await?;
        let month_income = self
            .repository
            .reservations
            .month_income(provider_id, today.year(), today.month())
            .await?;
        let upcoming = self.repository.reservations.upcoming(provider_id, today, 10).await?;

        Ok(DashboardStats {
            reservations_today,
            reservations_pending,
            month_income,
            upcoming,
        })
    }
}
