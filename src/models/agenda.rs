//! Agenda (weekly working-schedule) model

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One working-schedule configuration owned by a provider
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Agenda {
    pub id: i32,
    pub provider_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    /// Opening time
    pub open_time: NaiveTime,
    /// Closing time (strictly after open_time)
    pub close_time: NaiveTime,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    pub created_at: DateTime<Utc>,
}

impl Agenda {
    /// True iff the agenda is active and the date falls on an active weekday
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        if !self.active {
            return false;
        }
        match date.weekday() {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// The daily opening interval, constant per agenda
    pub fn opening_interval(&self) -> (NaiveTime, NaiveTime) {
        (self.open_time, self.close_time)
    }
}

/// Create agenda request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAgenda {
    pub name: String,
    pub description: Option<String>,
    /// Opening time (HH:MM)
    pub open_time: String,
    /// Closing time (HH:MM)
    pub close_time: String,
    pub monday: Option<bool>,
    pub tuesday: Option<bool>,
    pub wednesday: Option<bool>,
    pub thursday: Option<bool>,
    pub friday: Option<bool>,
    pub saturday: Option<bool>,
    pub sunday: Option<bool>,
}

/// Update agenda request (partial)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAgenda {
    pub name: Option<String>,
    pub description: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub monday: Option<bool>,
    pub tuesday: Option<bool>,
    pub wednesday: Option<bool>,
    pub thursday: Option<bool>,
    pub friday: Option<bool>,
    pub saturday: Option<bool>,
    pub sunday: Option<bool>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekday_agenda() -> Agenda {
        Agenda {
            id: 1,
            provider_id: 1,
            name: "Main".to_string(),
            description: None,
            active: true,
            open_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            close_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn open_on_weekday_closed_on_weekend() {
        let agenda = weekday_agenda();
        // 2025-06-02 is a Monday, 2025-06-07 a Saturday
        assert!(agenda.is_open_on(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()));
        assert!(!agenda.is_open_on(NaiveDate::from_ymd_opt(2025, 6, 7).unwrap()));
    }

    #[test]
    fn inactive_agenda_is_never_open() {
        let mut agenda = weekday_agenda();
        agenda.active = false;
        assert!(!agenda.is_open_on(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()));
    }
}
