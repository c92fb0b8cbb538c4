//! Slot availability computation
//!
//! Candidate start times step forward from the opening time on a fixed grid
//! (30 minutes by default), independent of each service's own duration. The
//! overlap filter against live bookings, not grid alignment, is what rules
//! out double-booking. The result is advisory: it can go stale between
//! generation and submission, and admission re-checks at commit time.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

/// Ordered free start times for (open..close) with the given step and
/// service duration, skipping candidates that intersect a busy interval.
///
/// All intervals are half-open [start, end).
pub fn compute_free_slots(
    open: NaiveTime,
    close: NaiveTime,
    step_minutes: u32,
    duration_minutes: u32,
    busy: &[(NaiveTime, NaiveTime)],
) -> Vec<NaiveTime> {
    // A zero step would never advance the grid cursor
    if step_minutes == 0 {
        return Vec::new();
    }

    let step = Duration::minutes(step_minutes as i64);
    let duration = Duration::minutes(duration_minutes as i64);

    let mut slots = Vec::new();
    let mut current = open;

    while current < close {
        // overflow_add wraps past midnight; the day carry marks candidates
        // whose end falls outside the day, which can never fit
        let (end, wrapped) = current.overflowing_add_signed(duration);

        if wrapped == 0 && end <= close {
            let occupied = busy
                .iter()
                .any(|&(busy_start, busy_end)| !(end <= busy_start || current >= busy_end));
            if !occupied {
                slots.push(current);
            }
        }

        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        current = next;
    }

    slots
}

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
    slot_step_minutes: u32,
}

impl AvailabilityService {
    pub fn new(repository: Repository, slot_step_minutes: u32) -> Self {
        Self {
            repository,
            slot_step_minutes,
        }
    }

    /// Free start times for (agenda, date, service), formatted "HH:MM".
    ///
    /// Recomputed fresh on every call against the current booking ledger.
    pub async fn free_slots(
        &self,
        agenda_id: i32,
        service_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<String>> {
        let agenda = self.repository.agendas.get_by_id(agenda_id).await?;
        let service = self.repository.services.get_by_id(service_id).await?;

        if service.provider_id != agenda.provider_id {
            return Err(AppError::Validation(
                "Service does not belong to the agenda's provider".to_string(),
            ));
        }
        if !service.active {
            return Err(AppError::Validation("Service is not active".to_string()));
        }
        if !agenda.is_open_on(date) {
            return Err(AppError::Validation(format!(
                "Agenda is not open on {}",
                date
            )));
        }

        let busy = self.repository.reservations.busy_intervals(agenda_id, date).await?;
        let (open, close) = agenda.opening_interval();

        let slots = compute_free_slots(
            open,
            close,
            self.slot_step_minutes,
            service.duration_minutes as u32,
            &busy,
        );

        Ok(slots.iter().map(|t| t.format("%H:%M").to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn empty_ledger_produces_full_grid() {
        // 09:00-18:00, 60 min service: 09:00 through 17:00, 17 slots
        let slots = compute_free_slots(t(9, 0), t(18, 0), 30, 60, &[]);
        assert_eq!(slots.len(), 17);
        assert_eq!(slots[0], t(9, 0));
        assert_eq!(slots[1], t(9, 30));
        assert_eq!(*slots.last().unwrap(), t(17, 0));
    }

    #[test]
    fn every_slot_is_on_the_step_grid_and_fits() {
        let slots = compute_free_slots(t(9, 0), t(18, 0), 30, 45, &[]);
        for slot in &slots {
            let offset = slot.signed_duration_since(t(9, 0)).num_minutes();
            assert_eq!(offset % 30, 0);
            assert!(*slot + Duration::minutes(45) <= t(18, 0));
        }
    }

    #[test]
    fn booking_excludes_overlapping_candidates() {
        // A 60-min booking at 10:00 also knocks out 09:30, whose span
        // [09:30,10:30) intersects [10:00,11:00)
        let busy = [(t(10, 0), t(11, 0))];
        let slots = compute_free_slots(t(9, 0), t(18, 0), 30, 60, &busy);
        assert!(slots.contains(&t(9, 0)));
        for excluded in [t(9, 30), t(10, 0), t(10, 30)] {
            assert!(!slots.contains(&excluded), "{} should be excluded", excluded);
        }
        assert!(slots.contains(&t(11, 0)));
        assert_eq!(slots.len(), 14);
    }

    #[test]
    fn back_to_back_bookings_do_not_conflict() {
        // [10:00,11:00) and a candidate ending exactly at 10:00 touch but
        // do not overlap under half-open semantics
        let busy = [(t(10, 0), t(11, 0))];
        let slots = compute_free_slots(t(9, 0), t(18, 0), 30, 60, &busy);
        assert!(slots.contains(&t(9, 0)));
        assert!(slots.contains(&t(11, 0)));
    }

    #[test]
    fn duration_too_long_for_window_yields_nothing() {
        let slots = compute_free_slots(t(9, 0), t(10, 0), 30, 90, &[]);
        assert!(slots.is_empty());
    }

    #[test]
    fn zero_step_yields_nothing_and_terminates() {
        let slots = compute_free_slots(t(9, 0), t(18, 0), 0, 60, &[]);
        assert!(slots.is_empty());
    }

    #[test]
    fn uneven_duration_still_uses_fixed_grid() {
        // 50-min service on the 30-min grid: last fitting start is 17:00
        let slots = compute_free_slots(t(9, 0), t(18, 0), 30, 50, &[]);
        assert_eq!(slots[0], t(9, 0));
        assert_eq!(*slots.last().unwrap(), t(17, 0));
    }

    #[test]
    fn fully_booked_day_yields_nothing() {
        let busy = [(t(9, 0), t(18, 0))];
        let slots = compute_free_slots(t(9, 0), t(18, 0), 30, 30, &busy);
        assert!(slots.is_empty());
    }
}
