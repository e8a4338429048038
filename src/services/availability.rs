//! Slot generation and availability computation

use chrono::{Datelike, NaiveDate};

use crate::{
    error::AppResult,
    models::schedule::{self, DaySchedule, TimeSlot},
    repository::Repository,
};

/// Generate the candidate slot start times for one day, half-open
/// `[open_time, close_time)` stepped by `interval_minutes`.
///
/// Purely a function of the day's hours and the interval. A final slot that
/// starts before closing but would nominally end after it is still emitted
/// (slots are identified by start time only); callers depend on that. A
/// closed day, malformed times or an inverted range all yield no slots.
pub fn generate_slots(day: &DaySchedule, interval_minutes: u32) -> Vec<String> {
    if !day.is_open || interval_minutes == 0 {
        return Vec::new();
    }
    let (open, close) = match (
        schedule::minutes_since_midnight(&day.open_time),
        schedule::minutes_since_midnight(&day.close_time),
    ) {
        (Some(open), Some(close)) => (open, close),
        _ => return Vec::new(),
    };

    let mut slots = Vec::new();
    let mut current = open;
    while current < close {
        slots.push(format!("{:02}:{:02}", current / 60, current % 60));
        current += interval_minutes;
    }
    slots
}

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
    slot_interval_minutes: u32,
}

impl AvailabilityService {
    pub fn new(repository: Repository, slot_interval_minutes: u32) -> Self {
        Self {
            repository,
            slot_interval_minutes,
        }
    }

    /// Candidate slots for a restaurant and date, annotated with whether each
    /// one is still free.
    ///
    /// A closed day or an unparseable opening-hours blob is an empty result,
    /// not an error; only an unknown restaurant fails. Each slot is probed
    /// individually against the reservations table (N lookups for N slots), a
    /// deliberate simplicity tradeoff at menu-page traffic levels.
    pub async fn for_date(&self, restaurant_id: &str, date: NaiveDate) -> AppResult<Vec<TimeSlot>> {
        let restaurant = self.repository.restaurants.get_by_id(restaurant_id).await?;

        let week = match schedule::parse_schedule(restaurant.opening_hours.as_deref()) {
            Some(week) => week,
            None => return Ok(Vec::new()),
        };

        let day = week.day(date.weekday());
        let mut result = Vec::new();
        for time in generate_slots(day, self.slot_interval_minutes) {
            let taken = self
                .repository
                .reservations
                .slot_taken(restaurant_id, date, &time)
                .await?;
            result.push(TimeSlot {
                time,
                available: !taken,
            });
        }
        Ok(result)
    }
}
