//! Opening-hours schedule model and validation

use std::collections::BTreeMap;

use chrono::Weekday;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 24-hour `HH:MM`, hour optionally unpadded (`9:30` and `09:30` both match)
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?\d|2[0-3]):[0-5]\d$").expect("invalid time regex"));

// ---------------------------------------------------------------------------
// DaySchedule / WeekSchedule
// ---------------------------------------------------------------------------

/// Opening hours for a single day of the week
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// Whether the restaurant opens at all on this day
    #[serde(default)]
    pub is_open: bool,
    /// Opening time (HH:MM, 24h)
    #[serde(default)]
    pub open_time: String,
    /// Closing time (HH:MM, 24h)
    #[serde(default)]
    pub close_time: String,
}

/// Weekly opening hours, one entry per day.
///
/// Stored JSON-serialized in `restaurants.opening_hours`; days absent from the
/// blob deserialize as closed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct WeekSchedule {
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
    pub sunday: DaySchedule,
}

impl WeekSchedule {
    /// Schedule for a calendar weekday
    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    /// All days in monday..sunday order, with their lowercase names
    pub fn days(&self) -> [(&'static str, &DaySchedule); 7] {
        [
            ("monday", &self.monday),
            ("tuesday", &self.tuesday),
            ("wednesday", &self.wednesday),
            ("thursday", &self.thursday),
            ("friday", &self.friday),
            ("saturday", &self.saturday),
            ("sunday", &self.sunday),
        ]
    }
}

/// A candidate reservation slot for one day. Generated per request, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimeSlot {
    /// Slot start time (HH:MM, zero-padded)
    pub time: String,
    /// Whether the slot is still free
    pub available: bool,
}

/// Per-day validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleIssue {
    InvalidTimeFormat,
    InvalidTimeRange,
}

impl std::fmt::Display for ScheduleIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleIssue::InvalidTimeFormat => write!(f, "invalidTimeFormat"),
            ScheduleIssue::InvalidTimeRange => write!(f, "invalidTimeRange"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing & validation
// ---------------------------------------------------------------------------

/// Parse an `opening_hours` blob. Fail-soft: an absent, non-JSON or
/// wrong-shaped blob yields `None`, never an error. The availability path
/// treats `None` as "no schedule" (all days closed).
pub fn parse_schedule(raw: Option<&str>) -> Option<WeekSchedule> {
    let raw = raw?;
    serde_json::from_str(raw).ok()
}

/// True iff `s` is a valid 24-hour `HH:MM` time
pub fn is_valid_time(s: &str) -> bool {
    TIME_RE.is_match(s)
}

/// Minutes since midnight for a valid `HH:MM` string
pub fn minutes_since_midnight(s: &str) -> Option<u32> {
    if !is_valid_time(s) {
        return None;
    }
    let (h, m) = s.split_once(':')?;
    Some(h.parse::<u32>().ok()? * 60 + m.parse::<u32>().ok()?)
}

/// Canonical zero-padded `HH:MM` form, so that `9:30` and `09:30` name the
/// same slot. The reservation writer normalizes before the uniqueness check.
pub fn normalize_slot_time(s: &str) -> Option<String> {
    let minutes = minutes_since_midnight(s)?;
    Some(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// Validate a schedule day by day. For each open day the time format is
/// checked first; the open/close ordering is only checked once both times are
/// well-formed, so a day reports at most one issue.
pub fn validate_schedule(schedule: &WeekSchedule) -> BTreeMap<&'static str, ScheduleIssue> {
    let mut issues = BTreeMap::new();

    for (name, day) in schedule.days() {
        if !day.is_open {
            continue;
        }
        if !is_valid_time(&day.open_time) || !is_valid_time(&day.close_time) {
            issues.insert(name, ScheduleIssue::InvalidTimeFormat);
            continue;
        }
        if let (Some(open), Some(close)) = (
            minutes_since_midnight(&day.open_time),
            minutes_since_midnight(&day.close_time),
        ) {
            if open >= close {
                issues.insert(name, ScheduleIssue::InvalidTimeRange);
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_day(open: &str, close: &str) -> DaySchedule {
        DaySchedule {
            is_open: true,
            open_time: open.to_string(),
            close_time: close.to_string(),
        }
    }

    #[test]
    fn test_parse_missing_blob() {
        assert!(parse_schedule(None).is_none());
    }

    #[test]
    fn test_parse_malformed_blob() {
        assert!(parse_schedule(Some("not json")).is_none());
        assert!(parse_schedule(Some("[1,2,3]")).is_none());
    }

    #[test]
    fn test_parse_partial_blob_defaults_closed() {
        let schedule = parse_schedule(Some(
            r#"{"monday":{"isOpen":true,"openTime":"09:00","closeTime":"17:00"}}"#,
        ))
        .unwrap();
        assert!(schedule.monday.is_open);
        assert_eq!(schedule.monday.open_time, "09:00");
        assert!(!schedule.tuesday.is_open);
    }

    #[test]
    fn test_is_valid_time() {
        assert!(is_valid_time("00:00"));
        assert!(is_valid_time("9:30"));
        assert!(is_valid_time("23:59"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("12:60"));
        assert!(!is_valid_time("12"));
        assert!(!is_valid_time("12:5"));
        assert!(!is_valid_time(""));
    }

    #[test]
    fn test_normalize_slot_time() {
        assert_eq!(normalize_slot_time("9:30").as_deref(), Some("09:30"));
        assert_eq!(normalize_slot_time("09:30").as_deref(), Some("09:30"));
        assert!(normalize_slot_time("25:00").is_none());
    }

    #[test]
    fn test_validate_inverted_range() {
        let mut schedule = WeekSchedule::default();
        schedule.monday = open_day("18:00", "12:00");
        let issues = validate_schedule(&schedule);
        assert_eq!(issues.get("monday"), Some(&ScheduleIssue::InvalidTimeRange));
    }

    #[test]
    fn test_validate_equal_times_is_invalid_range() {
        let mut schedule = WeekSchedule::default();
        schedule.friday = open_day("12:00", "12:00");
        let issues = validate_schedule(&schedule);
        assert_eq!(issues.get("friday"), Some(&ScheduleIssue::InvalidTimeRange));
    }

    #[test]
    fn test_validate_bad_format_wins_over_range() {
        let mut schedule = WeekSchedule::default();
        schedule.sunday = open_day("25:00", "12:00");
        let issues = validate_schedule(&schedule);
        assert_eq!(issues.get("sunday"), Some(&ScheduleIssue::InvalidTimeFormat));
    }

    #[test]
    fn test_validate_closed_days_ignored() {
        let mut schedule = WeekSchedule::default();
        // garbage times on a closed day are not an error
        schedule.tuesday.open_time = "garbage".to_string();
        assert!(validate_schedule(&schedule).is_empty());
    }
}
