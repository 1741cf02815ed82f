//! Advisory timing rules for candidate bookings.
//
// Errors block persistence by convention; warnings are informational only.
// Every rule is evaluated, nothing short-circuits.

use chrono::{Datelike, Local, NaiveDate, Weekday};
use regex::Regex;
use serde::Serialize;

use crate::time_utils::time_to_minutes;

const MIN_DURATION_MINUTES: u32 = 5;
const MAX_DURATION_MINUTES: u32 = 480;
const BUSINESS_DAY_START_MINUTES: u32 = 9 * 60;
const BUSINESS_DAY_END_MINUTES: u32 = 17 * 60;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub has_warnings: bool,
}

/// Validate a candidate against business-hours, weekend, past-date and
/// duration rules, relative to the local calendar date.
pub fn validate_timing(date: &str, time: &str, duration: u32) -> TimingReport {
    validate_timing_with_reference(date, time, duration, Local::now().date_naive())
}

/// Same rules with an injected "today" so tests can pin the clock.
pub fn validate_timing_with_reference(
    date: &str,
    time: &str,
    duration: u32,
    today: NaiveDate,
) -> TimingReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if duration < MIN_DURATION_MINUTES {
        errors.push("Meeting duration must be at least 5 minutes".to_string());
    }
    if duration > MAX_DURATION_MINUTES {
        warnings.push(
            "Meeting duration exceeds 8 hours - consider splitting into multiple sessions"
                .to_string(),
        );
    }

    let start_minutes = time_to_minutes(time);
    let end_minutes = start_minutes + duration;
    if start_minutes < BUSINESS_DAY_START_MINUTES {
        warnings.push("Meeting starts before 9 AM (outside standard business hours)".to_string());
    }
    if end_minutes > BUSINESS_DAY_END_MINUTES {
        warnings.push("Meeting ends after 5 PM (outside standard business hours)".to_string());
    }

    // An unparseable date skips the calendar rules; format checks are the
    // caller's job (validate_date_format below).
    if let Ok(appointment_date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        if matches!(appointment_date.weekday(), Weekday::Sat | Weekday::Sun) {
            warnings.push("Meeting scheduled on weekend".to_string());
        }
        if appointment_date < today {
            errors.push("Cannot schedule meetings in the past".to_string());
        }
    }

    TimingReport {
        is_valid: errors.is_empty(),
        has_warnings: !warnings.is_empty(),
        errors,
        warnings,
    }
}

/// Validate date string has format YYYY-MM-DD and names a real calendar day
pub fn validate_date_format(date: &str) -> bool {
    let re = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    if !re.is_match(date) {
        return false;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

/// Validate time string has format HH:MM within a single day
pub fn validate_time_format(time: &str) -> bool {
    let re = Regex::new(r"^\d{1,2}:\d{2}$").unwrap();
    if !re.is_match(time) {
        return false;
    }
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() != 2 {
        return false;
    }
    if let (Ok(hours), Ok(minutes)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
        return hours < 24 && minutes < 60;
    }
    false
}
