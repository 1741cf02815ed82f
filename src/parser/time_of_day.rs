//! Clock-time extraction from free text.
//!
//! Three patterns tried in order, first match wins:
//! explicit minutes ("8:30", "14:00", "2:30pm"), bare hour with meridiem
//! ("8 am", "2pm"), and "at"-prefixed times ("at 8", "at 8:15am").

use once_cell::sync::Lazy;
use regex::Regex;

static CLOCK_WITH_MINUTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}):(\d{2})\s*(am|pm)?").unwrap());

static HOUR_WITH_MERIDIEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2})\s*(am|pm)").unwrap());

static AT_CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"at\s+(\d{1,2}):?(\d{2})?\s*(am|pm)?").unwrap());

/// Extract a start time as "HH:MM" (24-hour), if any pattern matches.
///
/// Expects lowercased input; meridiem suffixes convert 12-hour times
/// ("2pm" -> "14:00", "12am" -> "00:00").
pub fn extract_time(input: &str) -> Option<String> {
    if let Some(caps) = CLOCK_WITH_MINUTES.captures(input) {
        let hours = parse_component(caps.get(1).map_or("0", |m| m.as_str()));
        let minutes = parse_component(caps.get(2).map_or("0", |m| m.as_str()));
        return Some(to_24_hour(hours, minutes, caps.get(3).map(|m| m.as_str())));
    }

    if let Some(caps) = HOUR_WITH_MERIDIEM.captures(input) {
        let hours = parse_component(caps.get(1).map_or("0", |m| m.as_str()));
        return Some(to_24_hour(hours, 0, caps.get(2).map(|m| m.as_str())));
    }

    if let Some(caps) = AT_CLOCK.captures(input) {
        let hours = parse_component(caps.get(1).map_or("0", |m| m.as_str()));
        let minutes = parse_component(caps.get(2).map_or("0", |m| m.as_str()));
        return Some(to_24_hour(hours, minutes, caps.get(3).map(|m| m.as_str())));
    }

    None
}

fn parse_component(digits: &str) -> u32 {
    // Capture groups are 1-2 digit strings; a failed parse means the group
    // was absent and defaulted.
    digits.parse().unwrap_or(0)
}

fn to_24_hour(mut hours: u32, minutes: u32, meridiem: Option<&str>) -> String {
    match meridiem {
        Some("pm") if hours < 12 => hours += 12,
        Some("am") if hours == 12 => hours = 0,
        _ => {}
    }
    format!("{:02}:{:02}", hours, minutes)
}
