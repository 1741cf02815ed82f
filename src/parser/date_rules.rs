//! Ordered date-extraction rules.
//!
//! Each rule inspects the (lowercased) input and either produces a date,
//! declines, or reports an unrepresentable date. Rules run top to bottom,
//! first producer wins, and the reference date is the fallback.

use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

type DateRule = fn(&str, NaiveDate) -> Result<Option<NaiveDate>>;

const RULES: &[(&str, DateRule)] = &[
    ("today", today_rule),
    ("tomorrow", tomorrow_rule),
    ("next-weekday", next_weekday_rule),
    ("day-of-month", day_of_month_rule),
    ("relative-offset", relative_offset_rule),
];

/// Resolve the date mentioned in `input`, defaulting to `today`.
pub fn resolve_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    for (name, rule) in RULES {
        if let Some(date) = rule(input, today)? {
            debug!("Date rule '{}' matched: {}", name, date);
            return Ok(date);
        }
    }
    Ok(today)
}

fn today_rule(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>> {
    Ok(input.contains("today").then_some(today))
}

fn tomorrow_rule(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>> {
    Ok(input.contains("tomorrow").then(|| today + Duration::days(1)))
}

static NEXT_WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"next\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)").unwrap()
});

/// "next <weekday>" is always strictly in the future: asking for next
/// Monday on a Monday lands seven days out.
fn next_weekday_rule(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>> {
    let Some(caps) = NEXT_WEEKDAY.captures(input) else {
        return Ok(None);
    };
    let target = match &caps[1] {
        "monday" => Weekday::Mon,
        "tuesday" => Weekday::Tue,
        "wednesday" => Weekday::Wed,
        "thursday" => Weekday::Thu,
        "friday" => Weekday::Fri,
        "saturday" => Weekday::Sat,
        _ => Weekday::Sun,
    };
    let mut days_ahead =
        (target.num_days_from_sunday() + 7 - today.weekday().num_days_from_sunday()) % 7;
    if days_ahead == 0 {
        days_ahead = 7;
    }
    Ok(Some(today + Duration::days(i64::from(days_ahead))))
}

static ORDINAL_DAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2})(?:st|nd|rd|th)").unwrap());

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Ordinal day-of-month: "the 20th", "3rd of june", "15th next month".
///
/// A bare ordinal in the current month that already passed rolls forward
/// one month, unless the text pins it with "of this month".
fn day_of_month_rule(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>> {
    let Some(caps) = ORDINAL_DAY.captures(input) else {
        return Ok(None);
    };
    let day: u32 = caps[1].parse()?;

    let mut year = today.year();
    let mut month = today.month();
    for (index, name) in MONTH_NAMES.iter().enumerate() {
        if input.contains(name) {
            month = index as u32 + 1;
            break;
        }
    }
    if input.contains("next month") {
        month = today.month() + 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }

    let mut target = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("no day {} in {}-{:02}", day, year, month))?;
    if target < today && !input.contains("of this month") {
        target = add_one_month(target)?;
    }
    Ok(Some(target))
}

fn add_one_month(date: NaiveDate) -> Result<NaiveDate> {
    let (mut year, mut month) = (date.year(), date.month() + 1);
    if month > 12 {
        month = 1;
        year += 1;
    }
    NaiveDate::from_ymd_opt(year, month, date.day())
        .ok_or_else(|| anyhow!("no day {} in {}-{:02}", date.day(), year, month))
}

static RELATIVE_OFFSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"in\s+(\d+)\s+(day|days|week|weeks)").unwrap());

fn relative_offset_rule(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>> {
    let Some(caps) = RELATIVE_OFFSET.captures(input) else {
        return Ok(None);
    };
    let amount: i64 = caps[1].parse().map_err(|_| anyhow!("offset too large: {}", &caps[1]))?;
    let days = if caps[2].starts_with("week") {
        amount.checked_mul(7).ok_or_else(|| anyhow!("offset too large: {} weeks", amount))?
    } else {
        amount
    };
    let delta = Duration::try_days(days).ok_or_else(|| anyhow!("offset too large: {} days", days))?;
    let date = today
        .checked_add_signed(delta)
        .ok_or_else(|| anyhow!("offset too large: {} days", days))?;
    Ok(Some(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Wednesday
    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_and_tomorrow() {
        assert_eq!(resolve_date("sync today", reference()).unwrap(), reference());
        assert_eq!(resolve_date("sync tomorrow", reference()).unwrap(), date(2026, 8, 6));
        // "today" wins when both appear
        assert_eq!(resolve_date("today not tomorrow", reference()).unwrap(), reference());
    }

    #[test]
    fn test_next_weekday_is_strictly_future() {
        // Reference is a Wednesday; "next wednesday" is a full week out
        assert_eq!(resolve_date("next wednesday", reference()).unwrap(), date(2026, 8, 12));
        assert_eq!(resolve_date("next thursday", reference()).unwrap(), date(2026, 8, 6));
        assert_eq!(resolve_date("next monday", reference()).unwrap(), date(2026, 8, 10));
        assert_eq!(resolve_date("next sunday", reference()).unwrap(), date(2026, 8, 9));
    }

    #[test]
    fn test_ordinal_in_current_month() {
        assert_eq!(resolve_date("on the 20th", reference()).unwrap(), date(2026, 8, 20));
    }

    #[test]
    fn test_ordinal_with_month_name() {
        assert_eq!(resolve_date("3rd of october", reference()).unwrap(), date(2026, 10, 3));
    }

    #[test]
    fn test_past_ordinal_rolls_to_next_month() {
        // The 2nd already passed on 2026-08-05
        assert_eq!(resolve_date("on the 2nd", reference()).unwrap(), date(2026, 9, 2));
    }

    #[test]
    fn test_of_this_month_suppresses_rollover() {
        assert_eq!(
            resolve_date("the 2nd of this month", reference()).unwrap(),
            date(2026, 8, 2)
        );
    }

    #[test]
    fn test_todays_ordinal_does_not_roll() {
        // Rollover requires strictly-before, so the 5th stays the 5th
        assert_eq!(resolve_date("on the 5th", reference()).unwrap(), date(2026, 8, 5));
    }

    #[test]
    fn test_next_month_wraps_year_in_december() {
        let december = date(2026, 12, 10);
        assert_eq!(resolve_date("15th next month", december).unwrap(), date(2027, 1, 15));
    }

    #[test]
    fn test_next_month_overrides_month_name() {
        // Mirrors rule precedence: "next month" is applied after month names
        assert_eq!(
            resolve_date("15th of january next month", reference()).unwrap(),
            date(2026, 9, 15)
        );
    }

    #[test]
    fn test_nonexistent_day_is_an_error() {
        assert!(resolve_date("30th of february", reference()).is_err());
    }

    #[test]
    fn test_relative_days_and_weeks() {
        assert_eq!(resolve_date("in 1 day", reference()).unwrap(), date(2026, 8, 6));
        assert_eq!(resolve_date("in 10 days", reference()).unwrap(), date(2026, 8, 15));
        assert_eq!(resolve_date("in 1 week", reference()).unwrap(), date(2026, 8, 12));
        assert_eq!(resolve_date("in 3 weeks", reference()).unwrap(), date(2026, 8, 26));
    }

    #[test]
    fn test_absurd_offset_is_an_error_not_a_panic() {
        assert!(resolve_date("in 99999999999999999999 days", reference()).is_err());
    }

    #[test]
    fn test_fallback_is_reference_date() {
        assert_eq!(resolve_date("quick chat", reference()).unwrap(), reference());
    }

    #[test]
    fn test_rule_priority_today_beats_ordinal() {
        assert_eq!(resolve_date("today, not the 20th", reference()).unwrap(), reference());
    }
}
