//! Dashboard statistics over the whole appointment collection.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::store::Appointment;

const DURATION_RANGES: [&str; 4] = ["0-30 min", "31-60 min", "61-90 min", "90+ min"];

#[derive(Debug, Clone, Serialize)]
pub struct WeekCount {
    pub week: String,
    pub meetings: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayCount {
    pub day: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeCount {
    pub range: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_meetings: usize,
    pub avg_duration: u32,
    pub busiest_day: String,
    pub busiest_day_count: usize,
    pub weekly_data: Vec<WeekCount>,
    pub day_distribution: Vec<DayCount>,
    pub duration_distribution: Vec<RangeCount>,
}

/// Aggregate counts for the dashboard charts.
///
/// Appointments with unparseable dates still count toward totals and
/// duration buckets but are skipped by the calendar groupings.
pub fn dashboard_stats(appointments: &[Appointment]) -> DashboardStats {
    let total_meetings = appointments.len();
    let avg_duration = if appointments.is_empty() {
        0
    } else {
        let total: u32 = appointments.iter().map(|apt| apt.duration).sum();
        (f64::from(total) / total_meetings as f64).round() as u32
    };

    // Counts keyed in first-seen order so ties resolve deterministically
    let mut weekly: Vec<(String, usize)> = Vec::new();
    let mut days: Vec<(String, usize)> = Vec::new();
    for apt in appointments {
        let Ok(date) = NaiveDate::parse_from_str(&apt.date, "%Y-%m-%d") else {
            continue;
        };
        let week = format!("Week {}", (date.day() + 6) / 7);
        bump(&mut weekly, week);
        bump(&mut days, date.format("%A").to_string());
    }

    let mut busiest: Option<(&str, usize)> = None;
    for (day, count) in &days {
        if busiest.map_or(true, |(_, best)| *count > best) {
            busiest = Some((day, *count));
        }
    }
    let (busiest_day, busiest_day_count) = busiest
        .map(|(day, count)| (day.to_string(), count))
        .unwrap_or_else(|| ("No data".to_string(), 0));

    let mut buckets = [0usize; 4];
    for apt in appointments {
        let index = match apt.duration {
            0..=30 => 0,
            31..=60 => 1,
            61..=90 => 2,
            _ => 3,
        };
        buckets[index] += 1;
    }

    DashboardStats {
        total_meetings,
        avg_duration,
        busiest_day,
        busiest_day_count,
        weekly_data: weekly.into_iter().map(|(week, meetings)| WeekCount { week, meetings }).collect(),
        day_distribution: days.into_iter().map(|(day, count)| DayCount { day, count }).collect(),
        duration_distribution: DURATION_RANGES
            .iter()
            .zip(buckets)
            .map(|(range, count)| RangeCount { range: range.to_string(), count })
            .collect(),
    }
}

fn bump(counts: &mut Vec<(String, usize)>, key: String) {
    match counts.iter_mut().find(|(existing, _)| *existing == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key, 1)),
    }
}
