//! Day-density analysis: how booked a day is and where breaks are missing.

use serde::Serialize;

use crate::store::Appointment;
use crate::time_utils::time_to_minutes;

// Assumed 8-hour work day
const WORK_DAY_MINUTES: u32 = 480;
const MIN_GAP_MINUTES: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadDensity {
    Light,
    Moderate,
    Heavy,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingLoad {
    pub total_meetings: usize,
    pub total_minutes: u32,
    pub total_hours: f64,
    pub load_percentage: u32,
    pub density: LoadDensity,
    pub recommendation: String,
}

/// Summarize how booked a day is against an assumed 480-minute work day.
pub fn calculate_meeting_load(appointments: &[Appointment]) -> MeetingLoad {
    if appointments.is_empty() {
        return MeetingLoad {
            total_meetings: 0,
            total_minutes: 0,
            total_hours: 0.0,
            load_percentage: 0,
            density: LoadDensity::Light,
            recommendation: "Good availability for scheduling".to_string(),
        };
    }

    let total_minutes: u32 = appointments.iter().map(|apt| apt.duration).sum();
    let total_hours = (total_minutes as f64 / 60.0 * 10.0).round() / 10.0;
    let load_percentage =
        (total_minutes as f64 / WORK_DAY_MINUTES as f64 * 100.0).round() as u32;

    let (density, recommendation) = if load_percentage > 80 {
        (LoadDensity::Heavy, "Day is heavily booked - avoid scheduling more meetings")
    } else if load_percentage > 50 {
        (LoadDensity::Moderate, "Day has moderate load - schedule carefully")
    } else {
        (LoadDensity::Light, "Good availability for scheduling")
    };

    MeetingLoad {
        total_meetings: appointments.len(),
        total_minutes,
        total_hours,
        load_percentage,
        density,
        recommendation: recommendation.to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakSuggestion {
    pub after: String,
    pub before: String,
    pub current_gap: u32,
    pub suggested_gap: u32,
    pub reason: String,
}

/// Flag adjacent appointments with less than ten minutes between them.
///
/// Appointments are sorted by start time first; already-overlapping pairs
/// (negative gap) are not break candidates.
pub fn suggest_breaks(appointments: &[Appointment]) -> Vec<BreakSuggestion> {
    if appointments.len() < 2 {
        return Vec::new();
    }

    let mut sorted: Vec<&Appointment> = appointments.iter().collect();
    sorted.sort_by_key(|apt| time_to_minutes(&apt.time));

    let mut breaks = Vec::new();
    for pair in sorted.windows(2) {
        let current = pair[0];
        let next = pair[1];
        let current_end = i64::from(time_to_minutes(&current.time) + current.duration);
        let next_start = i64::from(time_to_minutes(&next.time));
        let gap_minutes = next_start - current_end;

        if (0..MIN_GAP_MINUTES).contains(&gap_minutes) {
            breaks.push(BreakSuggestion {
                after: current.title.clone(),
                before: next.title.clone(),
                current_gap: gap_minutes as u32,
                suggested_gap: MIN_GAP_MINUTES as u32,
                reason: "Short break recommended for focus and productivity".to_string(),
            });
        }
    }
    breaks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apt(title: &str, time: &str, duration: u32) -> Appointment {
        Appointment {
            id: title.to_string(),
            title: title.to_string(),
            date: "2026-08-10".to_string(),
            time: time.to_string(),
            duration,
            attendees: Vec::new(),
            description: String::new(),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_empty_day_is_light() {
        let load = calculate_meeting_load(&[]);
        assert_eq!(load.total_meetings, 0);
        assert_eq!(load.density, LoadDensity::Light);
        assert_eq!(load.load_percentage, 0);
    }

    #[test]
    fn test_density_buckets() {
        // 240 of 480 minutes: exactly 50%, still light
        let light = calculate_meeting_load(&[apt("a", "09:00", 240)]);
        assert_eq!(light.load_percentage, 50);
        assert_eq!(light.density, LoadDensity::Light);

        // 288 minutes: 60%, moderate
        let moderate = calculate_meeting_load(&[apt("a", "09:00", 288)]);
        assert_eq!(moderate.density, LoadDensity::Moderate);

        // 400 minutes: 83%, heavy
        let heavy = calculate_meeting_load(&[apt("a", "09:00", 400)]);
        assert_eq!(heavy.density, LoadDensity::Heavy);
    }

    #[test]
    fn test_totals_and_hours_rounding() {
        let load = calculate_meeting_load(&[apt("a", "09:00", 50), apt("b", "10:00", 25)]);
        assert_eq!(load.total_meetings, 2);
        assert_eq!(load.total_minutes, 75);
        // 75 minutes = 1.25h, rounded to one decimal
        assert_eq!(load.total_hours, 1.3);
        assert_eq!(load.load_percentage, 16);
    }

    #[test]
    fn test_tight_gap_suggests_break() {
        let breaks = suggest_breaks(&[apt("first", "09:00", 60), apt("second", "10:09", 30)]);
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].after, "first");
        assert_eq!(breaks[0].before, "second");
        assert_eq!(breaks[0].current_gap, 9);
        assert_eq!(breaks[0].suggested_gap, 10);
    }

    #[test]
    fn test_ten_minute_gap_is_enough() {
        let breaks = suggest_breaks(&[apt("first", "09:00", 60), apt("second", "10:10", 30)]);
        assert!(breaks.is_empty());
    }

    #[test]
    fn test_overlapping_pair_is_not_a_break_candidate() {
        let breaks = suggest_breaks(&[apt("first", "09:00", 60), apt("second", "09:30", 60)]);
        assert!(breaks.is_empty());
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let breaks = suggest_breaks(&[apt("second", "10:05", 30), apt("first", "09:00", 60)]);
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].after, "first");
    }

    #[test]
    fn test_single_appointment_needs_no_breaks() {
        assert!(suggest_breaks(&[apt("only", "09:00", 60)]).is_empty());
    }
}
