//! Free-slot search over a discretized working day.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::conflict::find_conflicts;
use crate::store::Appointment;
use crate::time_utils::{minutes_to_time, time_to_minutes};

pub const WORK_DAY_START: &str = "09:00";
pub const WORK_DAY_END: &str = "17:00";
pub const SCAN_STEP_MINUTES: u32 = 30;

const PEAK_START_MINUTES: u32 = 10 * 60;
const PEAK_END_MINUTES: u32 = 15 * 60;

/// A conflict-free candidate start time with its ranking score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlot {
    pub time: String,
    pub duration: u32,
    pub end_time: String,
    pub score: u32,
}

/// The window and granularity the scanner walks.
#[derive(Debug, Clone)]
pub struct ScanWindow {
    pub start_time: String,
    pub end_time: String,
    pub step_minutes: u32,
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self {
            start_time: WORK_DAY_START.to_string(),
            end_time: WORK_DAY_END.to_string(),
            step_minutes: SCAN_STEP_MINUTES,
        }
    }
}

/// Scan the working day for starts where `duration` minutes fit without
/// conflicts. Candidates run from `start_time` to `end_time - duration`
/// inclusive, stepping by `step_minutes`.
pub fn find_available_slots(
    existing: &[Appointment],
    duration: u32,
    start_time: &str,
    end_time: &str,
    step_minutes: u32,
) -> Vec<AvailableSlot> {
    if step_minutes == 0 {
        warn!("Slot scan requested with zero step; returning no slots");
        return Vec::new();
    }

    let work_day_start = time_to_minutes(start_time);
    let work_day_end = time_to_minutes(end_time);

    let mut slots = Vec::new();
    let mut current = work_day_start;
    while current + duration <= work_day_end {
        let time_str = minutes_to_time(current);
        if find_conflicts(existing, &time_str, duration).is_empty() {
            slots.push(AvailableSlot {
                time: time_str,
                duration,
                end_time: minutes_to_time(current + duration),
                score: calculate_slot_score(current, work_day_start, work_day_end),
            });
        }
        current += step_minutes;
    }

    debug!(
        "Found {} free {}min slot(s) between {} and {}",
        slots.len(),
        duration,
        start_time,
        end_time
    );
    slots
}

/// Score a slot start for ranking (0-100, higher is better).
///
/// Base 50, +30 inside the 10:00-15:00 peak window, plus an early-day bonus
/// of up to 20 that only kicks in at or after 10:00.
pub fn calculate_slot_score(slot_time: u32, work_day_start: u32, work_day_end: u32) -> u32 {
    let work_day_duration = f64::from(work_day_end) - f64::from(work_day_start);
    let position_in_day = (f64::from(slot_time) - f64::from(work_day_start)) / work_day_duration;

    let mut score = 50.0;

    if (PEAK_START_MINUTES..=PEAK_END_MINUTES).contains(&slot_time) {
        score += 30.0;
    }

    if slot_time >= PEAK_START_MINUTES {
        score += (1.0 - position_in_day) * 20.0;
    }

    score.round() as u32
}

/// The highest-scoring slot; earlier starts win ties because the scan is
/// chronological and the selection is stable.
pub fn get_best_slot(slots: &[AvailableSlot]) -> Option<&AvailableSlot> {
    slots.iter().reduce(|best, slot| if slot.score > best.score { slot } else { best })
}
