//! Scheduling agent flows.
//!
//! Glue between the pure engine modules and the appointment store: parse a
//! free-text request and check it for collisions, propose ranked
//! alternatives, and summarize a day. Handlers call these; the engine
//! modules stay storage-free.

use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

use crate::availability::{find_available_slots, get_best_slot, AvailableSlot, ScanWindow};
use crate::conflict::{
    check_conflicts, find_back_to_back, find_conflicts, AdjacentMeeting, ConflictResult,
    OverlapReport,
};
use crate::parser::{self, ParsedRequest};
use crate::store::{AppointmentStore, StoreResult};
use crate::validation::{validate_timing_with_reference, TimingReport};
use crate::workload::{calculate_meeting_load, suggest_breaks, BreakSuggestion, MeetingLoad};

/// Result of parsing text and checking it against the parsed date's
/// bookings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentParse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedRequest>,
    pub has_conflicts: bool,
    pub conflicts: Vec<OverlapReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Parse a natural-language request and report conflicts on its date.
pub fn parse_and_check(
    store: &AppointmentStore,
    text: &str,
    today: NaiveDate,
) -> StoreResult<AgentParse> {
    let parsed = parser::parse_with_reference(text, today);
    if !parsed.success {
        return Ok(AgentParse {
            success: false,
            message: parsed.message.clone(),
            parsed: Some(parsed),
            has_conflicts: false,
            conflicts: Vec::new(),
        });
    }

    let existing = store.for_date(&parsed.date)?;
    let conflicts = find_conflicts(&existing, &parsed.time, parsed.duration);
    debug!(
        "Agent parsed '{}' to {} {} ({} conflict(s))",
        text,
        parsed.date,
        parsed.time,
        conflicts.len()
    );
    Ok(AgentParse {
        success: true,
        has_conflicts: !conflicts.is_empty(),
        conflicts,
        parsed: Some(parsed),
        message: None,
    })
}

/// Ranked free slots for a date, with the scanner's pick.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartSchedule {
    pub date: String,
    pub duration: u32,
    pub all_available_slots: Vec<AvailableSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_slot: Option<AvailableSlot>,
    pub total_options: usize,
}

/// Scan a date for conflict-free slots of `duration` minutes.
pub fn smart_schedule(
    store: &AppointmentStore,
    date: &str,
    duration: u32,
    window: &ScanWindow,
) -> StoreResult<SmartSchedule> {
    let existing = store.for_date(date)?;
    let slots = find_available_slots(
        &existing,
        duration,
        &window.start_time,
        &window.end_time,
        window.step_minutes,
    );
    let best_slot = get_best_slot(&slots).cloned();
    Ok(SmartSchedule {
        date: date.to_string(),
        duration,
        total_options: slots.len(),
        best_slot,
        all_available_slots: slots,
    })
}

/// Everything the booking form needs to vet one candidate slot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingReview {
    pub conflict: ConflictResult,
    pub timing: TimingReport,
    pub back_to_back: Vec<AdjacentMeeting>,
}

/// Check a concrete `{date, time, duration}` candidate: overlap
/// classification, timing rules and adjacent meetings in one pass.
pub fn review_booking(
    store: &AppointmentStore,
    date: &str,
    time: &str,
    duration: u32,
    exclude_id: Option<&str>,
    today: NaiveDate,
) -> StoreResult<BookingReview> {
    let existing = store.for_date(date)?;
    Ok(BookingReview {
        conflict: check_conflicts(&existing, time, duration, exclude_id),
        timing: validate_timing_with_reference(date, time, duration, today),
        back_to_back: find_back_to_back(&existing, time, duration),
    })
}

/// Load and break analysis for one day's bookings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayInsights {
    pub date: String,
    pub load: MeetingLoad,
    pub suggested_breaks: Vec<BreakSuggestion>,
}

pub fn day_insights(store: &AppointmentStore, date: &str) -> StoreResult<DayInsights> {
    let appointments = store.for_date(date)?;
    Ok(DayInsights {
        date: date.to_string(),
        load: calculate_meeting_load(&appointments),
        suggested_breaks: suggest_breaks(&appointments),
    })
}
