//! Conflict detection for candidate bookings.
//!
//! Everything here is a pure function over in-memory appointment lists; the
//! caller fetches the working set (usually one date's appointments) first.

use log::debug;
use serde::Serialize;

use crate::store::Appointment;
use crate::time_utils::{has_overlap, minutes_to_time, time_to_minutes};

/// How a candidate interval collides with an existing appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictType {
    /// One interval fully contains the other.
    CompleteOverlap,
    /// Candidate starts first and ends inside the other.
    PartialOverlapEnd,
    /// Candidate starts inside the other and ends after it.
    PartialOverlapStart,
    /// Fallback for shapes the rules above miss; confirming the overlap
    /// first makes this unreachable in practice.
    Unknown,
}

/// Coarse bucket summarizing how many conflicts a candidate has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictSeverity {
    None,
    Low,
    Medium,
    High,
}

impl ConflictSeverity {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => ConflictSeverity::None,
            1 => ConflictSeverity::Low,
            2..=3 => ConflictSeverity::Medium,
            _ => ConflictSeverity::High,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDetail {
    pub id: String,
    pub title: String,
    pub time: String,
    pub duration: u32,
    pub attendees: Vec<String>,
    pub description: String,
    pub conflict_type: ConflictType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResult {
    pub has_conflict: bool,
    pub conflict_count: usize,
    pub conflicts: Vec<ConflictDetail>,
    pub severity: ConflictSeverity,
}

/// Check a candidate `{time, duration}` against existing appointments.
///
/// `exclude_id` skips the appointment being edited so it cannot conflict
/// with itself.
pub fn check_conflicts(
    existing: &[Appointment],
    time: &str,
    duration: u32,
    exclude_id: Option<&str>,
) -> ConflictResult {
    let new_start = time_to_minutes(time);
    let new_end = new_start + duration;

    let mut conflicts = Vec::new();
    for apt in existing {
        if exclude_id.is_some_and(|id| apt.id == id) {
            continue;
        }
        let apt_start = time_to_minutes(&apt.time);
        let apt_end = apt_start + apt.duration;
        if has_overlap(new_start, new_end, apt_start, apt_end) {
            conflicts.push(ConflictDetail {
                id: apt.id.clone(),
                title: apt.title.clone(),
                time: apt.time.clone(),
                duration: apt.duration,
                attendees: apt.attendees.clone(),
                description: apt.description.clone(),
                conflict_type: determine_conflict_type(new_start, new_end, apt_start, apt_end),
            });
        }
    }

    debug!("Conflict check at {} for {}min: {} hit(s)", time, duration, conflicts.len());
    ConflictResult {
        has_conflict: !conflicts.is_empty(),
        conflict_count: conflicts.len(),
        severity: ConflictSeverity::from_count(conflicts.len()),
        conflicts,
    }
}

/// Classify how `[start1, end1)` collides with `[start2, end2)`.
pub fn determine_conflict_type(start1: u32, end1: u32, start2: u32, end2: u32) -> ConflictType {
    // Complete overlap: one range contains the other
    if start1 <= start2 && end1 >= end2 {
        return ConflictType::CompleteOverlap;
    }
    if start2 <= start1 && end2 >= end1 {
        return ConflictType::CompleteOverlap;
    }

    if start1 < start2 && end1 > start2 {
        return ConflictType::PartialOverlapEnd;
    }
    if start1 < end2 && end1 > end2 {
        return ConflictType::PartialOverlapStart;
    }

    ConflictType::Unknown
}

/// A single colliding appointment with the size of the collision.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapReport {
    pub id: String,
    pub title: String,
    pub time: String,
    pub duration: u32,
    pub end_time: String,
    pub overlap_minutes: u32,
}

/// Flat conflict list for the parse-and-check flow.
///
/// Unlike `check_conflicts` this reports how many minutes each collision
/// covers instead of classifying its shape.
pub fn find_conflicts(
    appointments: &[Appointment],
    target_time: &str,
    target_duration: u32,
) -> Vec<OverlapReport> {
    let target_start = time_to_minutes(target_time);
    let target_end = target_start + target_duration;

    let mut conflicts = Vec::new();
    for apt in appointments {
        let apt_start = time_to_minutes(&apt.time);
        let apt_end = apt_start + apt.duration;
        if has_overlap(target_start, target_end, apt_start, apt_end) {
            conflicts.push(OverlapReport {
                id: apt.id.clone(),
                title: apt.title.clone(),
                time: apt.time.clone(),
                duration: apt.duration,
                end_time: minutes_to_time(apt_end),
                overlap_minutes: target_end.min(apt_end) - target_start.max(apt_start),
            });
        }
    }
    conflicts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjacentPosition {
    Before,
    After,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacentMeeting {
    pub id: String,
    pub title: String,
    pub time: String,
    pub duration: u32,
    pub position: AdjacentPosition,
}

/// Find appointments that touch the candidate's boundaries exactly.
///
/// Exact equality, not a tolerance window: a meeting ending at the
/// candidate's start is `BEFORE`, one starting at its end is `AFTER`.
pub fn find_back_to_back(
    existing: &[Appointment],
    time: &str,
    duration: u32,
) -> Vec<AdjacentMeeting> {
    let new_start = time_to_minutes(time);
    let new_end = new_start + duration;

    let mut adjacent = Vec::new();
    for apt in existing {
        let apt_start = time_to_minutes(&apt.time);
        let apt_end = apt_start + apt.duration;
        if apt_end == new_start || new_end == apt_start {
            adjacent.push(AdjacentMeeting {
                id: apt.id.clone(),
                title: apt.title.clone(),
                time: apt.time.clone(),
                duration: apt.duration,
                position: if apt_end == new_start {
                    AdjacentPosition::Before
                } else {
                    AdjacentPosition::After
                },
            });
        }
    }
    adjacent
}
