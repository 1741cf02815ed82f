//! Clock-time helpers shared by the scheduling engine.
//!
//! All interval math works on minute offsets from midnight. Intervals are
//! half-open: `[start, end)`, so back-to-back meetings never overlap.

/// Convert a time string ("HH:MM", 24-hour) to minutes since midnight.
///
/// Malformed input is the caller's responsibility: components that fail to
/// parse count as zero. `validate_time_format` in the validation module is
/// the enforcement point for untrusted strings.
pub fn time_to_minutes(time: &str) -> u32 {
    let mut parts = time.splitn(2, ':');
    let hours: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minutes: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    hours * 60 + minutes
}

/// Convert minutes since midnight back to an "HH:MM" string.
///
/// Does not wrap values past midnight; callers keep inputs within one day.
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Check whether two half-open minute ranges overlap.
///
/// Strict inequalities mean touching endpoints do not count: an appointment
/// ending at 10:00 does not overlap one starting at 10:00.
pub fn has_overlap(start1: u32, end1: u32, start2: u32, end2: u32) -> bool {
    start1 < end2 && end1 > start2
}
