//! Meeting-duration extraction.
//!
//! An explicit "<N> minutes/hours" always wins; otherwise the meeting kind
//! is guessed from keywords, with 30 minutes as the fallback.

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_DURATION_MINUTES: u32 = 30;

static EXPLICIT_DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(min|minute|minutes|hour|hours|hr)").unwrap());

// Keyword classes ordered from quick huddles to extended sessions; the
// first class with a hit decides.
const DURATION_HINTS: &[(&[&str], u32)] = &[
    (&["standup", "daily", "quick"], 15),
    (&["sync", "check-in", "update"], 30),
    (&["planning", "review", "workshop"], 60),
    (&["training", "interview", "presentation"], 90),
];

/// Extract an explicitly stated duration in minutes, if present.
pub fn extract_duration(input: &str) -> Option<u32> {
    let caps = EXPLICIT_DURATION.captures(input)?;
    let amount: u32 = caps[1].parse().ok()?;
    let unit = &caps[2];
    if unit.starts_with("hour") || unit == "hr" {
        Some(amount.saturating_mul(60))
    } else {
        Some(amount)
    }
}

/// Guess a duration from meeting-kind keywords in the title and raw input.
pub fn suggest_duration(title: &str, description: &str) -> u32 {
    let text = format!("{} {}", title, description).to_lowercase();
    for (keywords, minutes) in DURATION_HINTS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return *minutes;
        }
    }
    DEFAULT_DURATION_MINUTES
}
