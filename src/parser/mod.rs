//! Natural language parsing for meeting requests.
//!
//! Turns free text like "standup next Monday 9am for 15 minutes" into a
//! structured candidate appointment. Extraction is heuristic: ordered
//! pattern rules per field, first match wins, with sensible defaults when
//! nothing matches. Parsing never fails toward the caller; internal errors
//! come back as a `ParsedRequest` with `success == false`.

pub mod date_rules;
pub mod duration;
pub mod time_of_day;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIME: &str = "09:00";
const DEFAULT_TITLE: &str = "Meeting";

/// Best-effort structured reading of a free-text meeting request.
///
/// Always fully populated on success. On an internal parsing failure only
/// `success`, `message` and `error` are meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRequest {
    pub success: bool,
    pub title: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParsedRequest {
    fn failure(err: anyhow::Error) -> Self {
        Self {
            success: false,
            title: String::new(),
            date: String::new(),
            time: String::new(),
            duration: 0,
            description: String::new(),
            message: Some("Failed to parse natural language input".to_string()),
            error: Some(err.to_string()),
        }
    }
}

/// Parse a meeting request relative to the local calendar date.
pub fn parse(text: &str) -> ParsedRequest {
    parse_with_reference(text, Local::now().date_naive())
}

/// Parse a meeting request relative to an explicit "today".
///
/// The reference date drives every relative expression (`today`,
/// `tomorrow`, `next friday`, `in 3 days`, month rollover), which keeps
/// tests deterministic.
pub fn parse_with_reference(text: &str, today: NaiveDate) -> ParsedRequest {
    match parse_inner(text, today) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!("Natural language parse failed: {}", err);
            ParsedRequest::failure(err)
        }
    }
}

fn parse_inner(text: &str, today: NaiveDate) -> Result<ParsedRequest> {
    // Matching is case-insensitive by construction: everything downstream
    // sees the lowercased input, titles included.
    let input = text.trim().to_lowercase();

    let title = extract_title(&input);
    let date = date_rules::resolve_date(&input, today)?;
    let time = time_of_day::extract_time(&input).unwrap_or_else(|| DEFAULT_TIME.to_string());
    let duration = duration::extract_duration(&input)
        .unwrap_or_else(|| duration::suggest_duration(&title, &input));
    let description = format!("Scheduled via AI: \"{}\"", text);

    debug!(
        "Parsed \"{}\" -> title='{}' date={} time={} duration={}",
        text, title, date, time, duration
    );

    Ok(ParsedRequest {
        success: true,
        title,
        date: date.format("%Y-%m-%d").to_string(),
        time,
        duration,
        description,
        message: None,
        error: None,
    })
}

// Title is everything before the first date/time keyword. The trailing part
// of the match only locates the boundary; group 1 is what we keep.
static TITLE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?)\s+(?:on|at|tomorrow|today|next|this|\d{1,2}(?:st|nd|rd|th))").unwrap()
});

static LEADING_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:schedule|create|add|book|set up)\s+(?:a|an|the)?\s*(?:meeting|appointment)?")
        .unwrap()
});

fn extract_title(input: &str) -> String {
    let raw = match TITLE_BOUNDARY.captures(input) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()).trim().to_string(),
        None => return DEFAULT_TITLE.to_string(),
    };
    let stripped = LEADING_VERB.replace(&raw, "");
    let title = stripped.trim();
    if title.is_empty() { DEFAULT_TITLE.to_string() } else { title.to_string() }
}
