//! Store-backed scheduling flows: the parse -> conflict -> alternatives
//! pipeline the agent endpoints run, against a temp-directory store.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use slotwise::agent::{day_insights, parse_and_check, review_booking, smart_schedule};
use slotwise::availability::ScanWindow;
use slotwise::conflict::{ConflictSeverity, ConflictType};
use slotwise::store::{AppointmentDraft, AppointmentStore};

// Wednesday
fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
}

fn draft(title: &str, date: &str, time: &str, duration: u32) -> AppointmentDraft {
    AppointmentDraft {
        title: title.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        duration,
        attendees: vec!["alex@example.com".to_string()],
        description: "weekly".to_string(),
    }
}

#[test]
fn conflicting_request_gets_ranked_alternatives() {
    let dir = tempdir().unwrap();
    let store = AppointmentStore::at_path(dir.path().join("appointments.json"));
    store.add(draft("Existing sync", "2026-08-06", "14:00", 60)).unwrap();

    // Parse a request that lands exactly on the booked hour
    let parse = parse_and_check(&store, "team meeting tomorrow at 2pm", reference()).unwrap();
    assert!(parse.success);
    assert!(parse.has_conflicts);
    let parsed = parse.parsed.unwrap();

    // The UI follow-up: ask for alternatives on the same date
    let schedule =
        smart_schedule(&store, &parsed.date, parsed.duration, &ScanWindow::default()).unwrap();
    assert!(schedule.total_options > 0);
    let best = schedule.best_slot.unwrap();
    assert_eq!(best.time, "10:00");
    // Every proposed slot must itself be conflict-free
    for slot in &schedule.all_available_slots {
        let review =
            review_booking(&store, &parsed.date, &slot.time, slot.duration, None, reference())
                .unwrap();
        assert!(!review.conflict.has_conflict, "slot {} conflicts", slot.time);
    }
}

#[test]
fn editing_an_appointment_excludes_itself_from_conflicts() {
    let dir = tempdir().unwrap();
    let store = AppointmentStore::at_path(dir.path().join("appointments.json"));
    let existing = store.add(draft("Planning", "2026-08-06", "10:00", 60)).unwrap();

    // Unchanged time conflicts with itself unless excluded
    let with_self =
        review_booking(&store, "2026-08-06", "10:00", 60, None, reference()).unwrap();
    assert!(with_self.conflict.has_conflict);

    let excluded =
        review_booking(&store, "2026-08-06", "10:00", 60, Some(&existing.id), reference())
            .unwrap();
    assert!(!excluded.conflict.has_conflict);
    assert_eq!(excluded.conflict.severity, ConflictSeverity::None);
}

#[test]
fn review_classifies_overlap_shapes() {
    let dir = tempdir().unwrap();
    let store = AppointmentStore::at_path(dir.path().join("appointments.json"));
    store.add(draft("Block", "2026-08-06", "09:00", 60)).unwrap();

    // Candidate fully inside the block
    let inside = review_booking(&store, "2026-08-06", "09:30", 30, None, reference()).unwrap();
    assert_eq!(inside.conflict.conflicts[0].conflict_type, ConflictType::CompleteOverlap);

    // Candidate hangs off the end of the block
    let tail = review_booking(&store, "2026-08-06", "09:30", 60, None, reference()).unwrap();
    assert_eq!(tail.conflict.conflicts[0].conflict_type, ConflictType::PartialOverlapStart);

    // Candidate leads into the block
    let head = review_booking(&store, "2026-08-06", "08:30", 60, None, reference()).unwrap();
    assert_eq!(head.conflict.conflicts[0].conflict_type, ConflictType::PartialOverlapEnd);
}

#[test]
fn review_reports_timing_findings_alongside_conflicts() {
    let dir = tempdir().unwrap();
    let store = AppointmentStore::at_path(dir.path().join("appointments.json"));

    // Saturday before business hours, in the past
    let review = review_booking(&store, "2026-08-01", "08:00", 30, None, reference()).unwrap();
    assert!(!review.conflict.has_conflict);
    assert!(!review.timing.is_valid);
    assert!(review.timing.errors.iter().any(|e| e.contains("past")));
    assert!(review.timing.warnings.iter().any(|w| w.contains("weekend")));
    assert!(review.timing.warnings.iter().any(|w| w.contains("before 9 AM")));
}

#[test]
fn back_to_back_meetings_show_up_in_review() {
    let dir = tempdir().unwrap();
    let store = AppointmentStore::at_path(dir.path().join("appointments.json"));
    store.add(draft("Morning", "2026-08-06", "09:00", 60)).unwrap();

    let review = review_booking(&store, "2026-08-06", "10:00", 30, None, reference()).unwrap();
    assert!(!review.conflict.has_conflict);
    assert_eq!(review.back_to_back.len(), 1);
    assert_eq!(review.back_to_back[0].title, "Morning");
}

#[test]
fn day_insights_reflect_load_and_missing_breaks() {
    let dir = tempdir().unwrap();
    let store = AppointmentStore::at_path(dir.path().join("appointments.json"));
    store.add(draft("First", "2026-08-06", "09:00", 120)).unwrap();
    store.add(draft("Second", "2026-08-06", "11:05", 120)).unwrap();
    store.add(draft("Third", "2026-08-06", "14:00", 120)).unwrap();

    let insights = day_insights(&store, "2026-08-06").unwrap();
    assert_eq!(insights.load.total_meetings, 3);
    assert_eq!(insights.load.total_minutes, 360);
    // 360 of 480 minutes = 75%
    assert_eq!(insights.load.load_percentage, 75);
    // Only the 5-minute turnaround between First and Second needs a break
    assert_eq!(insights.suggested_breaks.len(), 1);
    assert_eq!(insights.suggested_breaks[0].after, "First");
    assert_eq!(insights.suggested_breaks[0].current_gap, 5);
}

#[test]
fn fully_booked_day_offers_no_alternatives() {
    let dir = tempdir().unwrap();
    let store = AppointmentStore::at_path(dir.path().join("appointments.json"));
    store.add(draft("All day", "2026-08-06", "09:00", 480)).unwrap();

    let schedule = smart_schedule(&store, "2026-08-06", 30, &ScanWindow::default()).unwrap();
    assert_eq!(schedule.total_options, 0);
    assert!(schedule.best_slot.is_none());
    assert!(schedule.all_available_slots.is_empty());
}
