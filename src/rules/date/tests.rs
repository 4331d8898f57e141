use chrono::NaiveDate;

use crate::api::{Context, ParsedTaskData};
use crate::engine::Stage;
use crate::rules::date::DateStage;
use crate::vocab::Vocabulary;

// Tuesday morning.
fn ctx() -> Context {
    Context {
        reference_time: NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
    }
}

fn extract(input: &str, default_to_due: bool) -> (ParsedTaskData, String) {
    let stage = DateStage::new(&Vocabulary::english(), default_to_due);
    let mut draft = ParsedTaskData::default();
    let residue = stage.extract(input, &mut draft, &ctx()).unwrap();
    (draft, residue)
}

#[test]
fn triggered_iso_date() {
    let (draft, residue) = extract("pay bill due 2025-12-01", true);
    assert_eq!(draft.due_date.as_deref(), Some("2025-12-01"));
    assert_eq!(draft.due_time, None);
    assert_eq!(residue, "pay bill");
}

#[test]
fn trigger_tolerates_connectives() {
    let (draft, residue) = extract("submit report due on friday", true);
    assert_eq!(draft.due_date.as_deref(), Some("2025-03-07"));
    assert_eq!(residue, "submit report");
}

#[test]
fn every_trigger_occurrence_is_processed() {
    let (draft, residue) = extract("draft due friday deadline 2025-04-01", true);
    assert_eq!(draft.due_date.as_deref(), Some("2025-04-01"));
    assert_eq!(residue, "draft");
}

#[test]
fn rejected_trigger_falls_back_to_implicit() {
    // "on" is a due trigger, but "call" is no date, so the implicit phase
    // picks up "tomorrow" instead.
    let (draft, residue) = extract("on call tomorrow", true);
    assert_eq!(draft.due_date.as_deref(), Some("2025-03-05"));
    assert_eq!(residue, "on call");
}

#[test]
fn implicit_date_with_time() {
    let (draft, residue) = extract("dentist tomorrow at 3pm", true);
    assert_eq!(draft.due_date.as_deref(), Some("2025-03-05"));
    assert_eq!(draft.due_time.as_deref(), Some("15:00"));
    assert_eq!(residue, "dentist");
}

#[test]
fn implicit_date_discarded_without_default_to_due() {
    let (draft, residue) = extract("call mom tomorrow", false);
    assert_eq!(draft.due_date, None);
    assert_eq!(draft.due_time, None);
    // The span is removed regardless of assignment.
    assert_eq!(residue, "call mom");
}

#[test]
fn bare_weekday_resolves_forward() {
    // Monday already passed this week; the date must land on the next one.
    let (draft, _) = extract("review due monday", true);
    assert_eq!(draft.due_date.as_deref(), Some("2025-03-10"));
}

#[test]
fn yearless_month_day_resolves_forward() {
    let (draft, _) = extract("taxes due jan 15", true);
    assert_eq!(draft.due_date.as_deref(), Some("2026-01-15"));
}

#[test]
fn relative_offsets() {
    let (draft, residue) = extract("ping me in 2 weeks", true);
    assert_eq!(draft.due_date.as_deref(), Some("2025-03-18"));
    assert_eq!(residue, "ping me");

    let (draft, _) = extract("renew passport in 3 months", true);
    assert_eq!(draft.due_date.as_deref(), Some("2025-06-04"));
}

#[test]
fn range_takes_the_end_date() {
    let (draft, residue) = extract("conference june 1 to june 3", true);
    assert_eq!(draft.due_date.as_deref(), Some("2025-06-03"));
    assert_eq!(residue, "conference");
}

#[test]
fn relative_period_words_use_calendar_arithmetic() {
    let (draft, residue) = extract("report due next week", true);
    assert_eq!(draft.due_date.as_deref(), Some("2025-03-11"));
    assert_eq!(residue, "report");

    let (draft, _) = extract("wrap up this week", true);
    assert_eq!(draft.due_date.as_deref(), Some("2025-03-04"));

    let (draft, _) = extract("numbers from last month", true);
    assert_eq!(draft.due_date.as_deref(), Some("2025-02-04"));

    let (draft, _) = extract("plan due next year", true);
    assert_eq!(draft.due_date.as_deref(), Some("2026-03-04"));
}

#[test]
fn free_form_phrases_go_through_the_english_parser() {
    let (draft, _) = extract("report due next friday", true);
    assert!(draft.due_date.is_some());
}

#[test]
fn nearby_due_keyword_assigns_an_implicit_date() {
    // "due" is rejected by the triggered phase ("soon" is no connective) but
    // still marks the implicit date as due, even without default_to_due.
    let (draft, residue) = extract("slides due soon friday", false);
    assert_eq!(draft.due_date.as_deref(), Some("2025-03-07"));
    assert_eq!(residue, "slides due soon");
}

#[test]
fn no_date_leaves_text_untouched() {
    let (draft, residue) = extract("water the plants", true);
    assert_eq!(draft.due_date, None);
    assert_eq!(residue, "water the plants");
}
