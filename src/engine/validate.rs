//! Result finalization.
//!
//! The validator never fails and never adds information; it only fills the
//! title placeholder and drops fields that violate their format invariants.
//! Running it twice is the same as running it once.

use std::collections::HashSet;

use crate::api::ParsedTaskData;
use crate::squeeze;

pub(crate) const UNTITLED: &str = "Untitled Task";

/// Apply the finalization invariants to a freshly assembled record.
pub(crate) fn finalize(draft: &mut ParsedTaskData) {
    let title = squeeze(&draft.title);
    draft.title = if title.is_empty() { UNTITLED.to_string() } else { title };

    let mut seen = HashSet::new();
    draft.tags.retain(|tag| !tag.trim().is_empty() && seen.insert(tag.clone()));

    if let Some(date) = &draft.due_date
        && !regex!(r"^\d{4}-\d{2}-\d{2}$").is_match(date)
    {
        draft.due_date = None;
    }

    if let Some(time) = &draft.due_time
        && !regex!(r"^(?:[01]\d|2[0-3]):[0-5]\d$").is_match(time)
    {
        draft.due_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ParsedTaskData {
        ParsedTaskData {
            title: " Ship  the \t thing ".into(),
            tags: vec!["a".into(), "".into(), "b".into(), "a".into(), "  ".into()],
            due_date: Some("2025-03-04".into()),
            due_time: Some("09:30".into()),
            ..ParsedTaskData::default()
        }
    }

    #[test]
    fn empty_title_becomes_placeholder() {
        let mut d = ParsedTaskData { title: "   ".into(), ..ParsedTaskData::default() };
        finalize(&mut d);
        assert_eq!(d.title, UNTITLED);
    }

    #[test]
    fn tags_are_deduplicated_in_order() {
        let mut d = draft();
        finalize(&mut d);
        assert_eq!(d.tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn malformed_date_and_time_are_dropped() {
        let mut d = draft();
        d.due_date = Some("03/04/2025".into());
        d.due_time = Some("24:00".into());
        finalize(&mut d);
        assert_eq!(d.due_date, None);
        assert_eq!(d.due_time, None);

        let mut ok = draft();
        finalize(&mut ok);
        assert_eq!(ok.due_date.as_deref(), Some("2025-03-04"));
        assert_eq!(ok.due_time.as_deref(), Some("09:30"));
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut once = draft();
        finalize(&mut once);
        let mut twice = once.clone();
        finalize(&mut twice);
        assert_eq!(once, twice);
    }
}
