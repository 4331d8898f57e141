//! Read-only projections over parsed results: preview hints for inline UI
//! feedback and status autocompletion. Pure functions, no state.

use crate::api::{ParsedTaskData, UserFieldValue};
use crate::config::StatusConfig;

/// One line of preview feedback: a pictogram and the text next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayHint {
    pub icon: &'static str,
    pub text: String,
}

impl DisplayHint {
    fn new(icon: &'static str, text: impl Into<String>) -> Self {
        DisplayHint { icon, text: text.into() }
    }
}

/// Render a parsed result as an ordered hint list: title, due, recurrence,
/// status, tags, user fields (sorted by id), details. Absent fields produce
/// no hint.
pub fn preview_hints(task: &ParsedTaskData) -> Vec<DisplayHint> {
    let mut hints = vec![DisplayHint::new("📝", &task.title)];

    if let Some(date) = &task.due_date {
        let text = match &task.due_time {
            Some(time) => format!("{date} {time}"),
            None => date.clone(),
        };
        hints.push(DisplayHint::new("📅", text));
    }
    if let Some(rule) = &task.recurrence {
        hints.push(DisplayHint::new("🔁", rule));
    }
    if let Some(status) = &task.status {
        hints.push(DisplayHint::new("✅", status));
    }
    if !task.tags.is_empty() {
        hints.push(DisplayHint::new("🏷️", task.tags.join(", ")));
    }

    let mut fields: Vec<_> = task.user_fields.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));
    for (id, value) in fields {
        let text = match value {
            UserFieldValue::Single(v) => format!("{id}: {v}"),
            UserFieldValue::Many(vs) => format!("{id}: {}", vs.join(", ")),
        };
        hints.push(DisplayHint::new("🔧", text));
    }

    if let Some(details) = &task.details {
        hints.push(DisplayHint::new("📄", details));
    }
    hints
}

/// Rank configured statuses against a partial query: prefix hits before
/// substring hits, ties broken by shorter then lexicographic label. An empty
/// query returns every status in configured order.
pub fn suggest_statuses(statuses: &[StatusConfig], query: &str) -> Vec<StatusConfig> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return statuses.to_vec();
    }

    let mut scored: Vec<(u8, &StatusConfig)> = statuses
        .iter()
        .filter_map(|status| {
            let label = status.label.to_lowercase();
            let value = status.value.to_lowercase();
            let score = if label.starts_with(&query) || value.starts_with(&query) {
                2
            } else if label.contains(&query) || value.contains(&query) {
                1
            } else {
                return None;
            };
            Some((score, status))
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.1.label.len().cmp(&b.1.label.len()))
            .then_with(|| a.1.label.cmp(&b.1.label))
    });
    scored.into_iter().map(|(_, status)| status.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn hints_follow_a_fixed_order() {
        let task = parse("Plan sprint every other week due friday #work\nbring slides");
        let hints = preview_hints(&task);
        let icons: Vec<&str> = hints.iter().map(|h| h.icon).collect();
        assert_eq!(icons, vec!["📝", "📅", "🔁", "🏷️", "📄"]);
        assert_eq!(hints[0].text, "Plan sprint");
        assert_eq!(hints[2].text, "FREQ=WEEKLY;INTERVAL=2");
    }

    #[test]
    fn absent_fields_produce_no_hints() {
        let task = parse("water the plants");
        let hints = preview_hints(&task);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].text, "water the plants");
    }

    fn statuses() -> Vec<StatusConfig> {
        let status = |value: &str, label: &str| StatusConfig {
            value: value.into(),
            label: label.into(),
        };
        vec![
            status("todo", "To Do"),
            status("doing", "Doing"),
            status("done", "Done"),
            status("blocked", "Blocked"),
        ]
    }

    #[test]
    fn prefix_hits_outrank_substring_hits() {
        let ranked = suggest_statuses(&statuses(), "do");
        let labels: Vec<&str> = ranked.iter().map(|s| s.label.as_str()).collect();
        // "To Do" only contains "do"; the others start with it.
        assert_eq!(labels, vec!["Done", "Doing", "To Do"]);
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let ranked = suggest_statuses(&statuses(), "  ");
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].label, "To Do");
    }

    #[test]
    fn no_hit_means_no_suggestion() {
        assert!(suggest_statuses(&statuses(), "zzz").is_empty());
    }
}
