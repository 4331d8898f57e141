//! Public parsing API.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::engine::{self, Stage};
use crate::rules::date::DateStage;
use crate::rules::fields::{TagStage, UserFieldStage};
use crate::rules::recurrence::RecurrenceCompiler;
use crate::rules::status::StatusStage;
use crate::vocab::Vocabulary;

/// Parsing context: the reference time relative dates resolve against
/// ("tomorrow", "next friday", "in 2 weeks").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Context {
    pub reference_time: NaiveDateTime,
}

impl Default for Context {
    fn default() -> Self {
        Context { reference_time: default_reference() }
    }
}

#[cfg(not(test))]
fn default_reference() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

// A fixed Tuesday morning, so relative dates are deterministic under test.
#[cfg(test)]
fn default_reference() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2025, 3, 4)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap()
}

/// A user-field value: single for `text`/`number`/`boolean`/`date` fields,
/// many for `list` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserFieldValue {
    Single(String),
    Many(Vec<String>),
}

/// The structured result of parsing one input string.
///
/// Absent fields mean "not detected", never "parse failure"; [`parse`] and
/// [`TaskParser::parse`] are total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTaskData {
    /// The residual text after every extractor took its matches; never empty.
    pub title: String,
    /// Everything after the first line break, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// `HH:MM`, only when the hour was stated explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Canonical recurrence rule string (`FREQ=...;...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    /// Deduplicated, in order of first appearance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Keyed by user field id.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub user_fields: HashMap<String, UserFieldValue>,
}

/// A configured parser instance.
///
/// All pattern tables are compiled at construction and immutable afterwards,
/// so one instance can serve concurrent `parse` calls without locking.
pub struct TaskParser {
    config: ParserConfig,
    tags: TagStage,
    status: StatusStage,
    recurrence: RecurrenceCompiler,
    fields: UserFieldStage,
    dates: DateStage,
}

impl TaskParser {
    /// A parser over `config` with the stock English vocabulary.
    pub fn new(config: ParserConfig) -> Self {
        Self::with_vocabulary(config, &Vocabulary::english())
    }

    pub fn with_vocabulary(config: ParserConfig, vocab: &Vocabulary) -> Self {
        TaskParser {
            tags: TagStage::new(&config),
            status: StatusStage::new(&config, vocab),
            recurrence: RecurrenceCompiler::new(vocab),
            fields: UserFieldStage::new(&config),
            dates: DateStage::new(vocab, config.default_to_due),
            config,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse against the current local time.
    pub fn parse(&self, input: &str) -> ParsedTaskData {
        self.parse_with(input, &Context::default())
    }

    /// Parse against an explicit reference time.
    pub fn parse_with(&self, input: &str, ctx: &Context) -> ParsedTaskData {
        let stages: [&dyn Stage; 5] =
            [&self.tags, &self.status, &self.recurrence, &self.fields, &self.dates];
        engine::run(&stages, input, ctx)
    }
}

/// Parse one input with the stock configuration (`#` tags, implicit dates
/// assigned as due dates).
///
/// ```
/// let task = taskling::parse("Pay rent every other week #finance");
/// assert_eq!(task.title, "Pay rent");
/// assert_eq!(task.recurrence.as_deref(), Some("FREQ=WEEKLY;INTERVAL=2"));
/// assert_eq!(task.tags, vec!["finance"]);
/// ```
pub fn parse(input: &str) -> ParsedTaskData {
    TaskParser::new(ParserConfig::with_defaults()).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PropertyTrigger, StatusConfig};

    #[test]
    fn dentist_scenario() {
        let task = parse("Call dentist tomorrow at 3pm #health");
        assert_eq!(task.title, "Call dentist");
        assert_eq!(task.tags, vec!["health"]);
        assert_eq!(task.due_date.as_deref(), Some("2025-03-05"));
        assert_eq!(task.due_time.as_deref(), Some("15:00"));
        assert_eq!(task.recurrence, None);
    }

    #[test]
    fn rent_scenario() {
        let task = parse("Pay rent every other week");
        assert_eq!(task.title, "Pay rent");
        assert_eq!(task.recurrence.as_deref(), Some("FREQ=WEEKLY;INTERVAL=2"));
    }

    #[test]
    fn standup_scenario() {
        let task = parse("Standup every weekday");
        assert_eq!(task.title, "Standup");
        assert_eq!(task.recurrence.as_deref(), Some("FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR"));
    }

    #[test]
    fn range_beats_single_weekday() {
        let task = parse("Review due monday to friday");
        assert_eq!(task.recurrence.as_deref(), Some("FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR"));
        assert_eq!(task.due_date, None);
        assert_eq!(task.title, "Review due");
    }

    #[test]
    fn empty_input_scenario() {
        let task = parse("");
        assert_eq!(task.title, "Untitled Task");
        assert!(task.tags.is_empty());
        assert_eq!(task.details, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.due_time, None);
        assert_eq!(task.status, None);
        assert_eq!(task.recurrence, None);
        assert!(task.user_fields.is_empty());
    }

    #[test]
    fn configured_status_scenario() {
        let parser = TaskParser::new(ParserConfig {
            statuses: vec![StatusConfig { value: "done".into(), label: "Done".into() }],
            ..ParserConfig::with_defaults()
        });
        let task = parser.parse("Ship it done");
        assert_eq!(task.status.as_deref(), Some("done"));
        assert_eq!(task.title, "Ship it");
    }

    #[test]
    fn stages_compose_over_one_line() {
        let task = parse("Plan sprint every other week due friday #work\nbring slides");
        assert_eq!(task.title, "Plan sprint");
        assert_eq!(task.tags, vec!["work"]);
        assert_eq!(task.recurrence.as_deref(), Some("FREQ=WEEKLY;INTERVAL=2"));
        assert_eq!(task.due_date.as_deref(), Some("2025-03-07"));
        assert_eq!(task.details.as_deref(), Some("bring slides"));
    }

    #[test]
    fn user_fields_flow_through() {
        let mut config = ParserConfig::with_defaults();
        config.user_fields.push(crate::config::UserField {
            id: "project".into(),
            key: "project".into(),
            kind: crate::config::FieldKind::Text,
            display_name: "Project".into(),
        });
        config.triggers.push(PropertyTrigger {
            property: "project".into(),
            trigger: "+".into(),
            enabled: true,
        });
        let task = TaskParser::new(config).parse("wire review +taskling tomorrow");
        assert_eq!(
            task.user_fields.get("project"),
            Some(&UserFieldValue::Single("taskling".into()))
        );
        assert_eq!(task.due_date.as_deref(), Some("2025-03-05"));
        assert_eq!(task.title, "wire review");
    }

    #[test]
    fn duplicate_tags_are_dropped() {
        let task = parse("read #book #book #books");
        assert_eq!(task.tags, vec!["book", "books"]);
    }
}
