//! Tag and user-field extraction.
//!
//! Both extractors key off configured trigger prefixes. A match only counts
//! when the trigger sits at the start of a word (string start or preceded by
//! whitespace); the regex crate has no lookbehind, so that check is done on
//! the match position.

use regex::Regex;

use crate::api::{Context, ParsedTaskData, UserFieldValue};
use crate::config::{FieldKind, PROPERTY_STATUS, PROPERTY_TAGS, ParserConfig, UserField};
use crate::engine::{Stage, StageError};
use crate::{Span, excise_all};

/// `#`-style tag extraction. Tag bodies allow Unicode letters, numbers and
/// marks plus `_`, `/` and `-`, so accented, Cyrillic and CJK tags and
/// hierarchical paths like `work/reports` all pass.
pub(crate) struct TagStage {
    regex: Option<Regex>,
}

impl TagStage {
    pub(crate) fn new(config: &ParserConfig) -> Self {
        let regex = config.trigger_for(PROPERTY_TAGS).map(|trigger| {
            Regex::new(&format!(
                r"{}([\p{{L}}\p{{N}}\p{{M}}_/-]+)",
                regex::escape(trigger)
            ))
            .unwrap()
        });
        TagStage { regex }
    }
}

impl Stage for TagStage {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn extract(
        &self,
        text: &str,
        draft: &mut ParsedTaskData,
        _ctx: &Context,
    ) -> Result<String, StageError> {
        let Some(regex) = &self.regex else {
            return Ok(text.to_string());
        };

        let mut spans = Vec::new();
        for caps in regex.captures_iter(text) {
            let whole = caps.get(0).ok_or_else(|| StageError::new("missing match"))?;
            if !at_word_start(text, whole.start()) {
                continue;
            }
            if let Some(body) = caps.get(1) {
                draft.tags.push(body.as_str().to_string());
                spans.push(Span { start: whole.start(), end: whole.end() });
            }
        }
        Ok(excise_all(text, &spans))
    }
}

struct FieldMatcher {
    field: UserField,
    regex: Regex,
}

/// User-mapped field extraction, one matcher per enabled non-tag/status
/// trigger. Triggers pointing at no configured field are skipped outright.
pub(crate) struct UserFieldStage {
    matchers: Vec<FieldMatcher>,
}

impl UserFieldStage {
    pub(crate) fn new(config: &ParserConfig) -> Self {
        let mut matchers = Vec::new();
        for trigger in &config.triggers {
            if !trigger.enabled
                || trigger.trigger.is_empty()
                || trigger.property == PROPERTY_TAGS
                || trigger.property == PROPERTY_STATUS
            {
                continue;
            }
            let Some(field) = config.field(&trigger.property) else {
                continue;
            };
            // A double-quoted value or a single bare token.
            let regex = Regex::new(&format!(
                r#"{}(?:"([^"]*)"|(\S+))"#,
                regex::escape(&trigger.trigger)
            ))
            .unwrap();
            matchers.push(FieldMatcher { field: field.clone(), regex });
        }
        UserFieldStage { matchers }
    }
}

impl Stage for UserFieldStage {
    fn name(&self) -> &'static str {
        "user-fields"
    }

    fn extract(
        &self,
        text: &str,
        draft: &mut ParsedTaskData,
        _ctx: &Context,
    ) -> Result<String, StageError> {
        let mut line = text.to_string();

        for matcher in &self.matchers {
            let mut values: Vec<String> = Vec::new();
            let mut spans: Vec<Span> = Vec::new();

            for caps in matcher.regex.captures_iter(&line) {
                let whole = caps.get(0).ok_or_else(|| StageError::new("missing match"))?;
                if !at_word_start(&line, whole.start()) {
                    continue;
                }
                let raw = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                values.push(normalize(&raw, matcher.field.kind));
                spans.push(Span { start: whole.start(), end: whole.end() });

                if matcher.field.kind != FieldKind::List {
                    break;
                }
            }

            if values.is_empty() {
                continue;
            }
            let value = match matcher.field.kind {
                FieldKind::List => UserFieldValue::Many(values),
                _ => UserFieldValue::Single(values.swap_remove(0)),
            };
            draft.user_fields.insert(matcher.field.id.clone(), value);
            line = excise_all(&line, &spans);
        }
        Ok(line)
    }
}

fn normalize(raw: &str, kind: FieldKind) -> String {
    match kind {
        // Dates are stored raw; parsing is the consumer's concern.
        FieldKind::Boolean => {
            if raw.eq_ignore_ascii_case("true") { "true" } else { "false" }.to_string()
        }
        _ => raw.to_string(),
    }
}

fn at_word_start(text: &str, pos: usize) -> bool {
    pos == 0 || text[..pos].ends_with(char::is_whitespace)
}
