//! The priority-ordered pattern table and its compiler.

use regex::{Captures, Regex};

use crate::api::{Context, ParsedTaskData};
use crate::engine::{BucketMask, Stage, StageError, TriggerScan};
use crate::rules::recurrence::helpers::{
    COUNT_ALT, build_rule, expand_weekday_range, is_valid_rule, parse_count, weekday_codes_in,
};
use crate::vocab::Vocabulary;
use crate::{Span, excise};

/// A handler builds a candidate rule string from the match, or bails with
/// `None` when something inside the matched phrase does not resolve (an
/// unrecognized ordinal or weekday). `None` falls through to the next pattern.
pub(crate) type Handler =
    Box<dyn Fn(&Captures<'_>, &Vocabulary) -> Option<String> + Send + Sync>;

/// One entry of the pattern table.
pub(crate) struct RecurrencePattern {
    pub name: &'static str,
    pub regex: Regex,
    /// Coarse buckets that must all be present in the input for this pattern
    /// to be tried at all.
    pub buckets: BucketMask,
    pub handler: Handler,
}

impl std::fmt::Debug for RecurrencePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecurrencePattern")
            .field("name", &self.name)
            .field("regex", &self.regex.as_str())
            .field("buckets", &self.buckets)
            .finish()
    }
}

/// The compiled, immutable pattern table for one vocabulary.
pub(crate) struct RecurrenceCompiler {
    patterns: Vec<RecurrencePattern>,
    vocab: Vocabulary,
}

impl RecurrenceCompiler {
    pub(crate) fn new(vocab: &Vocabulary) -> Self {
        RecurrenceCompiler { patterns: build_table(vocab), vocab: vocab.clone() }
    }

    /// Walk the table in priority order; first valid candidate wins.
    pub(crate) fn detect(&self, text: &str) -> Option<(String, Span)> {
        let scan = TriggerScan::scan(text, &self.vocab);

        for pattern in &self.patterns {
            if !scan.buckets.contains(pattern.buckets) {
                continue;
            }
            let Some(caps) = pattern.regex.captures(text) else {
                continue;
            };
            let Some(rule) = (pattern.handler)(&caps, &self.vocab) else {
                continue;
            };
            if !is_valid_rule(&rule) {
                continue;
            }
            let m = caps.get(0)?;
            log::debug!("recurrence pattern '{}' matched '{}' -> {rule}", pattern.name, m.as_str());
            return Some((rule, Span { start: m.start(), end: m.end() }));
        }
        None
    }
}

impl Stage for RecurrenceCompiler {
    fn name(&self) -> &'static str {
        "recurrence"
    }

    fn extract(
        &self,
        text: &str,
        draft: &mut ParsedTaskData,
        _ctx: &Context,
    ) -> Result<String, StageError> {
        match self.detect(text) {
            Some((rule, span)) => {
                draft.recurrence = Some(rule);
                Ok(excise(text, span))
            }
            None => Ok(text.to_string()),
        }
    }
}

/// Build the table, ordered strictly from most to least specific.
fn build_table(vocab: &Vocabulary) -> Vec<RecurrencePattern> {
    let every = vocab.every_alt();
    let other = vocab.other_alt();
    let ordinal = vocab.ordinal_alt();
    let weekday = vocab.weekday_alt();
    let weekly = vocab.weekly_alt();
    let monthly = vocab.monthly_alt();
    let period = vocab.period_alt();
    let freq_word = vocab.freq_word_alt();
    let wd_group = vocab.weekday_group_alt();
    let we_group = vocab.weekend_group_alt();

    vec![
        // 1. "every 2nd tuesday", "each last friday"
        pattern! {
            name: "every <ordinal> <weekday>",
            regex: format!(r"(?i)\b(?:{every})\s+({ordinal})\s+({weekday})\b"),
            buckets: BucketMask::EVERYISH | BucketMask::ORDINALISH | BucketMask::WEEKDAYISH,
            prod: |caps, vocab| {
                let pos = vocab.ordinal_value(caps.get(1)?.as_str())?;
                let day = vocab.weekday_code(caps.get(2)?.as_str())?;
                Some(build_rule("MONTHLY", None, Some(day), None, Some(pos)))
            }
        },
        // 2. "monthly on the 2nd tuesday"
        pattern! {
            name: "<monthly> on the <ordinal> <weekday>",
            regex: format!(r"(?i)\b(?:{monthly})\s+on\s+(?:the\s+)?({ordinal})\s+({weekday})\b"),
            buckets: BucketMask::FREQWORDISH | BucketMask::ORDINALISH | BucketMask::WEEKDAYISH,
            prod: |caps, vocab| {
                let pos = vocab.ordinal_value(caps.get(1)?.as_str())?;
                let day = vocab.weekday_code(caps.get(2)?.as_str())?;
                Some(build_rule("MONTHLY", None, Some(day), None, Some(pos)))
            }
        },
        // 3. "monthly on the 15th"
        pattern! {
            name: "<monthly> on the <day-of-month>",
            regex: format!(r"(?i)\b(?:{monthly})\s+on\s+(?:the\s+)?(\d{{1,2}})(?:st|nd|rd|th)?\b"),
            buckets: BucketMask::FREQWORDISH | BucketMask::HAS_DIGITS,
            prod: |caps, _vocab| {
                let day: u32 = caps.get(1)?.as_str().parse().ok()?;
                if !(1..=31).contains(&day) {
                    return None;
                }
                Some(build_rule("MONTHLY", None, None, Some(day), None))
            }
        },
        // 4. "every 3 weeks", "every two days"
        pattern! {
            name: "every <n> <period>",
            regex: format!(r"(?i)\b(?:{every})\s+({COUNT_ALT})\s+({period})\b"),
            buckets: BucketMask::EVERYISH,
            prod: |caps, vocab| {
                let n = parse_count(caps.get(1)?.as_str())?;
                if n == 0 {
                    return None;
                }
                let freq = vocab.period_freq(caps.get(2)?.as_str())?;
                Some(build_rule(freq.as_rule(), Some(n), None, None, None))
            }
        },
        // 5. "every other tuesday"
        pattern! {
            name: "every other <weekday>",
            regex: format!(r"(?i)\b(?:{every})\s+(?:{other})\s+({weekday})\b"),
            buckets: BucketMask::EVERYISH | BucketMask::WEEKDAYISH,
            prod: |caps, vocab| {
                let day = vocab.weekday_code(caps.get(1)?.as_str())?;
                Some(build_rule("WEEKLY", Some(2), Some(day), None, None))
            }
        },
        // 6. "every other week"
        pattern! {
            name: "every other <period>",
            regex: format!(r"(?i)\b(?:{every})\s+(?:{other})\s+({period})\b"),
            buckets: BucketMask::EVERYISH,
            prod: |caps, vocab| {
                let freq = vocab.period_freq(caps.get(1)?.as_str())?;
                Some(build_rule(freq.as_rule(), Some(2), None, None, None))
            }
        },
        // 7. "weekly on monday(s)"
        pattern! {
            name: "<weekly> on <weekday>",
            regex: format!(r"(?i)\b(?:{weekly})\s+on\s+({weekday})s?\b"),
            buckets: BucketMask::FREQWORDISH | BucketMask::WEEKDAYISH,
            prod: |caps, vocab| {
                let day = vocab.weekday_code(caps.get(1)?.as_str())?;
                Some(build_rule("WEEKLY", None, Some(day), None, None))
            }
        },
        // 8. "mondays, wednesdays and fridays" (two or more distinct days)
        pattern! {
            name: "<weekday> list",
            regex: format!(
                r"(?i)\b(?:(?:{every})\s+)?(?:{weekday})s?(?:(?:\s*[,&]\s*|\s+and\s+)(?:{weekday})s?)+\b"
            ),
            buckets: BucketMask::WEEKDAYISH,
            prod: |caps, vocab| {
                let codes = weekday_codes_in(caps.get(0)?.as_str(), vocab);
                if codes.len() < 2 {
                    return None;
                }
                Some(build_rule("WEEKLY", None, Some(&codes.join(",")), None, None))
            }
        },
        // 9. "monday to friday", "mon-fri" (wraps when end precedes start)
        pattern! {
            name: "<weekday> range",
            regex: format!(
                r"(?i)\b(?:(?:{every})\s+)?({weekday})s?\s*(?:to|through|thru|[-])\s*({weekday})s?\b"
            ),
            buckets: BucketMask::WEEKDAYISH,
            prod: |caps, vocab| {
                let from = vocab.weekday_code(caps.get(1)?.as_str())?;
                let to = vocab.weekday_code(caps.get(2)?.as_str())?;
                let days = expand_weekday_range(from, to)?;
                Some(build_rule("WEEKLY", None, Some(&days), None, None))
            }
        },
        // 10. "every weekday", "weekends"
        pattern! {
            name: "<weekday/weekend group>",
            regex: format!(r"(?i)\b(?:(?:{every})\s+)?({wd_group}|{we_group})s?\b"),
            buckets: BucketMask::GROUPISH,
            prod: |caps, vocab| {
                let word = caps.get(1)?.as_str();
                let days = if vocab.is_weekday_group(word) {
                    "MO,TU,WE,TH,FR"
                } else if vocab.is_weekend_group(word) {
                    "SA,SU"
                } else {
                    return None;
                };
                Some(build_rule("WEEKLY", None, Some(days), None, None))
            }
        },
        // 11. "every monday" or a bare plural ("tuesdays")
        pattern! {
            name: "every <weekday> / <weekday>s",
            regex: format!(r"(?i)\b(?:(?:{every})\s+({weekday})|({weekday})s)\b"),
            buckets: BucketMask::WEEKDAYISH,
            prod: |caps, vocab| {
                let word = caps.get(1).or_else(|| caps.get(2))?;
                let day = vocab.weekday_code(word.as_str())?;
                Some(build_rule("WEEKLY", None, Some(day), None, None))
            }
        },
        // 12. bare frequency words
        pattern! {
            name: "<frequency>",
            regex: format!(r"(?i)\b({freq_word})\b"),
            buckets: BucketMask::FREQWORDISH,
            prod: |caps, vocab| {
                let freq = vocab.freq_of_word(caps.get(1)?.as_str())?;
                Some(build_rule(freq.as_rule(), None, None, None, None))
            }
        },
    ]
}
