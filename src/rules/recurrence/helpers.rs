//! Shared helpers for recurrence handlers.

use crate::vocab::{Vocabulary, WEEKDAY_CYCLE};

/// Assemble a rule string with components in canonical order. Only populated
/// components are emitted; `FREQ=` is always present.
pub(super) fn build_rule(
    freq: &str,
    interval: Option<u32>,
    byday: Option<&str>,
    bymonthday: Option<u32>,
    bysetpos: Option<i32>,
) -> String {
    let mut rule = format!("FREQ={freq}");
    if let Some(n) = interval {
        rule.push_str(&format!(";INTERVAL={n}"));
    }
    if let Some(days) = byday {
        rule.push_str(&format!(";BYDAY={days}"));
    }
    if let Some(day) = bymonthday {
        rule.push_str(&format!(";BYMONTHDAY={day}"));
    }
    if let Some(pos) = bysetpos {
        rule.push_str(&format!(";BYSETPOS={pos}"));
    }
    rule
}

/// Parse a small count: digits, or the spelled-out numbers one..twelve.
pub(super) fn parse_count(word: &str) -> Option<u32> {
    match word.trim().to_lowercase().as_str() {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        "eleven" => Some(11),
        "twelve" => Some(12),
        other => other.parse::<u32>().ok(),
    }
}

/// The alternation accepted by [`parse_count`], for pattern regexes.
pub(super) const COUNT_ALT: &str =
    "\\d{1,3}|eleven|twelve|seven|three|eight|four|five|nine|one|two|six|ten";

/// Collect the distinct weekday codes mentioned in `text`, in order of first
/// appearance.
pub(super) fn weekday_codes_in(text: &str, vocab: &Vocabulary) -> Vec<String> {
    let word_re = regex!(r"[A-Za-z]+");
    let mut codes: Vec<String> = Vec::new();
    for word in word_re.find_iter(text) {
        if let Some(code) = vocab.weekday_code(word.as_str())
            && !codes.iter().any(|c| c == code)
        {
            codes.push(code.to_string());
        }
    }
    codes
}

/// Expand a contiguous weekday run from `start` through `end` over the fixed
/// Monday-first cycle, wrapping when the end precedes the start.
pub(super) fn expand_weekday_range(start: &str, end: &str) -> Option<String> {
    let from = WEEKDAY_CYCLE.iter().position(|c| *c == start)?;
    let to = WEEKDAY_CYCLE.iter().position(|c| *c == end)?;

    let len = (to + 7 - from) % 7 + 1;
    let days: Vec<&str> = (0..len).map(|i| WEEKDAY_CYCLE[(from + i) % 7]).collect();
    Some(days.join(","))
}

/// Candidate validation: a rule must carry `FREQ=` and must never carry an
/// empty (or literally undefined) `BYDAY=` component.
pub(super) fn is_valid_rule(rule: &str) -> bool {
    if !rule.contains("FREQ=") {
        return false;
    }
    if let Some(idx) = rule.find("BYDAY=") {
        let value = rule[idx + "BYDAY=".len()..].split(';').next().unwrap_or("");
        if value.is_empty() || value == "undefined" {
            return false;
        }
    }
    true
}
