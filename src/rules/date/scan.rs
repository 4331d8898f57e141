//! Date phrase detection.
//!
//! One compiled regex finds candidate date phrases: a core date shape, an
//! optional range end ("june 1 to june 3"), and an optional trailing clock
//! time ("at 3pm", "15:00"). The scanner only locates phrases; resolving them
//! against the reference time happens in `resolve.rs`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::Span;

// Alternations are ordered longest-first so abbreviations cannot shadow the
// full word they prefix.
const WEEKDAYS: &str = "wednesday|thursday|saturday|tuesday|monday|friday|\
                        sunday|thurs|tues|thur|mon|tue|wed|thu|fri|sat|sun";

const MONTHS: &str = "september|december|november|february|january|october|\
                      august|april|march|sept|june|july|jan|feb|mar|apr|may|\
                      jun|jul|aug|sep|oct|nov|dec";

const TIME: &str = r"\d{1,2}:\d{2}(?:\s*(?:am|pm))?|\d{1,2}\s*(?:am|pm)|noon|midnight";

fn core_alternation() -> String {
    format!(
        r"\d{{4}}-\d{{2}}-\d{{2}}|\d{{1,2}}/\d{{1,2}}(?:/\d{{2,4}})?|in\s+\d{{1,3}}\s+(?:days?|weeks?|months?|years?)|(?:next|this|last)\s+(?:week|month|year|{WEEKDAYS})|(?:{MONTHS})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?|\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS})(?:\s+\d{{4}})?|tomorrow|tonight|today|yesterday|{WEEKDAYS}"
    )
}

static PHRASE: Lazy<Regex> = Lazy::new(|| {
    let core = core_alternation();
    Regex::new(&format!(
        r"(?i)\b(?P<core>{core})(?:\s*(?:to|until|through|thru|-)\s*(?P<end>{core}))?(?:\s+(?:at\s+)?(?P<time>{TIME}))?\b"
    ))
    .unwrap()
});

/// One candidate date phrase found in a line.
#[derive(Debug, Clone)]
pub(super) struct DateMatch {
    pub span: Span,
    pub core: String,
    pub end: Option<String>,
    pub time: Option<String>,
}

/// All candidate phrases in `text`, left to right, non-overlapping.
pub(super) fn scan(text: &str) -> Vec<DateMatch> {
    PHRASE
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).map(|m| Span { start: m.start(), end: m.end() });
            DateMatch {
                // The whole-match group always exists.
                span: whole.unwrap_or(Span { start: 0, end: 0 }),
                core: caps["core"].to_string(),
                end: caps.name("end").map(|m| m.as_str().to_string()),
                time: caps.name("time").map(|m| m.as_str().to_string()),
            }
        })
        .collect()
}

/// True when `core` is nothing but a weekday name.
pub(super) fn is_bare_weekday(core: &str) -> bool {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(&format!(r"(?i)^(?:{WEEKDAYS})$")).unwrap());
    RE.is_match(core.trim())
}

/// True when `core` names a month and day but no year.
pub(super) fn is_yearless_month_day(core: &str) -> bool {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(
            r"(?i)^(?:(?:{MONTHS})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?|\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS}))$"
        ))
        .unwrap()
    });
    RE.is_match(core.trim())
}

/// Parse a clock phrase to `(hour, minute)` on the 24h clock.
pub(super) fn parse_clock(raw: &str) -> Option<(u32, u32)> {
    let s = raw.trim().to_lowercase();
    match s.as_str() {
        "noon" => return Some((12, 0)),
        "midnight" => return Some((0, 0)),
        _ => {}
    }

    let (body, meridiem) = if let Some(b) = s.strip_suffix("pm") {
        (b.trim_end(), Some('p'))
    } else if let Some(b) = s.strip_suffix("am") {
        (b.trim_end(), Some('a'))
    } else {
        (s.as_str(), None)
    };

    let (hour, minute) = match body.split_once(':') {
        Some((h, m)) => (h.trim().parse::<u32>().ok()?, m.trim().parse::<u32>().ok()?),
        None => (body.trim().parse::<u32>().ok()?, 0),
    };
    if minute > 59 {
        return None;
    }
    let hour = match meridiem {
        Some('p') if hour < 12 => hour + 12,
        Some('a') if hour == 12 => 0,
        _ => hour,
    };
    (hour <= 23).then_some((hour, minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_core_range_and_time() {
        let found = scan("offsite june 1 to june 3 at 9am, recap friday");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].core, "june 1");
        assert_eq!(found[0].end.as_deref(), Some("june 3"));
        assert_eq!(found[0].time.as_deref(), Some("9am"));
        assert_eq!(found[1].core, "friday");
        assert_eq!(found[1].end, None);
    }

    #[test]
    fn plain_text_has_no_phrases() {
        assert!(scan("water the plants").is_empty());
        // "in" inside a word is not an offset phrase.
        assert!(scan("within reason").is_empty());
    }

    #[test]
    fn clock_parsing() {
        assert_eq!(parse_clock("3pm"), Some((15, 0)));
        assert_eq!(parse_clock("3:30 pm"), Some((15, 30)));
        assert_eq!(parse_clock("12am"), Some((0, 0)));
        assert_eq!(parse_clock("12 pm"), Some((12, 0)));
        assert_eq!(parse_clock("15:00"), Some((15, 0)));
        assert_eq!(parse_clock("noon"), Some((12, 0)));
        assert_eq!(parse_clock("midnight"), Some((0, 0)));
        assert_eq!(parse_clock("25:00"), None);
        assert_eq!(parse_clock("9:75"), None);
    }

    #[test]
    fn bare_weekday_and_yearless_checks() {
        assert!(is_bare_weekday("friday"));
        assert!(is_bare_weekday("Thurs"));
        assert!(!is_bare_weekday("next friday"));
        assert!(is_yearless_month_day("jan 15"));
        assert!(is_yearless_month_day("15 jan"));
        assert!(!is_yearless_month_day("jan 15, 2026"));
    }
}
