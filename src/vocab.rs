//! Locale vocabulary.
//!
//! One `Vocabulary` holds every word list the extractors are built from:
//! recurrence phrase classes ("every", "other", frequency words, weekday and
//! ordinal names, period words), due-date trigger phrases, and the fallback
//! status synonyms. The engine is configured for exactly one locale at a time;
//! the word lists are compiled into regexes once at parser construction and
//! never change afterwards.

use serde::{Deserialize, Serialize};

/// Recurrence frequency, in rule-string terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Freq {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Freq {
    pub(crate) fn as_rule(self) -> &'static str {
        match self {
            Freq::Daily => "DAILY",
            Freq::Weekly => "WEEKLY",
            Freq::Monthly => "MONTHLY",
            Freq::Yearly => "YEARLY",
        }
    }
}

/// A weekday word and the two-letter code it resolves to (`MO`..`SU`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekdayWord {
    pub word: String,
    pub code: String,
}

/// An ordinal word and its set position (`last` is `-1`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdinalWord {
    pub word: String,
    pub position: i32,
}

/// A period word ("week", "months", ...) and the frequency it selects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodWord {
    pub word: String,
    pub freq: Freq,
}

/// Word lists for one locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// "every" synonyms.
    pub every_words: Vec<String>,
    /// "other" synonyms (as in "every other week").
    pub other_words: Vec<String>,
    pub daily_words: Vec<String>,
    pub weekly_words: Vec<String>,
    pub monthly_words: Vec<String>,
    pub yearly_words: Vec<String>,
    pub weekdays: Vec<WeekdayWord>,
    pub ordinals: Vec<OrdinalWord>,
    pub periods: Vec<PeriodWord>,
    /// The literal group word for Mon-Fri ("weekday").
    pub weekday_group_words: Vec<String>,
    /// The literal group word for Sat-Sun ("weekend").
    pub weekend_group_words: Vec<String>,
    /// Phrases that mark the text after them as a due date ("due", "by", ...).
    pub due_triggers: Vec<String>,
    /// Short connective words tolerated between a due trigger and the date.
    pub connectives: Vec<String>,
    /// Fallback "open" status synonyms (used when no statuses are configured).
    pub open_words: Vec<String>,
    /// Fallback "done" status synonyms.
    pub done_words: Vec<String>,
}

/// The fixed Monday-first weekday cycle used when expanding ranges.
pub(crate) const WEEKDAY_CYCLE: [&str; 7] = ["MO", "TU", "WE", "TH", "FR", "SA", "SU"];

impl Vocabulary {
    /// The stock English vocabulary.
    pub fn english() -> Self {
        let wd = |word: &str, code: &str| WeekdayWord { word: word.into(), code: code.into() };
        let ord = |word: &str, position: i32| OrdinalWord { word: word.into(), position };
        let per = |word: &str, freq: Freq| PeriodWord { word: word.into(), freq };

        Vocabulary {
            every_words: vec!["every".into(), "each".into()],
            other_words: vec!["other".into()],
            daily_words: vec!["daily".into()],
            weekly_words: vec!["weekly".into()],
            monthly_words: vec!["monthly".into()],
            yearly_words: vec!["yearly".into(), "annually".into()],
            weekdays: vec![
                wd("monday", "MO"),
                wd("mon", "MO"),
                wd("tuesday", "TU"),
                wd("tues", "TU"),
                wd("tue", "TU"),
                wd("wednesday", "WE"),
                wd("wed", "WE"),
                wd("thursday", "TH"),
                wd("thurs", "TH"),
                wd("thur", "TH"),
                wd("thu", "TH"),
                wd("friday", "FR"),
                wd("fri", "FR"),
                wd("saturday", "SA"),
                wd("sat", "SA"),
                wd("sunday", "SU"),
                wd("sun", "SU"),
            ],
            ordinals: vec![
                ord("first", 1),
                ord("1st", 1),
                ord("second", 2),
                ord("2nd", 2),
                ord("third", 3),
                ord("3rd", 3),
                ord("fourth", 4),
                ord("4th", 4),
                ord("last", -1),
            ],
            periods: vec![
                per("day", Freq::Daily),
                per("days", Freq::Daily),
                per("week", Freq::Weekly),
                per("weeks", Freq::Weekly),
                per("month", Freq::Monthly),
                per("months", Freq::Monthly),
                per("year", Freq::Yearly),
                per("years", Freq::Yearly),
            ],
            weekday_group_words: vec!["weekday".into()],
            weekend_group_words: vec!["weekend".into()],
            due_triggers: vec![
                "due".into(),
                "scheduled for".into(),
                "deadline".into(),
                "by".into(),
                "on".into(),
            ],
            connectives: vec!["on".into(), "at".into(), "the".into()],
            open_words: vec!["todo".into(), "to do".into(), "open".into(), "not started".into()],
            done_words: vec![
                "done".into(),
                "completed".into(),
                "complete".into(),
                "finished".into(),
            ],
        }
    }

    // --- Alternation builders ------------------------------------------------

    pub(crate) fn every_alt(&self) -> String {
        alternation(&self.every_words)
    }

    pub(crate) fn other_alt(&self) -> String {
        alternation(&self.other_words)
    }

    pub(crate) fn weekly_alt(&self) -> String {
        alternation(&self.weekly_words)
    }

    pub(crate) fn monthly_alt(&self) -> String {
        alternation(&self.monthly_words)
    }

    /// All bare frequency words (daily/weekly/monthly/yearly synonyms).
    pub(crate) fn freq_word_alt(&self) -> String {
        let mut words = Vec::new();
        words.extend_from_slice(&self.daily_words);
        words.extend_from_slice(&self.weekly_words);
        words.extend_from_slice(&self.monthly_words);
        words.extend_from_slice(&self.yearly_words);
        alternation(&words)
    }

    pub(crate) fn weekday_alt(&self) -> String {
        alternation_of(self.weekdays.iter().map(|w| w.word.as_str()))
    }

    pub(crate) fn ordinal_alt(&self) -> String {
        alternation_of(self.ordinals.iter().map(|o| o.word.as_str()))
    }

    pub(crate) fn period_alt(&self) -> String {
        alternation_of(self.periods.iter().map(|p| p.word.as_str()))
    }

    pub(crate) fn weekday_group_alt(&self) -> String {
        alternation(&self.weekday_group_words)
    }

    pub(crate) fn weekend_group_alt(&self) -> String {
        alternation(&self.weekend_group_words)
    }

    // --- Word resolution -----------------------------------------------------

    /// Resolve a weekday word (optionally pluralized) to its two-letter code.
    pub(crate) fn weekday_code(&self, word: &str) -> Option<&str> {
        let lower = word.trim().to_lowercase();
        let hit = self.weekdays.iter().find(|w| w.word == lower);
        let hit = hit.or_else(|| {
            lower
                .strip_suffix('s')
                .and_then(|singular| self.weekdays.iter().find(|w| w.word == singular))
        });
        hit.map(|w| w.code.as_str())
    }

    /// Resolve an ordinal word to its set position.
    pub(crate) fn ordinal_value(&self, word: &str) -> Option<i32> {
        let lower = word.trim().to_lowercase();
        self.ordinals.iter().find(|o| o.word == lower).map(|o| o.position)
    }

    /// Resolve a period word to its frequency.
    pub(crate) fn period_freq(&self, word: &str) -> Option<Freq> {
        let lower = word.trim().to_lowercase();
        self.periods.iter().find(|p| p.word == lower).map(|p| p.freq)
    }

    /// True when `word` is one of the literal Mon-Fri group words.
    pub(crate) fn is_weekday_group(&self, word: &str) -> bool {
        let lower = singular(word);
        self.weekday_group_words.iter().any(|w| *w == lower)
    }

    /// True when `word` is one of the literal Sat-Sun group words.
    pub(crate) fn is_weekend_group(&self, word: &str) -> bool {
        let lower = singular(word);
        self.weekend_group_words.iter().any(|w| *w == lower)
    }

    pub(crate) fn is_freq_word(&self, word: &str) -> bool {
        let lower = word.trim().to_lowercase();
        self.daily_words.contains(&lower)
            || self.weekly_words.contains(&lower)
            || self.monthly_words.contains(&lower)
            || self.yearly_words.contains(&lower)
    }

    /// Map a bare frequency word to its frequency.
    pub(crate) fn freq_of_word(&self, word: &str) -> Option<Freq> {
        let lower = word.trim().to_lowercase();
        if self.daily_words.contains(&lower) {
            Some(Freq::Daily)
        } else if self.weekly_words.contains(&lower) {
            Some(Freq::Weekly)
        } else if self.monthly_words.contains(&lower) {
            Some(Freq::Monthly)
        } else if self.yearly_words.contains(&lower) {
            Some(Freq::Yearly)
        } else {
            None
        }
    }
}

fn singular(word: &str) -> String {
    let lower = word.trim().to_lowercase();
    lower.strip_suffix('s').map(str::to_string).unwrap_or(lower)
}

/// Build a regex alternation from `words`, escaped and ordered longest-first so
/// that no word can shadow a longer one it prefixes.
pub(crate) fn alternation(words: &[String]) -> String {
    alternation_of(words.iter().map(String::as_str))
}

pub(crate) fn alternation_of<'a>(words: impl Iterator<Item = &'a str>) -> String {
    let mut escaped: Vec<String> = words.map(regex::escape).collect();
    escaped.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    escaped.join("|")
}
