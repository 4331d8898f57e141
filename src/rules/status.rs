//! Status detection.
//!
//! With a configured status vocabulary, candidates are tried longest-label
//! first so a short label can never match inside a longer one, each through
//! the boundary-checked substring search (labels may contain punctuation that
//! regex `\b` would mishandle). Without configured statuses, two regex
//! alternations built from the locale's open/done synonyms take over.

use regex::Regex;

use crate::api::{Context, ParsedTaskData};
use crate::config::{PROPERTY_STATUS, ParserConfig, StatusConfig};
use crate::engine::{Stage, StageError, find_bounded};
use crate::vocab::{Vocabulary, alternation};
use crate::{Span, excise};

pub(crate) struct StatusStage {
    /// Configured candidates, sorted by descending label length.
    candidates: Vec<StatusConfig>,
    trigger: Option<String>,
    fallback: Option<Fallback>,
}

struct Fallback {
    done: Regex,
    open: Regex,
}

impl StatusStage {
    pub(crate) fn new(config: &ParserConfig, vocab: &Vocabulary) -> Self {
        let mut candidates = config.statuses.clone();
        candidates.sort_by(|a, b| b.label.len().cmp(&a.label.len()));

        let fallback = candidates.is_empty().then(|| Fallback {
            done: word_regex(&vocab.done_words),
            open: word_regex(&vocab.open_words),
        });

        StatusStage {
            candidates,
            trigger: config.trigger_for(PROPERTY_STATUS).map(str::to_string),
            fallback,
        }
    }

    fn find_candidate(&self, text: &str) -> Option<(&StatusConfig, Span)> {
        for candidate in &self.candidates {
            let mut needles: Vec<String> = Vec::new();
            if let Some(trigger) = &self.trigger {
                needles.push(format!("{trigger}{}", candidate.label));
                needles.push(format!("{trigger}{}", candidate.value));
            }
            needles.push(candidate.label.clone());
            needles.push(candidate.value.clone());

            for needle in needles {
                if let Some(span) = find_bounded(text, &needle) {
                    return Some((candidate, span));
                }
            }
        }
        None
    }
}

impl Stage for StatusStage {
    fn name(&self) -> &'static str {
        "status"
    }

    fn extract(
        &self,
        text: &str,
        draft: &mut ParsedTaskData,
        _ctx: &Context,
    ) -> Result<String, StageError> {
        if !self.candidates.is_empty() {
            if let Some((candidate, span)) = self.find_candidate(text) {
                draft.status = Some(candidate.value.clone());
                return Ok(excise(text, span));
            }
            return Ok(text.to_string());
        }

        if let Some(fallback) = &self.fallback {
            // Done wins over open: "finished" beats a stray "todo".
            if let Some(m) = fallback.done.find(text) {
                draft.status = Some("done".to_string());
                return Ok(excise(text, Span { start: m.start(), end: m.end() }));
            }
            if let Some(m) = fallback.open.find(text) {
                draft.status = Some("todo".to_string());
                return Ok(excise(text, Span { start: m.start(), end: m.end() }));
            }
        }
        Ok(text.to_string())
    }
}

fn word_regex(words: &[String]) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation(words))).unwrap()
}
