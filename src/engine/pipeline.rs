//! Pipeline orchestration.
//!
//! The orchestrator splits the input into a title line and a verbatim details
//! blob, threads the title line through the extraction stages in a fixed
//! order, and finalizes the assembled record. Stage order matters: tags and
//! status go first so their trigger tokens cannot be mis-consumed by date
//! heuristics, and recurrence runs before date/time so that phrases like
//! "every monday" are not first swallowed by the date parser.

use std::fmt;

use crate::api::{Context, ParsedTaskData};
use crate::engine::finalize;

/// Error raised by a single extraction stage.
///
/// A stage failure is isolated: the orchestrator logs it and continues with
/// the stage's input residue unchanged, so one misbehaving extractor can never
/// blank the whole result.
#[derive(Debug)]
pub(crate) struct StageError {
    pub reason: String,
}

impl StageError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        StageError { reason: reason.into() }
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// One extraction stage: consume matched spans, record what was found, return
/// the residue for the next stage.
pub(crate) trait Stage {
    fn name(&self) -> &'static str;

    fn extract(
        &self,
        text: &str,
        draft: &mut ParsedTaskData,
        ctx: &Context,
    ) -> Result<String, StageError>;
}

/// Run the full pipeline over `input`. Total: never panics, never errors.
pub(crate) fn run(stages: &[&dyn Stage], input: &str, ctx: &Context) -> ParsedTaskData {
    let (title_line, details) = split_title(input);

    let mut draft = ParsedTaskData { details, ..ParsedTaskData::default() };

    let mut line = title_line.to_string();
    for stage in stages {
        match stage.extract(&line, &mut draft, ctx) {
            Ok(residue) => line = residue,
            Err(err) => {
                log::warn!("stage '{}' failed ({err}); residue left unchanged", stage.name());
            }
        }
    }

    draft.title = line;
    finalize(&mut draft);
    draft
}

/// Split at the first newline: the title line is parseable, everything after
/// it is carried through verbatim (outer whitespace trimmed).
fn split_title(input: &str) -> (&str, Option<String>) {
    match input.split_once('\n') {
        Some((first, rest)) => {
            let rest = rest.trim();
            let details = (!rest.is_empty()).then(|| rest.to_string());
            (first.trim(), details)
        }
        None => (input.trim(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::validate::UNTITLED;

    struct Upper;

    impl Stage for Upper {
        fn name(&self) -> &'static str {
            "upper"
        }
        fn extract(
            &self,
            text: &str,
            _draft: &mut ParsedTaskData,
            _ctx: &Context,
        ) -> Result<String, StageError> {
            Ok(text.to_uppercase())
        }
    }

    struct Failing;

    impl Stage for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn extract(
            &self,
            _text: &str,
            _draft: &mut ParsedTaskData,
            _ctx: &Context,
        ) -> Result<String, StageError> {
            Err(StageError::new("boom"))
        }
    }

    #[test]
    fn details_split_preserves_secondary_lines() {
        let (title, details) = split_title("buy milk\nfull fat\ntwo bottles");
        assert_eq!(title, "buy milk");
        assert_eq!(details.as_deref(), Some("full fat\ntwo bottles"));

        let (title, details) = split_title("buy milk");
        assert_eq!(title, "buy milk");
        assert_eq!(details, None);

        let (_, details) = split_title("buy milk\n   ");
        assert_eq!(details, None);
    }

    #[test]
    fn failing_stage_keeps_residue() {
        let ctx = Context::default();
        let out = run(&[&Failing, &Upper], "hello there", &ctx);
        assert_eq!(out.title, "HELLO THERE");
    }

    #[test]
    fn empty_input_yields_placeholder() {
        let ctx = Context::default();
        let out = run(&[&Upper], "", &ctx);
        assert_eq!(out.title, UNTITLED);
        assert!(out.tags.is_empty());
        assert_eq!(out.details, None);
    }
}
