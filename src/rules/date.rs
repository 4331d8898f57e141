//! Due date/time resolution.
//!
//! Finds at most one due date (and optionally a clock time) in the residual
//! text and strips the matched span. Two phases:
//!
//! 1. *Triggered*: each configured due trigger ("due", "by", ...) is searched
//!    with the boundary-checked scan; the text right after the trigger must
//!    start with a date phrase (short connectives tolerated). Every distinct
//!    trigger occurrence is processed; later hits overwrite earlier ones.
//! 2. *Implicit*: only when no triggered hit was found, the whole residue is
//!    scanned for the first resolvable date phrase. Whether the date is
//!    assigned then depends on the `default_to_due` flag; the span is removed
//!    either way.
//!
//! Phrase detection is a single compiled regex (`scan.rs`); resolution goes
//! through plain `chrono` arithmetic for the deterministic shapes and falls
//! back to `chrono-english` for the free-form ones (`resolve.rs`).

#[path = "date/scan.rs"]
mod scan;
#[path = "date/resolve.rs"]
mod resolve;

#[cfg(test)]
#[path = "date/tests.rs"]
mod tests;

pub(crate) use resolve::DateStage;
