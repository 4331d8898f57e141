//! Recurrence phrase compiler.
//!
//! Detects a recurrence phrase in the title line and synthesizes a canonical
//! rule string in the RFC 5545 `RRULE` shape
//! (`FREQ=...;INTERVAL=...;BYDAY=...;BYMONTHDAY=...;BYSETPOS=...`, only the
//! populated components present).
//!
//! The compiler is a priority-ordered table of `(regex, handler)` pairs built
//! once from the locale vocabulary, walked strictly from most to least
//! specific. The first pattern whose regex matches *and* whose handler yields
//! a valid candidate wins; an invalid candidate (missing `FREQ=`, empty
//! `BYDAY=`) is treated as a non-match and the walk continues. This is what
//! keeps overlapping phrase classes deterministic: "every second monday" is a
//! monthly set-position rule, never a bare weekly one.

#[path = "recurrence/helpers.rs"]
mod helpers;
#[path = "recurrence/table.rs"]
mod table;


pub(crate) use table::{RecurrenceCompiler, RecurrencePattern};
