//! Extraction pipeline engine.
//!
//! Parsing one input line is a fixed-order pipeline:
//!
//! ```text
//! input ── split title line / details ─┐
//!                                      v
//!                         pipeline::run   (pipeline.rs)
//!                           tags → status → recurrence
//!                                → user fields → date/time
//!                           - each stage sees only the residue
//!                             of the previous one
//!                           - a failing stage is logged and
//!                             skipped, never fatal
//!                                      │
//!                                      v
//!                       validate::finalize (validate.rs)
//!                           - title placeholder, tag dedup,
//!                             strict date/time formats
//! ```
//!
//! Supporting pieces:
//!
//! - `trigger.rs`: scans the raw line for coarse buckets (`BucketMask`) so
//!   the recurrence compiler can skip whole pattern classes cheaply.
//! - `boundary.rs`: the manual boundary-checked substring search used where
//!   regex word boundaries would mishandle punctuation-bearing labels.
//!
//! The engine owns no state: stages are compiled once at parser construction
//! and are immutable afterwards, so concurrent `parse()` calls are safe.

#[path = "engine/boundary.rs"]
mod boundary;
#[path = "engine/pipeline.rs"]
mod pipeline;
#[path = "engine/trigger.rs"]
mod trigger;
#[path = "engine/validate.rs"]
mod validate;

pub(crate) use boundary::{contains_bounded, find_bounded, find_bounded_from};
pub(crate) use pipeline::{Stage, StageError, run};
pub(crate) use trigger::{BucketMask, TriggerScan};
pub(crate) use validate::finalize;
