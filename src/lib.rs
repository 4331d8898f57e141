extern crate self as taskling;

#[macro_use]
mod macros;
mod api;
mod config;
mod display;
mod engine;
mod rules;
mod vocab;

pub use api::{Context, ParsedTaskData, TaskParser, UserFieldValue, parse};
pub use config::{
    FieldKind, PROPERTY_STATUS, PROPERTY_TAGS, ParserConfig, PropertyTrigger, StatusConfig,
    UserField,
};
pub use display::{DisplayHint, preview_hints, suggest_statuses};
pub use vocab::{Freq, Vocabulary};

// --- Internal types ---------------------------------------------------------

/// Byte range into a line of input consumed by an extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

/// Remove `span` from `text` and return the residue.
///
/// The cut edges are re-joined with a single space so that later stages always
/// see well-formed word boundaries.
pub(crate) fn excise(text: &str, span: Span) -> String {
    let before = text.get(..span.start).unwrap_or("");
    let after = text.get(span.end..).unwrap_or("");
    squeeze(&format!("{before} {after}"))
}

/// Remove every span in `spans` (sorted by start, non-overlapping) from `text`.
pub(crate) fn excise_all(text: &str, spans: &[Span]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        out.push_str(text.get(cursor..span.start).unwrap_or(""));
        out.push(' ');
        cursor = span.end;
    }
    out.push_str(text.get(cursor..).unwrap_or(""));
    squeeze(&out)
}

/// Collapse runs of whitespace to single spaces and trim the edges.
pub(crate) fn squeeze(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
