//! Extraction rule sets, one submodule per extracted property.

pub(crate) mod date;
pub(crate) mod fields;
pub(crate) mod recurrence;
pub(crate) mod status;
