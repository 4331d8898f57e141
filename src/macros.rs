#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build one entry of the recurrence pattern table.
///
/// Unlike [`regex!`], the pattern source is an expression: recurrence regexes
/// are assembled at construction time from the configured [`Vocabulary`]
/// alternations, so they cannot live in `static`s.
///
/// [`Vocabulary`]: crate::vocab::Vocabulary
#[macro_export]
macro_rules! pattern {
    (
        name: $name:expr,
        regex: $re:expr,
        buckets: $buckets:expr,
        prod: |$caps:ident, $vocab:ident| $body:block
        $(,)?
    ) => {{
        $crate::rules::recurrence::RecurrencePattern {
            name: $name,
            regex: regex::Regex::new(&$re).expect("vocabulary-built recurrence regex"),
            buckets: $buckets,
            handler: Box::new(
                move |$caps: &regex::Captures<'_>,
                      $vocab: &$crate::vocab::Vocabulary|
                      -> Option<String> { $body },
            ),
        }
    }};
}
