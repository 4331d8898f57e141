//! Boundary-checked substring search.
//!
//! Status labels and trigger phrases may contain punctuation ("in progress!",
//! "w/e"), which regex `\b` treats as a word edge and would happily match
//! mid-token. The searches here instead require whitespace or a string edge on
//! both flanks, checked manually, and compare case-insensitively without
//! assuming ASCII.

use crate::Span;

/// Find the first occurrence of `needle` in `haystack` that is flanked by
/// whitespace or string edges on both sides. Case-insensitive.
pub(crate) fn find_bounded(haystack: &str, needle: &str) -> Option<Span> {
    find_bounded_from(haystack, needle, 0)
}

/// [`find_bounded`], starting the search at byte offset `from`.
///
/// `from` must lie on a char boundary; offsets past the end return `None`.
pub(crate) fn find_bounded_from(haystack: &str, needle: &str, from: usize) -> Option<Span> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }

    let tail = haystack.get(from..)?;
    let mut prev_is_boundary = from == 0 || haystack[..from].ends_with(char::is_whitespace);

    for (idx, ch) in tail.char_indices() {
        let start = from + idx;
        if prev_is_boundary
            && let Some(end) = match_ci_at(haystack, start, needle)
            && haystack[end..].chars().next().is_none_or(char::is_whitespace)
        {
            return Some(Span { start, end });
        }
        prev_is_boundary = ch.is_whitespace();
    }
    None
}

/// True when `haystack` contains a boundary-flanked occurrence of `needle`.
pub(crate) fn contains_bounded(haystack: &str, needle: &str) -> bool {
    find_bounded(haystack, needle).is_some()
}

/// Case-insensitively match `needle` against `haystack` starting at byte
/// `start`; returns the end byte offset of the match.
fn match_ci_at(haystack: &str, start: usize, needle: &str) -> Option<usize> {
    let mut pos = start;
    for nc in needle.chars() {
        let hc = haystack[pos..].chars().next()?;
        if !char_eq_ci(hc, nc) {
            return None;
        }
        pos += hc.len_utf8();
    }
    Some(pos)
}

fn char_eq_ci(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_at_word_edges() {
        assert_eq!(find_bounded("pay dues by friday", "due"), None);
        assert_eq!(find_bounded("overdue report", "due"), None);
        let span = find_bounded("report due friday", "due").unwrap();
        assert_eq!(span, Span { start: 7, end: 10 });
    }

    #[test]
    fn case_insensitive_and_multiword() {
        assert!(contains_bounded("Scheduled For tomorrow", "scheduled for"));
        assert!(contains_bounded("mark as DONE", "done"));
        assert!(!contains_bounded("donex", "done"));
    }

    #[test]
    fn handles_string_edges() {
        assert!(contains_bounded("done", "done"));
        assert!(contains_bounded("due now", "due"));
        assert!(contains_bounded("now due", "due"));
    }

    #[test]
    fn punctuation_in_needle_is_literal() {
        // A regex \b would split "w/e" into separate words; the manual check
        // treats it as one token.
        assert!(contains_bounded("ship w/e maybe", "w/e"));
        assert!(!contains_bounded("shipw/e", "w/e"));
    }

    #[test]
    fn search_from_offset() {
        let text = "due x due y";
        let first = find_bounded_from(text, "due", 0).unwrap();
        assert_eq!(first.start, 0);
        let second = find_bounded_from(text, "due", first.end).unwrap();
        assert_eq!(second.start, 6);
    }

    #[test]
    fn non_ascii_case_folding() {
        assert!(contains_bounded("fait Fini hier", "fini"));
        assert!(contains_bounded("tâche FINIE", "finie"));
    }
}
