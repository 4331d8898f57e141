//! Trigger scanning (input pre-classification).
//!
//! Before the recurrence compiler walks its pattern table, the raw line is
//! scanned once for coarse vocabulary signals. Each pattern class declares the
//! buckets it needs; a class whose buckets are not all present is skipped
//! without ever running its regex.
//!
//! This is a heuristic scan: false positives are acceptable because the
//! pattern regexes still have to match in full. False negatives are not —
//! when in doubt, set the bucket.

use crate::vocab::Vocabulary;

bitflags::bitflags! {
    /// Coarse buckets for fast input classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        const HAS_DIGITS = 1 << 0;
        /// An "every"/"each" synonym is present.
        const EVERYISH   = 1 << 1;
        /// A weekday name (any form, plural included) is present.
        const WEEKDAYISH = 1 << 2;
        /// An ordinal word or digit ordinal is present.
        const ORDINALISH = 1 << 3;
        /// A bare frequency word (daily/weekly/...) is present.
        const FREQWORDISH = 1 << 4;
        /// A literal "weekday(s)"/"weekend(s)" group word is present.
        const GROUPISH   = 1 << 5;
    }
}

/// Result of one pre-classification scan.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TriggerScan {
    pub buckets: BucketMask,
}

impl TriggerScan {
    /// Scan `input` for the coarse buckets declared in `vocab`.
    pub(crate) fn scan(input: &str, vocab: &Vocabulary) -> Self {
        let mut buckets = BucketMask::empty();

        if input.bytes().any(|b| b.is_ascii_digit()) {
            buckets |= BucketMask::HAS_DIGITS;
        }

        // Split on every non-alphanumeric character so that hyphenated forms
        // ("mon-fri") still surface their words.
        for raw in input.split(|c: char| !c.is_alphanumeric()) {
            if raw.is_empty() {
                continue;
            }
            let word = raw.to_lowercase();

            if vocab.every_words.contains(&word) {
                buckets |= BucketMask::EVERYISH;
            }
            if vocab.weekday_code(&word).is_some() {
                buckets |= BucketMask::WEEKDAYISH;
            }
            if vocab.ordinal_value(&word).is_some() {
                buckets |= BucketMask::ORDINALISH;
            }
            if vocab.is_freq_word(&word) {
                buckets |= BucketMask::FREQWORDISH;
            }
            if vocab.is_weekday_group(&word) || vocab.is_weekend_group(&word) {
                buckets |= BucketMask::GROUPISH;
            }
        }

        TriggerScan { buckets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_detects_recurrence_buckets() {
        let vocab = Vocabulary::english();
        let scan = TriggerScan::scan("every second Tuesday", &vocab);
        assert!(scan.buckets.contains(BucketMask::EVERYISH));
        assert!(scan.buckets.contains(BucketMask::ORDINALISH));
        assert!(scan.buckets.contains(BucketMask::WEEKDAYISH));
        assert!(!scan.buckets.contains(BucketMask::GROUPISH));
    }

    #[test]
    fn scan_strips_punctuation_and_case() {
        let vocab = Vocabulary::english();
        let scan = TriggerScan::scan("standup (Weekly), mondays!", &vocab);
        assert!(scan.buckets.contains(BucketMask::FREQWORDISH));
        assert!(scan.buckets.contains(BucketMask::WEEKDAYISH));

        let scan = TriggerScan::scan("gym mon-fri", &vocab);
        assert!(scan.buckets.contains(BucketMask::WEEKDAYISH));
    }

    #[test]
    fn plain_text_sets_nothing() {
        let vocab = Vocabulary::english();
        let scan = TriggerScan::scan("call the dentist", &vocab);
        assert!(scan.buckets.is_empty());
    }
}
