pub mod forced;
pub mod resolver;

use crate::types::{SourceWord, TimedWord};

/// Minimum span given to a word whose end had to be repaired.
const REPAIRED_SPAN_MS: u64 = 50;

/// Split canonical text into ordered source words.
pub fn source_words(text: &str) -> Vec<SourceWord> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, word)| SourceWord {
            text: word.to_string(),
            index,
        })
        .collect()
}

/// Left-to-right monotonicity repair: starts never decrease, and a span whose
/// end fell behind its start is widened to [`REPAIRED_SPAN_MS`].
pub(crate) fn repair_monotonicity(words: &mut [TimedWord]) {
    for i in 0..words.len() {
        if i > 0 && words[i].start_ms < words[i - 1].start_ms {
            words[i].start_ms = words[i - 1].start_ms;
        }
        if words[i].end_ms < words[i].start_ms {
            words[i].end_ms = words[i].start_ms + REPAIRED_SPAN_MS;
        }
    }
}

/// Seconds-to-milliseconds with provider-style rounding. Negative timestamps
/// clamp to zero.
pub(crate) fn secs_to_ms(seconds: f64) -> u64 {
    (seconds * 1000.0).round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(index: usize, start_ms: u64, end_ms: u64) -> TimedWord {
        TimedWord {
            word: format!("w{index}"),
            index,
            start_ms,
            end_ms,
        }
    }

    #[test]
    fn source_words_indexes_in_order() {
        let words = source_words("The  quick\nbrown fox");
        assert_eq!(words.len(), 4);
        assert_eq!(words[0].text, "The");
        assert_eq!(words[3].index, 3);
    }

    #[test]
    fn source_words_empty_text() {
        assert!(source_words("   ").is_empty());
    }

    #[test]
    fn repair_raises_regressing_start() {
        let mut words = vec![timed(0, 100, 200), timed(1, 50, 300)];
        repair_monotonicity(&mut words);
        assert_eq!(words[1].start_ms, 100);
        assert_eq!(words[1].end_ms, 300);
    }

    #[test]
    fn repair_widens_inverted_span() {
        let mut words = vec![timed(0, 100, 200), timed(1, 50, 80)];
        repair_monotonicity(&mut words);
        assert_eq!(words[1].start_ms, 100);
        assert_eq!(words[1].end_ms, 150);
    }

    #[test]
    fn repair_leaves_monotonic_input_untouched() {
        let mut words = vec![timed(0, 0, 100), timed(1, 100, 250), timed(2, 250, 250)];
        let expected = words.clone();
        repair_monotonicity(&mut words);
        assert_eq!(words, expected);
    }

    #[test]
    fn secs_to_ms_rounds_and_clamps() {
        assert_eq!(secs_to_ms(2.5), 2500);
        assert_eq!(secs_to_ms(0.1), 100);
        assert_eq!(secs_to_ms(0.0), 0);
        assert_eq!(secs_to_ms(-0.5), 0);
    }
}
