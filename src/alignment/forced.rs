//! Forced alignment of a source word sequence against an independently
//! recognized word sequence.
//!
//! The two sequences come from different providers and rarely agree on word
//! count: recognizers insert spurious tokens, drop quiet ones, and merge
//! neighbors ("ice cream" heard as "icecream"). A single forward pass walks
//! the source words with a cursor into the recognized list, evaluating an
//! ordered set of guards per word; the cursor never retreats.

use crate::matching;
use crate::types::{RecognizedWord, SourceWord, TimedWord};

/// Recognizers insert noise locally; scanning further than a few positions
/// risks locking onto a later repetition of a common word.
const LOOKAHEAD_LIMIT: usize = 4;

/// Assumed narration pace when nothing has been emitted yet.
const DEFAULT_WORD_MS: u64 = 300;

/// Align `source_words` against `recognized`, producing exactly one
/// [`TimedWord`] per source word, in order.
///
/// Total over its input domain: an empty or exhausted recognized list
/// degrades to interpolated spans, never to an error or a short result.
pub fn align(source_words: &[SourceWord], recognized: &[RecognizedWord]) -> Vec<TimedWord> {
    let source_norm: Vec<String> = source_words
        .iter()
        .map(|w| matching::normalize(&w.text))
        .collect();
    let recognized_norm: Vec<String> = recognized
        .iter()
        .map(|w| matching::normalize(&w.text))
        .collect();

    let mut out: Vec<TimedWord> = Vec::with_capacity(source_words.len());
    let mut cursor = 0usize;
    let mut i = 0usize;

    while i < source_words.len() {
        let word = &source_words[i];
        let current = &source_norm[i];
        let prev_end = out.last().map(|w| w.end_ms).unwrap_or(0);

        // Pure punctuation normalizes to nothing spoken: pin a zero-width
        // span to the previous boundary and keep the cursor where it is.
        if current.is_empty() {
            trace_rule(word, i, cursor, "empty-token");
            out.push(timed(word, prev_end, prev_end));
            i += 1;
            continue;
        }

        // Recognized list exhausted: continue at the average pace seen so far.
        if cursor >= recognized.len() {
            let avg_ms = if out.is_empty() {
                DEFAULT_WORD_MS
            } else {
                prev_end / out.len() as u64
            };
            trace_rule(word, i, cursor, "exhausted");
            out.push(timed(word, prev_end, prev_end + avg_ms));
            i += 1;
            continue;
        }

        // Direct match at the cursor.
        if matching::matches(current, &recognized_norm[cursor]) {
            trace_rule(word, i, cursor, "direct");
            let r = &recognized[cursor];
            out.push(timed(word, r.start_ms, r.end_ms));
            cursor += 1;
            i += 1;
            continue;
        }

        // The recognizer inserted spurious tokens: look a bounded number of
        // positions ahead and jump past them on the first match.
        if let Some(position) = lookahead(current, &recognized_norm, cursor) {
            trace_rule(word, i, position, "lookahead");
            let r = &recognized[position];
            out.push(timed(word, r.start_ms, r.end_ms));
            cursor = position + 1;
            i += 1;
            continue;
        }

        // The recognizer dropped this word: the token at the cursor already
        // belongs to the NEXT source word. Interpolate up to its start
        // without consuming it.
        if i + 1 < source_words.len()
            && matching::matches(&source_norm[i + 1], &recognized_norm[cursor])
        {
            trace_rule(word, i, cursor, "dropped");
            let boundary = recognized[cursor].start_ms.max(prev_end);
            out.push(timed(word, prev_end, boundary));
            i += 1;
            continue;
        }

        // Two source words collapsed into one recognized token: split its
        // span at the midpoint. Fusions of three or more words are not
        // detected and fall through to plain interpolation below.
        if i + 1 < source_words.len() {
            let merged = format!("{current}{}", source_norm[i + 1]);
            if matching::matches(&merged, &recognized_norm[cursor]) {
                trace_rule(word, i, cursor, "merge");
                let r = &recognized[cursor];
                let midpoint = (r.start_ms + r.end_ms) / 2;
                out.push(timed(word, r.start_ms, midpoint));
                out.push(timed(&source_words[i + 1], midpoint, r.end_ms));
                cursor += 1;
                i += 2;
                continue;
            }
        }

        // No match anywhere: interpolate and retry the cursor token against
        // the next source word.
        trace_rule(word, i, cursor, "no-match");
        let boundary = recognized[cursor].start_ms.max(prev_end);
        out.push(timed(word, prev_end, boundary));
        i += 1;
    }

    super::repair_monotonicity(&mut out);
    out
}

fn lookahead(current: &str, recognized_norm: &[String], cursor: usize) -> Option<usize> {
    (cursor + 1..=cursor + LOOKAHEAD_LIMIT)
        .take_while(|&position| position < recognized_norm.len())
        .find(|&position| matching::matches(current, &recognized_norm[position]))
}

fn timed(word: &SourceWord, start_ms: u64, end_ms: u64) -> TimedWord {
    TimedWord {
        word: word.text.clone(),
        index: word.index,
        start_ms,
        end_ms,
    }
}

fn trace_rule(word: &SourceWord, source_index: usize, cursor: usize, kind: &'static str) {
    tracing::debug!(
        word = word.text.as_str(),
        source_index,
        cursor,
        kind,
        "forced alignment: rule applied"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::source_words;

    fn recognized(words: &[(&str, u64, u64)]) -> Vec<RecognizedWord> {
        words
            .iter()
            .map(|(text, start_ms, end_ms)| RecognizedWord {
                text: text.to_string(),
                start_ms: *start_ms,
                end_ms: *end_ms,
                confidence: None,
            })
            .collect()
    }

    fn spans(out: &[TimedWord]) -> Vec<(u64, u64)> {
        out.iter().map(|w| (w.start_ms, w.end_ms)).collect()
    }

    fn assert_structurally_valid(out: &[TimedWord], source_len: usize) {
        assert_eq!(out.len(), source_len);
        for (i, w) in out.iter().enumerate() {
            assert_eq!(w.index, i);
            assert!(w.end_ms >= w.start_ms, "inverted span at {i}: {w:?}");
            if i > 0 {
                assert!(
                    w.start_ms >= out[i - 1].start_ms,
                    "start regressed at {i}: {:?} -> {w:?}",
                    out[i - 1]
                );
            }
        }
    }

    #[test]
    fn identical_sequences_align_index_for_index() {
        let source = source_words("the quick brown fox");
        let rec = recognized(&[
            ("the", 0, 200),
            ("quick", 200, 500),
            ("brown", 500, 800),
            ("fox", 800, 1100),
        ]);
        let out = align(&source, &rec);
        assert_structurally_valid(&out, 4);
        assert_eq!(spans(&out), vec![(0, 200), (200, 500), (500, 800), (800, 1100)]);
    }

    #[test]
    fn output_length_always_matches_source() {
        let source = source_words("one two three four five");
        for rec in [
            recognized(&[]),
            recognized(&[("one", 0, 100)]),
            recognized(&[("zzz", 0, 100), ("qqq", 100, 200)]),
        ] {
            let out = align(&source, &rec);
            assert_structurally_valid(&out, 5);
        }
    }

    #[test]
    fn empty_source_yields_empty_output() {
        assert!(align(&[], &recognized(&[("hi", 0, 100)])).is_empty());
    }

    #[test]
    fn empty_recognized_interpolates_at_default_pace() {
        let source = source_words("a b c");
        let out = align(&source, &recognized(&[]));
        assert_eq!(spans(&out), vec![(0, 300), (300, 600), (600, 900)]);
    }

    #[test]
    fn exhaustion_continues_at_average_pace() {
        let source = source_words("the cat sat");
        let rec = recognized(&[("the", 0, 200), ("cat", 200, 400)]);
        let out = align(&source, &rec);
        assert_structurally_valid(&out, 3);
        // average so far: 400 / 2 emitted
        assert_eq!(spans(&out)[2], (400, 600));
    }

    #[test]
    fn punctuation_token_gets_zero_width_span() {
        let source = source_words("Stop ! now");
        let rec = recognized(&[("stop", 0, 300), ("now", 300, 600)]);
        let out = align(&source, &rec);
        assert_structurally_valid(&out, 3);
        assert_eq!(spans(&out)[1], (300, 300));
        assert_eq!(spans(&out)[2], (300, 600));
    }

    #[test]
    fn leading_punctuation_pins_to_zero() {
        let source = source_words("... hello");
        let rec = recognized(&[("hello", 100, 400)]);
        let out = align(&source, &rec);
        assert_eq!(spans(&out)[0], (0, 0));
        assert_eq!(spans(&out)[1], (100, 400));
    }

    #[test]
    fn spurious_insertions_are_skipped_by_lookahead() {
        let source = source_words("red hen");
        let rec = recognized(&[
            ("red", 0, 200),
            ("um", 200, 300),
            ("uh", 300, 400),
            ("hen", 400, 700),
        ]);
        let out = align(&source, &rec);
        assert_structurally_valid(&out, 2);
        assert_eq!(spans(&out), vec![(0, 200), (400, 700)]);
    }

    #[test]
    fn lookahead_is_bounded() {
        // Five insertions put the real token beyond the lookahead window.
        let source = source_words("hen");
        let rec = recognized(&[
            ("a", 0, 100),
            ("b", 100, 200),
            ("c", 200, 300),
            ("d", 300, 400),
            ("e", 400, 500),
            ("hen", 500, 800),
        ]);
        let out = align(&source, &rec);
        assert_structurally_valid(&out, 1);
        // no-match interpolation, not the distant span
        assert_eq!(spans(&out), vec![(0, 0)]);
    }

    #[test]
    fn dropped_word_interpolates_to_next_match() {
        let source = source_words("the tiny cat");
        // recognizer never heard "tiny"
        let rec = recognized(&[("the", 0, 200), ("cat", 500, 800)]);
        let out = align(&source, &rec);
        assert_structurally_valid(&out, 3);
        assert_eq!(spans(&out), vec![(0, 200), (200, 500), (500, 800)]);
    }

    #[test]
    fn merged_words_split_recognized_span_at_midpoint() {
        let source = source_words("ice cream please");
        let rec = recognized(&[("icecream", 0, 400), ("please", 400, 700)]);
        let out = align(&source, &rec);
        assert_structurally_valid(&out, 3);
        assert_eq!(spans(&out), vec![(0, 200), (200, 400), (400, 700)]);
    }

    #[test]
    fn triple_fusion_is_only_partially_recovered() {
        let source = source_words("up and away now");
        let rec = recognized(&[("upandaway", 0, 600), ("now", 600, 900)]);
        let out = align(&source, &rec);
        assert_structurally_valid(&out, 4);
        // Only two-word concatenations are tried: "up" interpolates to a
        // zero-width span, then "and"+"away" claim the fused token.
        assert_eq!(
            spans(&out),
            vec![(0, 0), (0, 300), (300, 600), (600, 900)]
        );
    }

    #[test]
    fn unmatched_word_does_not_consume_cursor() {
        let source = source_words("xylophone the");
        let rec = recognized(&[("the", 300, 500)]);
        let out = align(&source, &rec);
        assert_structurally_valid(&out, 2);
        // "xylophone" interpolates up to the cursor token's start, then
        // "the" still finds it.
        assert_eq!(spans(&out), vec![(0, 300), (300, 500)]);
    }

    #[test]
    fn fuzzy_match_tolerates_recognition_noise() {
        let source = source_words("quick");
        let rec = recognized(&[("qick", 0, 300)]);
        let out = align(&source, &rec);
        assert_eq!(spans(&out), vec![(0, 300)]);
    }

    #[test]
    fn non_monotonic_recognizer_timestamps_are_repaired() {
        let source = source_words("one two");
        let rec = recognized(&[("one", 400, 600), ("two", 100, 200)]);
        let out = align(&source, &rec);
        assert_structurally_valid(&out, 2);
    }
}
