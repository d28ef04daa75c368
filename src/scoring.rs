//! Reading-accuracy scoring: compare a recognized transcript of a child's
//! speech against the expected text, tolerant of minor misrecognition.

use crate::matching;
use crate::types::{AccuracyResult, WordStatus, WordVerdict};

/// How many unconsumed recognized tokens are searched per expected word.
/// Wider windows start crediting words the child never read.
const SEARCH_WINDOW: usize = 3;

/// Scoring tolerates at most one edited character per word. This is stricter
/// than the general fuzzy matcher on purpose: over-crediting a struggling
/// reader is worse than under-crediting a fluent one.
const MAX_WORD_EDIT_DISTANCE: usize = 1;

/// Lowercase, strip everything but letters, digits and apostrophes, split on
/// whitespace and drop empties.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// The first `limit` expected-text tokens, suitable as recognition context
/// phrases to bias the recognizer toward the passage vocabulary.
pub fn context_phrases(expected_text: &str, limit: usize) -> Vec<String> {
    let mut phrases = tokenize(expected_text);
    phrases.truncate(limit);
    phrases
}

/// Score `recognized_transcript` against `expected_text`.
///
/// Walks the expected tokens in order with a forward cursor into the
/// recognized tokens; each expected token is searched for within the next
/// [`SEARCH_WINDOW`] unconsumed recognized tokens. The cursor never
/// retreats, so out-of-order repetitions are not re-credited.
pub fn score(expected_text: &str, recognized_transcript: &str) -> AccuracyResult {
    let expected = tokenize(expected_text);
    let recognized = tokenize(recognized_transcript);

    if expected.is_empty() {
        return AccuracyResult {
            score: 100,
            word_results: Vec::new(),
            words_read: 0,
            total_words: 0,
        };
    }

    let mut cursor = 0usize;
    let mut correct = 0usize;
    let mut word_results = Vec::with_capacity(expected.len());

    for word in &expected {
        let window_end = (cursor + SEARCH_WINDOW).min(recognized.len());
        let hit = recognized[cursor..window_end]
            .iter()
            .position(|candidate| {
                candidate == word
                    || matching::edit_distance(candidate, word) <= MAX_WORD_EDIT_DISTANCE
            });

        let status = match hit {
            Some(offset) => {
                cursor += offset + 1;
                correct += 1;
                WordStatus::Correct
            }
            None => WordStatus::Missed,
        };
        word_results.push(WordVerdict {
            word: word.clone(),
            status,
        });
    }

    let score = (correct as f64 / expected.len() as f64 * 100.0).round() as u8;
    tracing::debug!(
        score,
        words_read = correct,
        total_words = expected.len(),
        "scoring: transcript scored"
    );

    AccuracyResult {
        score,
        word_results,
        words_read: correct,
        total_words: expected.len(),
    }
}
