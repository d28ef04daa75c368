use crate::alignment::secs_to_ms;
use crate::types::{CharacterTiming, SourceWord, TimedWord};

/// A maximal whitespace-delimited run of the spoken character stream.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SpokenWord {
    pub(super) text: String,
    pub(super) start_ms: u64,
    pub(super) end_ms: u64,
}

/// Partition the character stream into spoken words. Each run inherits its
/// start from the first character and its end from the last.
pub(super) fn collect_spoken_words(timing: &CharacterTiming) -> Vec<SpokenWord> {
    let mut words = Vec::new();
    let mut current: Option<SpokenWord> = None;

    for (i, text) in timing.characters.iter().enumerate() {
        if text.trim().is_empty() {
            if let Some(word) = current.take() {
                words.push(word);
            }
            continue;
        }
        let end_ms = secs_to_ms(timing.char_end_seconds[i]);
        match current.as_mut() {
            Some(word) => {
                word.text.push_str(text);
                word.end_ms = end_ms;
            }
            None => {
                current = Some(SpokenWord {
                    text: text.clone(),
                    start_ms: secs_to_ms(timing.char_start_seconds[i]),
                    end_ms,
                });
            }
        }
    }
    if let Some(word) = current.take() {
        words.push(word);
    }
    words
}

/// Resolve a character stream into per-source-word spans.
///
/// When the provider spoke exactly as many words as the source has, spans
/// map index-for-index. Otherwise the provider expanded or contracted the
/// text (digits to words, contractions) and source indices map
/// proportionally onto the spoken sequence; neighboring source words may
/// then inherit the same span.
pub(super) fn resolve_characters(
    source_words: &[SourceWord],
    timing: &CharacterTiming,
) -> Vec<TimedWord> {
    let spoken = collect_spoken_words(timing);
    if spoken.is_empty() {
        return Vec::new();
    }

    let n = source_words.len();
    let m = spoken.len();
    if m != n {
        tracing::debug!(
            source_count = n,
            spoken_count = m,
            "characters: word counts diverge, mapping proportionally"
        );
    }

    source_words
        .iter()
        .map(|word| {
            let spoken_index = if m == n {
                word.index
            } else {
                proportional_index(word.index, n, m)
            };
            let span = &spoken[spoken_index];
            TimedWord {
                word: word.text.clone(),
                index: word.index,
                start_ms: span.start_ms,
                end_ms: span.end_ms,
            }
        })
        .collect()
}

/// Map source index `i` of `n` onto a spoken sequence of length `m`.
fn proportional_index(i: usize, n: usize, m: usize) -> usize {
    if n <= 1 || m <= 1 {
        return 0;
    }
    let projected = (i as f64 / (n - 1) as f64 * (m - 1) as f64).round() as usize;
    projected.min(m - 1)
}
