use crate::alignment::secs_to_ms;
use crate::types::{MarkTimepoint, SourceWord, TimedWord};

/// Playback gap trimmed off a word's end so the highlight releases just
/// before the next word starts.
const MARK_GUARD_MS: u64 = 20;

/// Name of the synthesis mark that precedes source word `index`.
pub(crate) fn mark_name(index: usize) -> String {
    format!("w{index}")
}

/// Resolve named timepoints into per-word spans.
///
/// Word `i` starts at mark `i` and ends a guard interval before mark `i+1`;
/// the final word (or any word whose next mark is missing) runs out to
/// `fallback_duration_ms`. A word whose own mark is missing degrades to a
/// span starting at 0 rather than failing.
pub(super) fn resolve_marks(
    source_words: &[SourceWord],
    timepoints: &[MarkTimepoint],
    fallback_duration_ms: u64,
) -> Vec<TimedWord> {
    source_words
        .iter()
        .map(|word| {
            let start_ms = find_time_ms(timepoints, word.index).unwrap_or_else(|| {
                tracing::warn!(
                    word = word.text.as_str(),
                    index = word.index,
                    "marks: timepoint missing, degrading span start to 0"
                );
                0
            });
            let end_ms = find_time_ms(timepoints, word.index + 1)
                .map(|next_start| next_start.saturating_sub(MARK_GUARD_MS))
                .unwrap_or(fallback_duration_ms);
            TimedWord {
                word: word.text.clone(),
                index: word.index,
                start_ms,
                end_ms,
            }
        })
        .collect()
}

fn find_time_ms(timepoints: &[MarkTimepoint], index: usize) -> Option<u64> {
    let name = mark_name(index);
    timepoints
        .iter()
        .find(|tp| tp.mark_name == name)
        .map(|tp| secs_to_ms(tp.time_seconds))
}
