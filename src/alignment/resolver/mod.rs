//! Resolution of synthesis-provider alignment artifacts into per-source-word
//! timing sequences.

mod characters;
pub(crate) mod marks;

use crate::alignment::repair_monotonicity;
use crate::types::{AlignmentSource, SourceWord, TimedWord};

/// Resolve one alignment artifact into per-word spans.
///
/// An empty result means "no usable alignment" and is the signal for the
/// caller to substitute [`even_fallback`]; malformed artifacts never raise an
/// error. Non-empty results are structurally valid: one entry per source
/// word, starts non-decreasing, `end >= start`.
pub fn resolve(
    source_words: &[SourceWord],
    alignment: &AlignmentSource,
    fallback_duration_ms: u64,
) -> Vec<TimedWord> {
    if source_words.is_empty() {
        return Vec::new();
    }
    if !is_usable(alignment) {
        tracing::warn!("resolver: alignment artifact unusable, signaling fallback");
        return Vec::new();
    }

    let mut words = match alignment {
        AlignmentSource::Marks(timepoints) => {
            marks::resolve_marks(source_words, timepoints, fallback_duration_ms)
        }
        AlignmentSource::Characters(timing) => {
            characters::resolve_characters(source_words, timing)
        }
    };
    repair_monotonicity(&mut words);
    words
}

/// Pick the artifact whose spoken-word count is numerically closest to the
/// source-word count. Ties keep the earlier variant, so callers list the raw
/// artifact before normalized ones. Unusable artifacts are skipped.
pub fn select_alignment(
    source_count: usize,
    variants: &[AlignmentSource],
) -> Option<&AlignmentSource> {
    let selected = variants
        .iter()
        .filter(|variant| is_usable(variant))
        .min_by_key(|variant| spoken_word_count(variant).abs_diff(source_count));
    if let Some(variant) = selected {
        tracing::debug!(
            source_count,
            spoken_count = spoken_word_count(variant),
            candidates = variants.len(),
            "resolver: selected alignment variant"
        );
    }
    selected
}

/// Even-distribution substitute used when no alignment data is usable: the
/// estimated duration is split uniformly across the source words.
pub fn even_fallback(source_words: &[SourceWord], fallback_duration_ms: u64) -> Vec<TimedWord> {
    let n = source_words.len();
    let duration = fallback_duration_ms as f64;
    source_words
        .iter()
        .map(|word| {
            let start_ms = (word.index as f64 / n as f64 * duration).round() as u64;
            let end_ms = ((word.index + 1) as f64 / n as f64 * duration).round() as u64;
            TimedWord {
                word: word.text.clone(),
                index: word.index,
                start_ms,
                end_ms,
            }
        })
        .collect()
}

/// Number of spoken words an artifact describes, for variant selection.
fn spoken_word_count(alignment: &AlignmentSource) -> usize {
    match alignment {
        AlignmentSource::Marks(timepoints) => timepoints.len(),
        AlignmentSource::Characters(timing) => characters::collect_spoken_words(timing).len(),
    }
}

/// Malformed artifacts (nothing in them, parallel arrays out of step, or
/// non-finite timestamps) are unusable rather than errors.
fn is_usable(alignment: &AlignmentSource) -> bool {
    match alignment {
        AlignmentSource::Marks(timepoints) => {
            !timepoints.is_empty() && timepoints.iter().all(|tp| tp.time_seconds.is_finite())
        }
        AlignmentSource::Characters(timing) => {
            let len = timing.characters.len();
            len > 0
                && timing.char_start_seconds.len() == len
                && timing.char_end_seconds.len() == len
                && timing.char_start_seconds.iter().all(|s| s.is_finite())
                && timing.char_end_seconds.iter().all(|s| s.is_finite())
        }
    }
}
