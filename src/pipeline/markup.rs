//! Synthesis input markup and duration estimation.

use crate::alignment::resolver::marks::mark_name;
use crate::alignment::secs_to_ms;
use crate::types::AlignmentSource;

/// Silence the provider appends after the last spoken word.
const AUDIO_TAIL_MS: u64 = 800;

/// Per-word duration estimate when no timing data exists at all.
const ESTIMATED_WORD_MS: u64 = 350;

/// Wrap each whitespace word of `text` with a named mark so the provider
/// reports a timepoint at every word onset. Mark names follow the `wN`
/// convention the marks resolver looks up.
pub fn build_marked_ssml(text: &str) -> String {
    let marked = text
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| format!("<mark name=\"{}\"/>{}", mark_name(i), escape(word)))
        .collect::<Vec<_>>()
        .join(" ");
    format!("<speak>{marked}</speak>")
}

/// Estimate the utterance duration: the latest timestamp in the artifact
/// plus the provider's trailing silence, or a flat per-word rate when no
/// artifact is usable.
pub fn estimate_total_duration_ms(alignment: Option<&AlignmentSource>, word_count: usize) -> u64 {
    let last_seconds = alignment.and_then(latest_timestamp_seconds);
    match last_seconds {
        Some(seconds) => secs_to_ms(seconds) + AUDIO_TAIL_MS,
        None => word_count as u64 * ESTIMATED_WORD_MS,
    }
}

fn latest_timestamp_seconds(alignment: &AlignmentSource) -> Option<f64> {
    let times: Box<dyn Iterator<Item = f64> + '_> = match alignment {
        AlignmentSource::Marks(timepoints) => {
            Box::new(timepoints.iter().map(|tp| tp.time_seconds))
        }
        AlignmentSource::Characters(timing) => {
            Box::new(timing.char_end_seconds.iter().copied())
        }
    };
    times
        .filter(|t| t.is_finite())
        .fold(None, |max, t| Some(max.map_or(t, |m: f64| m.max(t))))
}

fn escape(word: &str) -> String {
    word.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MarkTimepoint;

    #[test]
    fn ssml_marks_every_word() {
        let ssml = build_marked_ssml("The quick fox");
        assert_eq!(
            ssml,
            "<speak><mark name=\"w0\"/>The <mark name=\"w1\"/>quick <mark name=\"w2\"/>fox</speak>"
        );
    }

    #[test]
    fn ssml_escapes_markup_characters() {
        let ssml = build_marked_ssml("cats & <dogs>");
        assert!(ssml.contains("cats &amp;"));
        assert!(ssml.contains("&lt;dogs&gt;"));
    }

    #[test]
    fn ssml_empty_text() {
        assert_eq!(build_marked_ssml("  "), "<speak></speak>");
    }

    #[test]
    fn duration_from_last_timepoint_plus_tail() {
        let alignment = AlignmentSource::Marks(vec![
            MarkTimepoint {
                mark_name: "w0".into(),
                time_seconds: 0.0,
            },
            MarkTimepoint {
                mark_name: "w1".into(),
                time_seconds: 1.5,
            },
        ]);
        assert_eq!(estimate_total_duration_ms(Some(&alignment), 2), 2300);
    }

    #[test]
    fn duration_falls_back_to_word_rate() {
        assert_eq!(estimate_total_duration_ms(None, 4), 1400);
        let empty = AlignmentSource::Marks(Vec::new());
        assert_eq!(estimate_total_duration_ms(Some(&empty), 4), 1400);
    }
}
