use serde::{Deserialize, Serialize};

/// One token of the canonical story text. `index` is the word's position in
/// reading order and never changes once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceWord {
    pub text: String,
    pub index: usize,
}

/// A token reported by an external recognizer, with absolute timing in the
/// audio timeline. `start_ms <= end_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedWord {
    #[serde(rename = "word")]
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// A named timepoint reported back by a synthesis provider for a mark
/// embedded in the synthesis input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkTimepoint {
    pub mark_name: String,
    pub time_seconds: f64,
}

/// Per-character timestamps for a continuous spoken character stream. The
/// stream may not keep a 1:1 relationship to source words; numbers and
/// contractions can be expanded or normalized by the provider.
///
/// The three arrays are parallel; entries whose text is whitespace delimit
/// spoken words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterTiming {
    pub characters: Vec<String>,
    pub char_start_seconds: Vec<f64>,
    pub char_end_seconds: Vec<f64>,
}

/// Alignment artifact returned by a synthesis provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignmentSource {
    Marks(Vec<MarkTimepoint>),
    Characters(CharacterTiming),
}

/// Output unit: exactly one per source word, covering the full source
/// sequence in order. `start_ms` is non-decreasing across the sequence and
/// `end_ms >= start_ms` for every entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedWord {
    pub word: String,
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    Correct,
    Missed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordVerdict {
    pub word: String,
    pub status: WordStatus,
}

/// Aggregate reading-accuracy verdict for one recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyResult {
    /// Percentage of expected words read correctly, 0..=100.
    pub score: u8,
    pub word_results: Vec<WordVerdict>,
    pub words_read: usize,
    pub total_words: usize,
}
