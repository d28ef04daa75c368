use crate::error::NarrationError;
use crate::types::{AlignmentSource, RecognizedWord};

/// One synthesis request, already shaped for a provider: marked-up input
/// plus the voice chosen for the grade.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub ssml: String,
    pub voice_name: String,
    pub language_code: String,
    pub speaking_rate: f64,
}

/// What a synthesis provider hands back: encoded audio and zero or more
/// alignment artifacts for the utterance, listed in preference order (raw
/// first, normalized variants after).
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOutcome {
    pub audio: Vec<u8>,
    pub alignments: Vec<AlignmentSource>,
}

/// Seam for text-to-speech providers. Implementations own all network,
/// retry and timeout policy; the pipeline only consumes the outcome.
pub trait SpeechSynthesizer: Send + Sync {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisOutcome, NarrationError>;

    fn provider_label(&self) -> &str;
}

/// Seam for speech-to-text providers. `context_phrases` bias recognition
/// toward the passage vocabulary.
pub trait SpeechRecognizer: Send + Sync {
    fn recognize(
        &self,
        audio: &[u8],
        context_phrases: &[String],
    ) -> Result<Vec<RecognizedWord>, NarrationError>;

    fn provider_label(&self) -> &str;
}
