use serde::{Deserialize, Serialize};

use crate::alignment::{forced, resolver, source_words};
use crate::config::{Grade, NarrationSettings};
use crate::error::NarrationError;
use crate::pipeline::markup::{build_marked_ssml, estimate_total_duration_ms};
use crate::pipeline::traits::{SpeechRecognizer, SpeechSynthesizer, SynthesisRequest};
use crate::scoring;
use crate::types::{AccuracyResult, RecognizedWord, TimedWord};

/// Narrated audio with per-word highlight timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narration {
    #[serde(skip)]
    pub audio: Vec<u8>,
    pub word_timings: Vec<TimedWord>,
    pub total_words: usize,
    pub voice_used: String,
}

/// Transcription of a child's recording scored against the expected text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingAssessment {
    pub transcript: String,
    /// Mean recognizer confidence as a percentage, 0 when unreported.
    pub confidence: u8,
    pub word_timings: Vec<RecognizedWord>,
    pub accuracy: AccuracyResult,
}

pub struct NarrationPipeline {
    settings: NarrationSettings,
    synthesizer: Box<dyn SpeechSynthesizer>,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
}

pub(crate) struct NarrationPipelineParts {
    pub settings: NarrationSettings,
    pub synthesizer: Box<dyn SpeechSynthesizer>,
    pub recognizer: Option<Box<dyn SpeechRecognizer>>,
}

impl NarrationPipeline {
    pub(crate) fn from_parts(parts: NarrationPipelineParts) -> Self {
        Self {
            settings: parts.settings,
            synthesizer: parts.synthesizer,
            recognizer: parts.recognizer,
        }
    }

    /// Synthesize `text` and derive one timed span per source word.
    ///
    /// Timing comes from the best usable alignment artifact the provider
    /// returned, refined by forced alignment when a recognizer is wired in.
    /// When nothing is usable the words are distributed evenly over the
    /// estimated duration; the result always covers every source word.
    pub fn narrate(&self, text: &str, grade: Grade) -> Result<Narration, NarrationError> {
        let source = source_words(text);
        let grade_voice = self.settings.voice(grade);
        if source.is_empty() {
            return Ok(Narration {
                audio: Vec::new(),
                word_timings: Vec::new(),
                total_words: 0,
                voice_used: grade_voice.voice.name.clone(),
            });
        }

        let request = SynthesisRequest {
            ssml: build_marked_ssml(text),
            voice_name: grade_voice.voice.name.clone(),
            language_code: self.settings.language_code.clone(),
            speaking_rate: grade_voice.speaking_rate,
        };
        let outcome = self.synthesizer.synthesize(&request)?;

        let selected = resolver::select_alignment(source.len(), &outcome.alignments);
        let fallback_duration_ms = estimate_total_duration_ms(selected, source.len());
        let mut word_timings = selected
            .map(|alignment| resolver::resolve(&source, alignment, fallback_duration_ms))
            .unwrap_or_default();

        if let Some(refined) = self.refine_with_recognizer(text, &outcome.audio) {
            word_timings = forced::align(&source, &refined);
        }

        if word_timings.is_empty() {
            tracing::warn!(
                words = source.len(),
                fallback_duration_ms,
                "narration: no usable alignment, distributing words evenly"
            );
            word_timings = resolver::even_fallback(&source, fallback_duration_ms);
        }

        Ok(Narration {
            audio: outcome.audio,
            word_timings,
            total_words: source.len(),
            voice_used: grade_voice.voice.name.clone(),
        })
    }

    /// Transcribe a child's recording and score it against `expected_text`.
    pub fn assess_reading(
        &self,
        audio: &[u8],
        expected_text: &str,
    ) -> Result<ReadingAssessment, NarrationError> {
        let recognizer = self.recognizer.as_ref().ok_or_else(|| {
            NarrationError::invalid_input("no speech recognizer configured for assessment")
        })?;
        let phrases = self.settings.recognition.context_phrases(expected_text);
        let words = recognizer.recognize(audio, &phrases)?;

        let transcript = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let accuracy = scoring::score(expected_text, &transcript);
        Ok(ReadingAssessment {
            confidence: mean_confidence_percent(&words),
            transcript,
            word_timings: words,
            accuracy,
        })
    }

    /// Run the recognizer over the synthesized audio so the timing can be
    /// forced-aligned against what was actually spoken. Failures keep the
    /// synthesis-side timings rather than surfacing an error.
    fn refine_with_recognizer(&self, text: &str, audio: &[u8]) -> Option<Vec<RecognizedWord>> {
        let recognizer = self.recognizer.as_ref()?;
        let phrases = self.settings.recognition.context_phrases(text);
        match recognizer.recognize(audio, &phrases) {
            Ok(words) if words.is_empty() => None,
            Ok(words) => Some(words),
            Err(error) => {
                tracing::warn!(
                    provider = recognizer.provider_label(),
                    error = %error,
                    "narration: recognizer refinement failed, keeping synthesis timing"
                );
                None
            }
        }
    }
}

fn mean_confidence_percent(words: &[RecognizedWord]) -> u8 {
    let reported: Vec<f32> = words.iter().filter_map(|w| w.confidence).collect();
    if reported.is_empty() {
        return 0;
    }
    let mean = reported.iter().sum::<f32>() / reported.len() as f32;
    (mean * 100.0).round().clamp(0.0, 100.0) as u8
}
