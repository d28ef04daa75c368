use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::NarrationError;
use crate::scoring;

/// Reading grade the narration is produced for. Grades pick the voice and
/// pace; anything outside the supported range reads as second grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Grade {
    First,
    Second,
    Third,
}

impl Grade {
    pub fn from_number(grade: u8) -> Self {
        match grade {
            1 => Self::First,
            3 => Self::Third,
            _ => Self::Second,
        }
    }

    fn table_index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoiceGender {
    Female,
    Male,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection {
    pub name: String,
    pub gender: VoiceGender,
}

/// Voice and pace for one grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeVoice {
    pub voice: VoiceSelection,
    pub speaking_rate: f64,
}

/// Recognizer tuning passed through to the provider seam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionSettings {
    pub model: String,
    pub sample_rate_hz: u32,
    pub phrase_boost: f32,
    pub max_context_phrases: usize,
    pub profanity_filter: bool,
}

impl RecognitionSettings {
    /// Expected-text tokens offered to the recognizer as boost phrases.
    pub fn context_phrases(&self, expected_text: &str) -> Vec<String> {
        scoring::context_phrases(expected_text, self.max_context_phrases)
    }
}

/// Process-wide narration settings: built once at startup, passed by
/// reference into request handling, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationSettings {
    pub language_code: String,
    /// Indexed by grade, first through third.
    pub grade_voices: [GradeVoice; 3],
    pub recognition: RecognitionSettings,
}

impl NarrationSettings {
    pub fn load(path: &Path) -> Result<Self, NarrationError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| NarrationError::io("read settings.json", e))?;
        serde_json::from_str(&data).map_err(|e| NarrationError::json("parse settings.json", e))
    }

    pub fn voice(&self, grade: Grade) -> &GradeVoice {
        &self.grade_voices[grade.table_index()]
    }
}

impl Default for NarrationSettings {
    fn default() -> Self {
        let female = |name: &str| VoiceSelection {
            name: name.to_string(),
            gender: VoiceGender::Female,
        };
        Self {
            language_code: "en-US".to_string(),
            grade_voices: [
                GradeVoice {
                    voice: female("en-US-Neural2-F"),
                    speaking_rate: 0.85,
                },
                GradeVoice {
                    voice: female("en-US-Neural2-F"),
                    speaking_rate: 0.9,
                },
                GradeVoice {
                    voice: female("en-US-Neural2-C"),
                    speaking_rate: 1.0,
                },
            ],
            recognition: RecognitionSettings {
                model: "latest_long".to_string(),
                sample_rate_hz: 48_000,
                phrase_boost: 15.0,
                max_context_phrases: 100,
                profanity_filter: true,
            },
        }
    }
}
