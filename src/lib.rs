pub mod alignment;
pub mod config;
pub mod error;
pub mod matching;
pub mod pipeline;
pub mod scoring;
pub mod types;

pub use alignment::source_words;
pub use config::{Grade, NarrationSettings};
pub use error::NarrationError;
pub use pipeline::builder::NarrationPipelineBuilder;
pub use pipeline::runtime::{Narration, NarrationPipeline, ReadingAssessment};
pub use pipeline::traits::{
    SpeechRecognizer, SpeechSynthesizer, SynthesisOutcome, SynthesisRequest,
};
pub use types::{
    AccuracyResult, AlignmentSource, CharacterTiming, MarkTimepoint, RecognizedWord, SourceWord,
    TimedWord, WordStatus, WordVerdict,
};
