use crate::config::NarrationSettings;
use crate::error::NarrationError;
use crate::pipeline::fallback::FallbackSynthesizer;
use crate::pipeline::runtime::{NarrationPipeline, NarrationPipelineParts};
use crate::pipeline::traits::{SpeechRecognizer, SpeechSynthesizer};

pub struct NarrationPipelineBuilder {
    settings: NarrationSettings,
    synthesizers: Vec<Box<dyn SpeechSynthesizer>>,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
}

impl NarrationPipelineBuilder {
    pub fn new(settings: NarrationSettings) -> Self {
        Self {
            settings,
            synthesizers: Vec::new(),
            recognizer: None,
        }
    }

    /// Add a synthesis provider. Providers are tried in registration order;
    /// register the premium provider first.
    pub fn with_synthesizer(mut self, synthesizer: Box<dyn SpeechSynthesizer>) -> Self {
        self.synthesizers.push(synthesizer);
        self
    }

    /// Wire in a recognizer, enabling forced-alignment refinement of the
    /// narration timing and reading assessment.
    pub fn with_recognizer(mut self, recognizer: Box<dyn SpeechRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn build(mut self) -> Result<NarrationPipeline, NarrationError> {
        if self.synthesizers.is_empty() {
            return Err(NarrationError::invalid_input(
                "at least one synthesis provider is required",
            ));
        }
        let synthesizer = if self.synthesizers.len() == 1 {
            self.synthesizers.remove(0)
        } else {
            Box::new(FallbackSynthesizer::new(self.synthesizers))
        };
        Ok(NarrationPipeline::from_parts(NarrationPipelineParts {
            settings: self.settings,
            synthesizer,
            recognizer: self.recognizer,
        }))
    }
}
