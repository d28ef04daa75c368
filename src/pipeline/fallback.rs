//! Ordered synthesis-provider chaining: a premium provider first, cheaper or
//! more available ones behind it, each wrapped in its own failure boundary.

use crate::error::NarrationError;
use crate::pipeline::traits::{SpeechSynthesizer, SynthesisOutcome, SynthesisRequest};

pub struct FallbackSynthesizer {
    providers: Vec<Box<dyn SpeechSynthesizer>>,
}

impl FallbackSynthesizer {
    pub fn new(providers: Vec<Box<dyn SpeechSynthesizer>>) -> Self {
        Self { providers }
    }
}

impl SpeechSynthesizer for FallbackSynthesizer {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisOutcome, NarrationError> {
        let mut last_error = None;
        for provider in &self.providers {
            match provider.synthesize(request) {
                Ok(outcome) => {
                    tracing::debug!(
                        provider = provider.provider_label(),
                        "synthesis provider succeeded"
                    );
                    return Ok(outcome);
                }
                Err(error) => {
                    tracing::warn!(
                        provider = provider.provider_label(),
                        error = %error,
                        "synthesis provider failed, trying next"
                    );
                    last_error = Some(error);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            NarrationError::synthesis(self.provider_label(), "no synthesis providers configured")
        }))
    }

    fn provider_label(&self) -> &str {
        "fallback-chain"
    }
}
