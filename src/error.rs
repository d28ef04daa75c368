use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrationError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("synthesis via {provider} failed: {message}")]
    Synthesis { provider: String, message: String },
    #[error("recognition via {provider} failed: {message}")]
    Recognition { provider: String, message: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl NarrationError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn synthesis(provider: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Synthesis {
            provider: provider.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
