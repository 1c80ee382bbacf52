//! Error types for speech narration

use thiserror::Error;

/// Errors that can occur when starting narration
#[derive(Debug, Error)]
pub enum NarrationError {
    /// No speech engine is installed or configured
    #[error("speech program '{program}' is not available")]
    Unavailable { program: String },

    /// The speech program exists but could not be started
    #[error("failed to start speech program '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl NarrationError {
    /// Whether this error means narration will never work in this session
    pub fn is_permanent(&self) -> bool {
        matches!(self, NarrationError::Unavailable { .. })
    }
}
