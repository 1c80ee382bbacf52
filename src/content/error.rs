//! Error types for curriculum validation and loading

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or loading a curriculum
#[derive(Debug, Error)]
pub enum ContentError {
    /// A lesson needs at least one step
    #[error("curriculum has no lesson steps")]
    NoSteps,

    /// A quiz needs at least one question
    #[error("curriculum has no quiz questions")]
    NoQuestions,

    /// Step title or content is blank
    #[error("lesson step {index} has an empty title or content")]
    EmptyStep { index: usize },

    /// Steps must stay on screen for some time
    #[error("lesson step {index} has zero duration")]
    ZeroDuration { index: usize },

    /// Question ids identify answers and must be unique
    #[error("question id {id} is used more than once")]
    DuplicateQuestionId { id: u32 },

    /// Question text is blank
    #[error("question {id} has no text")]
    EmptyQuestion { id: u32 },

    /// Correct answer must point at one of the options
    #[error("question {id} marks option {index} as correct, but only 4 options exist")]
    CorrectIndexOutOfRange { id: u32, index: usize },

    /// Curriculum file could not be read
    #[error("failed to read curriculum from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Curriculum file is not valid JSON or fails validation
    #[error("failed to parse curriculum {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
