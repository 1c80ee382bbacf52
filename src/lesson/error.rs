//! Error types for lesson flow operations

use thiserror::Error;

use super::session::Phase;

/// Reasons a flow operation was rejected. The session is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Operation is not available in the current phase
    #[error("cannot do that during {actual}, only during {expected}")]
    WrongPhase { expected: Phase, actual: Phase },

    /// Quiz submitted before every question was answered
    #[error("answer all questions first ({answered} of {total} answered)")]
    QuizIncomplete { answered: usize, total: usize },

    /// Answer recorded for a question that does not exist
    #[error("no question with id {id}")]
    UnknownQuestion { id: u32 },

    /// Answer index past the last option
    #[error("option {option} does not exist")]
    OptionOutOfRange { option: usize },

    /// The session has been torn down
    #[error("session has ended")]
    Disposed,
}
