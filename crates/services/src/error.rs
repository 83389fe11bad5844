//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionId;
use storage::repository::StorageError;

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("session already in progress")]
    AlreadyStarted,
    #[error("session is not in progress")]
    NotInProgress,
    #[error("question {0} appears more than once in the session")]
    DuplicateQuestion(QuestionId),
    #[error("question {0} is not part of this session")]
    UnknownQuestion(QuestionId),
    #[error("question {0} was already answered")]
    AlreadyAnswered(QuestionId),
    #[error("Quiz cannot be submitted: Not all questions were attempted ({answered} of {total}).")]
    IncompleteSubmission { answered: usize, total: usize },
}

/// Errors reported by `ScoreTracker`. Callers log and absorb these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScoreUpdateError {
    #[error("cannot update score for a missing user")]
    MissingUser,
    #[error("cannot update score with negative points ({0})")]
    NegativePoints(i64),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by answer sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors emitted by `QuizRunner`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("user name cannot be empty")]
    BlankName,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
