use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::validator;

/// Minimum number of options a multiple-choice question must offer.
pub const MIN_OPTIONS: usize = 2;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least 2 options, got {count}")]
    TooFewOptions { count: usize },

    #[error("option {position} is empty")]
    EmptyOption { position: usize },

    #[error("correct index {index} is out of range for {option_count} options")]
    CorrectIndexOutOfRange { index: usize, option_count: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with a single correct option.
///
/// Immutable once built; `correct_index` is always a valid zero-based option index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or an option is blank, fewer than two
    /// options are given, or `correct_index` does not point at an option.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                count: options.len(),
            });
        }
        if let Some(position) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption {
                position: position + 1,
            });
        }
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                option_count: options.len(),
            });
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct_index,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Text of the correct option.
    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// Whether a zero-based candidate index names one of this question's options.
    #[must_use]
    pub fn is_valid_answer(&self, candidate_index: i64) -> bool {
        validator::validate(candidate_index, self.options.len())
    }

    /// Whether a zero-based candidate index is the correct option.
    #[must_use]
    pub fn is_correct(&self, candidate_index: i64) -> bool {
        usize::try_from(candidate_index).is_ok_and(|index| index == self.correct_index)
    }
}
