use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{Question, QuestionId, QuizSettings};
use quiz_core::validator;
use tracing::debug;

use super::outcome::{AnswerOutcome, Timing};
use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Completed,
    /// Finalize was called before every question was answered.
    IncompleteOnFinalize,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One user's pass through an ordered snapshot of the question bank.
///
/// The session is the only writer of its score and answered set. A question becomes
/// answered on its first numeric, in-range submission, whether or not that answer is
/// correct or on time.
pub struct QuizSession {
    state: SessionState,
    time_limit: Duration,
    questions: Arc<[Question]>,
    answered_ids: HashSet<QuestionId>,
    score: u32,
}

impl QuizSession {
    #[must_use]
    pub fn new(settings: &QuizSettings) -> Self {
        Self {
            state: SessionState::NotStarted,
            time_limit: settings.time_limit(),
            questions: Arc::from(Vec::<Question>::new()),
            answered_ids: HashSet::new(),
            score: 0,
        }
    }

    /// Begin an attempt over `questions`, clearing any previous answers and score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyStarted` if an attempt is in progress,
    /// `SessionError::Empty` if no questions are supplied and
    /// `SessionError::DuplicateQuestion` if two questions share an id.
    pub fn start(&mut self, questions: Arc<[Question]>) -> Result<(), SessionError> {
        if self.state == SessionState::InProgress {
            return Err(SessionError::AlreadyStarted);
        }
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        {
            let mut seen = HashSet::with_capacity(questions.len());
            if let Some(dup) = questions.iter().find(|q| !seen.insert(q.id())) {
                return Err(SessionError::DuplicateQuestion(dup.id().clone()));
            }
        }

        self.questions = questions;
        self.answered_ids.clear();
        self.score = 0;
        self.state = SessionState::InProgress;
        Ok(())
    }

    /// Submit raw answer text for a question.
    ///
    /// `elapsed` is the time since the question was shown. It is compared with the
    /// limit in whole seconds, so 30.9 s still counts as 30 s. Text that is not a
    /// number or names no option is returned as an outcome without touching the
    /// session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` outside an attempt,
    /// `SessionError::UnknownQuestion` for ids outside the snapshot and
    /// `SessionError::AlreadyAnswered` once a question has a recorded answer.
    pub fn submit_answer(
        &mut self,
        question_id: &QuestionId,
        raw_answer: &str,
        elapsed: Duration,
    ) -> Result<AnswerOutcome, SessionError> {
        if self.state != SessionState::InProgress {
            return Err(SessionError::NotInProgress);
        }
        let question = self
            .questions
            .iter()
            .find(|q| q.id() == question_id)
            .ok_or_else(|| SessionError::UnknownQuestion(question_id.clone()))?;
        if self.answered_ids.contains(question_id) {
            return Err(SessionError::AlreadyAnswered(question_id.clone()));
        }

        let Some(index) = validator::parse_choice(raw_answer) else {
            debug!(question = %question_id, "answer is not a number");
            return Ok(AnswerOutcome::ParseFailure);
        };
        if !validator::validate(index, question.option_count()) {
            debug!(question = %question_id, index, "answer out of range");
            return Ok(AnswerOutcome::InvalidChoice {
                option_count: question.option_count(),
            });
        }

        let correct = question.is_correct(index);
        self.answered_ids.insert(question_id.clone());

        let timing = if elapsed.as_secs() > self.time_limit.as_secs() {
            Timing::Exceeded
        } else {
            Timing::WithinLimit
        };
        if correct && timing == Timing::WithinLimit {
            self.score = self.score.saturating_add(1);
        }
        debug!(
            question = %question_id,
            correct,
            ?timing,
            ?elapsed,
            score = self.score,
            "answer recorded"
        );

        Ok(if correct {
            AnswerOutcome::Correct { timing }
        } else {
            AnswerOutcome::Incorrect { timing }
        })
    }

    /// True once every question in the snapshot has a recorded answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty()
            && self
                .questions
                .iter()
                .all(|q| self.answered_ids.contains(q.id()))
    }

    /// Close the attempt and return the final score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IncompleteSubmission` if any question is unanswered; the
    /// score is left untouched and the session moves to `IncompleteOnFinalize`.
    /// Returns `SessionError::NotInProgress` if no attempt is running.
    pub fn finalize(&mut self) -> Result<u32, SessionError> {
        if self.state != SessionState::InProgress {
            return Err(SessionError::NotInProgress);
        }
        if !self.is_complete() {
            self.state = SessionState::IncompleteOnFinalize;
            return Err(SessionError::IncompleteSubmission {
                answered: self.answered_ids.len(),
                total: self.questions.len(),
            });
        }
        self.state = SessionState::Completed;
        Ok(self.score)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn is_answered(&self, id: &QuestionId) -> bool {
        self.answered_ids.contains(id)
    }

    /// Number of questions with a recorded answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answered_ids.len()
    }

    /// First question, in bank order, still waiting for an answer.
    #[must_use]
    pub fn next_unanswered(&self) -> Option<&Question> {
        self.questions
            .iter()
            .find(|q| !self.answered_ids.contains(q.id()))
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.questions.len(),
            answered: self.answered_count(),
            remaining: self.questions.len().saturating_sub(self.answered_count()),
            is_complete: self.is_complete(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("state", &self.state)
            .field("questions_len", &self.questions.len())
            .field("answered_len", &self.answered_ids.len())
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
