use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::{Question, QuestionError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank cannot be empty")]
    Empty,

    #[error("duplicate question id: {0}")]
    DuplicateId(QuestionId),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Fixed, ordered set of questions loaded at startup.
///
/// Read-only for the lifetime of the process. Sessions take a cheap shared
/// [`snapshot`](Self::snapshot) rather than borrowing the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Arc<[Question]>,
}

impl QuestionBank {
    /// Build a bank from an ordered list of questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Empty` for an empty list and
    /// `QuestionBankError::DuplicateId` if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuestionBankError::DuplicateId(question.id().clone()));
            }
        }
        Ok(Self {
            questions: questions.into(),
        })
    }

    /// The five general-knowledge questions shipped with the app.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError` if a seed entry fails validation.
    pub fn seeded() -> Result<Self, QuestionBankError> {
        const SEED: [(&str, &str, [&str; 4], usize); 5] = [
            (
                "1",
                "What is the capital of France?",
                ["Berlin", "Madrid", "Paris", "Lisbon"],
                2,
            ),
            (
                "2",
                "Which planet is known as the Red Planet?",
                ["Earth", "Mars", "Jupiter", "Saturn"],
                1,
            ),
            (
                "3",
                "What is the chemical symbol for gold?",
                ["Au", "Ag", "Cu", "Fe"],
                0,
            ),
            (
                "4",
                "Who developed the theory of relativity?",
                [
                    "Isaac Newton",
                    "Albert Einstein",
                    "Galileo Galilei",
                    "Nikola Tesla",
                ],
                1,
            ),
            (
                "5",
                "What is the largest ocean on Earth?",
                [
                    "Atlantic Ocean",
                    "Indian Ocean",
                    "Arctic Ocean",
                    "Pacific Ocean",
                ],
                3,
            ),
        ];

        let questions = SEED
            .iter()
            .map(|(id, prompt, options, correct)| {
                Question::new(
                    QuestionId::new(*id),
                    *prompt,
                    options.iter().map(|o| (*o).to_string()).collect(),
                    *correct,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    #[must_use]
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    /// Shared handle to the ordered questions, used to start sessions.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[Question]> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str) -> Question {
        Question::new(
            QuestionId::new(id),
            "Q",
            vec!["a".to_string(), "b".to_string()],
            0,
        )
        .unwrap()
    }

    #[test]
    fn seeded_bank_keeps_order() {
        let bank = QuestionBank::seeded().unwrap();
        let ids: Vec<_> = bank.all().iter().map(|q| q.id().as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
        assert_eq!(bank.get(&QuestionId::new("1")).unwrap().correct_option(), "Paris");
        assert_eq!(bank.get(&QuestionId::new("5")).unwrap().correct_option(), "Pacific Ocean");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = QuestionBank::new(vec![question("1"), question("2"), question("1")]).unwrap_err();
        assert_eq!(err, QuestionBankError::DuplicateId(QuestionId::new("1")));
    }

    #[test]
    fn rejects_empty_bank() {
        assert_eq!(QuestionBank::new(Vec::new()).unwrap_err(), QuestionBankError::Empty);
    }

    #[test]
    fn snapshot_shares_questions() {
        let bank = QuestionBank::new(vec![question("a"), question("b")]).unwrap();
        let snapshot = bank.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(&*snapshot, bank.all());
    }
}
