use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{Question, QuestionBank, QuestionId, QuizSettings, User, UserId};
use storage::repository::UserRepository;
use tracing::{info, warn};

use super::outcome::AnswerOutcome;
use super::service::QuizSession;
use crate::error::QuizError;
use crate::input::AnswerSource;
use crate::leaderboard::{LeaderboardEntry, LeaderboardRanker};
use crate::score_service::ScoreTracker;
use crate::Clock;

/// A question that received a recorded answer during an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredQuestion {
    pub question_id: QuestionId,
    pub outcome: AnswerOutcome,
    pub elapsed: Duration,
}

/// Result of a finalized attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    pub user_id: UserId,
    pub score: u32,
    pub total: usize,
    pub answers: Vec<AnsweredQuestion>,
}

/// Drives attempts: prompts, re-prompts on bad input, times answers and records scores.
#[derive(Clone)]
pub struct QuizRunner {
    clock: Clock,
    settings: QuizSettings,
    bank: QuestionBank,
    users: Arc<dyn UserRepository>,
    scores: ScoreTracker,
}

impl QuizRunner {
    #[must_use]
    pub fn new(clock: Clock, bank: QuestionBank, users: Arc<dyn UserRepository>) -> Self {
        Self {
            clock,
            settings: QuizSettings::default(),
            bank,
            users,
            scores: ScoreTracker::new(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Register a user with a zero score. An existing id is replaced.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::BlankName` for an empty name, or storage failures.
    pub fn register_user(&self, id: UserId, name: &str) -> Result<User, QuizError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::BlankName);
        }
        let user = User::new(id, name, self.clock.now());
        self.users.upsert_user(&user)?;
        info!(
            user = %user.id(),
            name = user.name(),
            registered_at = %user.registered_at(),
            "user registered"
        );
        Ok(user)
    }

    /// Run one attempt for `user_id`, reading answers from `input` and writing
    /// prompts and feedback to `out`.
    ///
    /// Prompting stops early if the input runs out; the attempt then fails at
    /// finalize because some questions were never answered.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` with `SessionError::IncompleteSubmission` when
    /// questions are left unanswered, and storage, input or output failures.
    pub fn run_attempt(
        &self,
        user_id: &UserId,
        input: &mut dyn AnswerSource,
        out: &mut dyn Write,
    ) -> Result<AttemptReport, QuizError> {
        let mut user = self.users.get_user(user_id)?;
        let mut session = QuizSession::new(&self.settings);
        writeln!(out, "\nWelcome to the Quiz Application, {}!", user.name())?;
        writeln!(
            out,
            "You have {} seconds to answer each question.",
            session.time_limit().as_secs()
        )?;

        user.reset_score();
        self.users.upsert_user(&user)?;

        session.start(self.bank.snapshot())?;
        let total = session.questions().len();
        info!(user = %user_id, questions = total, "attempt started");

        let mut answers = Vec::with_capacity(total);
        'questions: while let Some(question) = session.next_unanswered().cloned() {
            display_question(out, &question)?;
            let shown_at = self.clock.mark();

            let (outcome, elapsed) = loop {
                write!(out, "Your answer (1-{}): ", question.option_count())?;
                out.flush()?;
                let Some(line) = input.next_line()? else {
                    let progress = session.progress();
                    warn!(
                        user = %user_id,
                        question = %question.id(),
                        remaining = progress.remaining,
                        "input closed mid-attempt"
                    );
                    break 'questions;
                };
                let elapsed = self.clock.elapsed_since(shown_at);
                match session.submit_answer(question.id(), &line, elapsed)? {
                    AnswerOutcome::ParseFailure => {
                        writeln!(out, "Invalid input. Please enter a number.")?;
                    }
                    AnswerOutcome::InvalidChoice { option_count } => {
                        writeln!(
                            out,
                            "Invalid answer choice. \
                             Please enter a number between 1 and {option_count}."
                        )?;
                    }
                    recorded => break (recorded, elapsed),
                }
            };

            report_outcome(out, &question, outcome, elapsed)?;
            answers.push(AnsweredQuestion {
                question_id: question.id().clone(),
                outcome,
                elapsed,
            });
        }

        let score = session.finalize().inspect_err(|err| {
            warn!(user = %user_id, %err, "attempt rejected");
        })?;

        writeln!(out, "\nQuiz completed!")?;
        writeln!(out, "Your final score: {score} out of {total}")?;
        info!(user = %user_id, score, total, "attempt finalized");

        // Already logged by the tracker; a failed update must not void the attempt.
        let _ = self
            .scores
            .record(self.users.as_ref(), user_id, i64::from(score));

        Ok(AttemptReport {
            user_id: user_id.clone(),
            score,
            total,
            answers,
        })
    }

    /// Current standings over all registered users.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if users cannot be listed.
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, QuizError> {
        let users = self.users.list_users()?;
        Ok(LeaderboardRanker::rank(&users))
    }

    /// Write the leaderboard, or a notice when nobody has registered.
    ///
    /// # Errors
    ///
    /// Returns storage or output failures.
    pub fn display_leaderboard(&self, out: &mut dyn Write) -> Result<(), QuizError> {
        writeln!(out, "\n--- Leaderboard ---")?;
        let entries = self.leaderboard()?;
        if entries.is_empty() {
            writeln!(out, "No users registered yet.")?;
            return Ok(());
        }
        for line in LeaderboardRanker::render_lines(&entries) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

fn display_question(out: &mut dyn Write, question: &Question) -> std::io::Result<()> {
    writeln!(out, "\nQuestion {}: {}", question.id(), question.prompt())?;
    for (i, option) in question.options().iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, option)?;
    }
    Ok(())
}

fn report_outcome(
    out: &mut dyn Write,
    question: &Question,
    outcome: AnswerOutcome,
    elapsed: Duration,
) -> std::io::Result<()> {
    writeln!(out, "Time taken: {} seconds", elapsed.as_secs())?;
    let correct = format!(
        "{}. {}",
        question.correct_index() + 1,
        question.correct_option()
    );
    if outcome.time_exceeded() {
        writeln!(out, "Time's up! Moving to the next question.")?;
        writeln!(out, "The correct answer was: {correct}")
    } else if outcome.is_credited() {
        writeln!(out, "Correct answer!")
    } else {
        writeln!(out, "Incorrect answer. The correct answer was: {correct}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use crate::input::ScriptedInput;
    use crate::sessions::Timing;
    use quiz_core::time::fixed_clock;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storage::repository::{InMemoryUserRepository, StorageError};

    /// Accepts a fixed number of writes, then fails every later one.
    struct FailingWrites {
        inner: InMemoryUserRepository,
        allowed: usize,
        writes: AtomicUsize,
    }

    impl UserRepository for FailingWrites {
        fn upsert_user(&self, user: &User) -> Result<(), StorageError> {
            if self.writes.fetch_add(1, Ordering::SeqCst) >= self.allowed {
                return Err(StorageError::Connection("disk full".into()));
            }
            self.inner.upsert_user(user)
        }

        fn get_user(&self, id: &UserId) -> Result<User, StorageError> {
            self.inner.get_user(id)
        }

        fn list_users(&self) -> Result<Vec<User>, StorageError> {
            self.inner.list_users()
        }
    }

    fn runner() -> (QuizRunner, Clock) {
        let clock = fixed_clock();
        let runner = QuizRunner::new(
            clock.clone(),
            QuestionBank::seeded().unwrap(),
            Arc::new(InMemoryUserRepository::new()),
        );
        (runner, clock)
    }

    #[test]
    fn register_rejects_blank_names() {
        let (runner, _) = runner();
        let err = runner.register_user(UserId::new("u1"), "   ").unwrap_err();
        assert!(matches!(err, QuizError::BlankName));
    }

    #[test]
    fn report_outcome_messages() {
        let bank = QuestionBank::seeded().unwrap();
        let question = &bank.all()[0];
        let mut out: Vec<u8> = Vec::new();
        report_outcome(
            &mut out,
            question,
            AnswerOutcome::Incorrect {
                timing: Timing::WithinLimit,
            },
            Duration::from_millis(4_900),
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Time taken: 4 seconds\nIncorrect answer. The correct answer was: 3. Paris\n"
        );
    }

    #[test]
    fn end_of_input_fails_attempt_as_incomplete() {
        let (runner, clock) = runner();
        runner.register_user(UserId::new("u1"), "Ada").unwrap();
        let mut input = ScriptedInput::new(["3", "2"]).with_clock(clock);
        let mut out: Vec<u8> = Vec::new();

        let err = runner
            .run_attempt(&UserId::new("u1"), &mut input, &mut out)
            .unwrap_err();
        assert!(matches!(
            err,
            QuizError::Session(SessionError::IncompleteSubmission {
                answered: 2,
                total: 5
            })
        ));
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Quiz completed!"));
    }

    #[test]
    fn sub_second_overrun_is_still_credited() {
        let (runner, clock) = runner();
        runner.register_user(UserId::new("u1"), "Ada").unwrap();
        let mut input = ScriptedInput::default()
            .with_clock(clock)
            .line_after(Duration::from_millis(30_500), "3")
            .line("2")
            .line("1")
            .line("2")
            .line("4");
        let mut out: Vec<u8> = Vec::new();

        let report = runner
            .run_attempt(&UserId::new("u1"), &mut input, &mut out)
            .unwrap();
        assert_eq!(report.score, 5);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Time taken: 30 seconds\nCorrect answer!"));
        assert!(!text.contains("Time's up!"));
    }

    #[test]
    fn failed_score_save_does_not_void_attempt() {
        let clock = fixed_clock();
        let inner = InMemoryUserRepository::new();
        // registration and the score reset succeed, the final save fails
        let repo = FailingWrites {
            inner: inner.clone(),
            allowed: 2,
            writes: AtomicUsize::new(0),
        };
        let runner = QuizRunner::new(clock, QuestionBank::seeded().unwrap(), Arc::new(repo));
        runner.register_user(UserId::new("u1"), "Ada").unwrap();

        let mut input = ScriptedInput::new(["3", "2", "1", "2", "4"]);
        let report = runner
            .run_attempt(&UserId::new("u1"), &mut input, &mut std::io::sink())
            .unwrap();
        assert_eq!(report.score, 5);
        assert_eq!(inner.get_user(&UserId::new("u1")).unwrap().score(), 0);
    }
}
