use std::io::Write;

use quiz_core::model::UserId;
use services::{AnswerSource, QuizError, QuizRunner};
use storage::repository::StorageError;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Register,
    TakeQuiz,
    Leaderboard,
    Exit,
}

impl MenuChoice {
    fn from_input(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::Register),
            "2" => Some(Self::TakeQuiz),
            "3" => Some(Self::Leaderboard),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Console main menu. Reads every line, menu choices and quiz answers alike, from
/// the same source.
pub struct Menu<'a> {
    runner: &'a QuizRunner,
    input: &'a mut dyn AnswerSource,
    out: &'a mut dyn Write,
}

impl<'a> Menu<'a> {
    pub fn new(
        runner: &'a QuizRunner,
        input: &'a mut dyn AnswerSource,
        out: &'a mut dyn Write,
    ) -> Self {
        Self { runner, input, out }
    }

    /// Loop until the user exits or input runs out.
    ///
    /// Only input/output failures end the loop with an error; quiz and storage
    /// errors are reported and the menu is shown again.
    pub fn run(&mut self) -> Result<(), QuizError> {
        loop {
            self.print_menu()?;
            let Some(line) = self.input.next_line()? else {
                debug!("input closed at main menu");
                return Ok(());
            };
            let result = match MenuChoice::from_input(&line) {
                Some(MenuChoice::Register) => self.register(),
                Some(MenuChoice::TakeQuiz) => self.take_quiz(),
                Some(MenuChoice::Leaderboard) => self.runner.display_leaderboard(self.out),
                Some(MenuChoice::Exit) => {
                    writeln!(self.out, "Goodbye!")?;
                    return Ok(());
                }
                None => {
                    writeln!(self.out, "Invalid option. Please choose 1-4.")?;
                    continue;
                }
            };
            match result {
                Ok(()) => {}
                Err(err @ (QuizError::Input(_) | QuizError::Output(_))) => return Err(err),
                Err(err) => {
                    error!(%err, "menu action failed");
                    writeln!(self.out, "Error: {err}")?;
                }
            }
        }
    }

    fn print_menu(&mut self) -> Result<(), QuizError> {
        writeln!(self.out, "\n=== Quiz Application ===")?;
        writeln!(self.out, "1. Register user")?;
        writeln!(self.out, "2. Take quiz")?;
        writeln!(self.out, "3. View leaderboard")?;
        writeln!(self.out, "4. Exit")?;
        write!(self.out, "Choose an option: ")?;
        self.out.flush()?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>, QuizError> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        Ok(self.input.next_line()?)
    }

    fn prompt_user_id(&mut self) -> Result<Option<UserId>, QuizError> {
        let Some(raw) = self.prompt("Enter user ID: ")? else {
            return Ok(None);
        };
        match raw.parse::<UserId>() {
            Ok(id) => Ok(Some(id)),
            Err(err) => {
                writeln!(self.out, "Invalid user ID: {err}.")?;
                Ok(None)
            }
        }
    }

    fn register(&mut self) -> Result<(), QuizError> {
        let Some(id) = self.prompt_user_id()? else {
            return Ok(());
        };
        let Some(name) = self.prompt("Enter your name: ")? else {
            return Ok(());
        };
        let user = self.runner.register_user(id, &name)?;
        writeln!(
            self.out,
            "User {} registered with ID {}.",
            user.name(),
            user.id()
        )?;
        Ok(())
    }

    fn take_quiz(&mut self) -> Result<(), QuizError> {
        let Some(id) = self.prompt_user_id()? else {
            return Ok(());
        };
        match self.runner.run_attempt(&id, self.input, self.out) {
            Ok(_) => Ok(()),
            Err(QuizError::Storage(StorageError::NotFound)) => {
                writeln!(self.out, "User not found. Please register first.")?;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
