#![forbid(unsafe_code)]

pub mod error;
pub mod input;
pub mod leaderboard;
pub mod score_service;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::{InputError, QuizError, ScoreUpdateError, SessionError};
pub use input::{AnswerSource, LineSource, ScriptedInput};
pub use leaderboard::{LeaderboardEntry, LeaderboardRanker};
pub use score_service::ScoreTracker;

pub use sessions::{
    AnswerOutcome, AnsweredQuestion, AttemptReport, QuizRunner, QuizSession, SessionProgress,
    SessionState, Timing,
};
