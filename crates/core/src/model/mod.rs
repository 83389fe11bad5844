mod bank;
mod ids;
mod question;
mod settings;
mod user;

pub use ids::{ParseIdError, QuestionId, UserId};

pub use bank::{QuestionBank, QuestionBankError};
pub use question::{MIN_OPTIONS, Question, QuestionError};
pub use settings::{QuizSettings, SettingsError};
pub use user::User;
