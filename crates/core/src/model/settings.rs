use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("time limit must be between {min} and {max} seconds, got {got}")]
    InvalidTimeLimit { got: u64, min: u64, max: u64 },
}

/// Tunables for a quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    time_limit: Duration,
}

impl QuizSettings {
    pub const DEFAULT_TIME_LIMIT_SECS: u64 = 30;
    pub const MIN_TIME_LIMIT_SECS: u64 = 1;
    pub const MAX_TIME_LIMIT_SECS: u64 = 3600;

    /// Build settings with a per-question time limit in whole seconds.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidTimeLimit` if the limit is outside 1..=3600.
    pub fn with_time_limit_secs(secs: u64) -> Result<Self, SettingsError> {
        if !(Self::MIN_TIME_LIMIT_SECS..=Self::MAX_TIME_LIMIT_SECS).contains(&secs) {
            return Err(SettingsError::InvalidTimeLimit {
                got: secs,
                min: Self::MIN_TIME_LIMIT_SECS,
                max: Self::MAX_TIME_LIMIT_SECS,
            });
        }
        Ok(Self {
            time_limit: Duration::from_secs(secs),
        })
    }

    /// Answers taking strictly longer than this earn no points.
    #[must_use]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(Self::DEFAULT_TIME_LIMIT_SECS),
        }
    }
}
