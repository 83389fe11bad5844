use quiz_core::model::{User, UserId};
use storage::repository::{StorageError, UserRepository};
use tracing::error;

use crate::error::ScoreUpdateError;

/// Applies non-negative point deltas to user scores.
///
/// Rejected updates are logged and returned as `ScoreUpdateError`; they never mutate
/// the user. Callers are expected to absorb the error rather than abort.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreTracker;

impl ScoreTracker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Add `points` to `user`'s score and return the new score.
    ///
    /// # Errors
    ///
    /// Returns `ScoreUpdateError::MissingUser` when no user is given and
    /// `ScoreUpdateError::NegativePoints` when `points` is below zero.
    pub fn update_score(
        &self,
        user: Option<&mut User>,
        points: i64,
    ) -> Result<u32, ScoreUpdateError> {
        let Some(user) = user else {
            error!(points, "cannot update score for a missing user");
            return Err(ScoreUpdateError::MissingUser);
        };
        if points < 0 {
            error!(user = %user.id(), points, "cannot update score with negative points");
            return Err(ScoreUpdateError::NegativePoints(points));
        }
        let points = u32::try_from(points).unwrap_or(u32::MAX);
        Ok(user.add_score(points))
    }

    /// Resolve a user through the repository, apply `points` and save the result.
    ///
    /// # Errors
    ///
    /// Returns `ScoreUpdateError::MissingUser` if the user is not registered,
    /// `ScoreUpdateError::NegativePoints` for negative deltas and
    /// `ScoreUpdateError::Storage` if the repository fails.
    pub fn record(
        &self,
        users: &dyn UserRepository,
        user_id: &UserId,
        points: i64,
    ) -> Result<u32, ScoreUpdateError> {
        let mut user = match users.get_user(user_id) {
            Ok(user) => Some(user),
            Err(StorageError::NotFound) => None,
            Err(err) => {
                error!(user = %user_id, %err, "failed to load user for score update");
                return Err(err.into());
            }
        };
        let score = self.update_score(user.as_mut(), points)?;
        if let Some(user) = &user {
            users.upsert_user(user).inspect_err(|err| {
                error!(user = %user_id, %err, "failed to save score update");
            })?;
        }
        Ok(score)
    }
}
