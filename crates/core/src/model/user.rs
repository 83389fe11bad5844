use chrono::{DateTime, Utc};

use crate::model::ids::UserId;

/// A registered quiz participant.
///
/// `score` mirrors the most recent completed attempt. It is reset when a new
/// attempt starts, not accumulated across attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    score: u32,
    registered_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, registered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            registered_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Clears the score ahead of a new attempt.
    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    /// Adds points, saturating at `u32::MAX`. Returns the new score.
    pub fn add_score(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn score_resets_and_saturates() {
        let mut user = User::new(UserId::new("u1"), "Ada", fixed_now());
        assert_eq!(user.score(), 0);
        assert_eq!(user.add_score(3), 3);
        user.reset_score();
        assert_eq!(user.score(), 0);
        user.add_score(u32::MAX);
        assert_eq!(user.add_score(1), u32::MAX);
    }
}
