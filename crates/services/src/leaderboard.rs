use std::cmp::Reverse;

use quiz_core::model::User;

/// One row of the leaderboard, derived from a `User` on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub score: u32,
}

/// Ranks users by score.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardRanker;

impl LeaderboardRanker {
    /// Sort by score, highest first, with 1-based ranks.
    ///
    /// Equal scores keep the order in which users were supplied. An empty input
    /// yields an empty ranking; the caller decides how to present that.
    #[must_use]
    pub fn rank(users: &[User]) -> Vec<LeaderboardEntry> {
        let mut sorted: Vec<&User> = users.iter().collect();
        // sort_by_key is stable
        sorted.sort_by_key(|user| Reverse(user.score()));
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, user)| LeaderboardEntry {
                rank: i + 1,
                name: user.name().to_owned(),
                score: user.score(),
            })
            .collect()
    }

    /// Display lines in the form `"1. Ada - Score: 5"`.
    #[must_use]
    pub fn render_lines(entries: &[LeaderboardEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| format!("{}. {} - Score: {}", entry.rank, entry.name, entry.score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::UserId;
    use quiz_core::time::fixed_now;

    fn user(id: &str, score: u32) -> User {
        let mut user = User::new(UserId::new(id), id.to_uppercase(), fixed_now());
        user.add_score(score);
        user
    }

    #[test]
    fn ties_keep_supplied_order() {
        let users = vec![user("a", 10), user("b", 10), user("c", 5)];
        let ranked = LeaderboardRanker::rank(&users);
        let rows: Vec<_> = ranked
            .iter()
            .map(|e| (e.rank, e.name.as_str(), e.score))
            .collect();
        assert_eq!(rows, [(1, "A", 10), (2, "B", 10), (3, "C", 5)]);
    }

    #[test]
    fn sorts_descending() {
        let users = vec![user("low", 1), user("high", 9), user("mid", 4), user("mid2", 4)];
        let names: Vec<_> = LeaderboardRanker::rank(&users)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["HIGH", "MID", "MID2", "LOW"]);
    }

    #[test]
    fn empty_input_gives_empty_ranking() {
        assert!(LeaderboardRanker::rank(&[]).is_empty());
    }

    #[test]
    fn renders_rank_name_and_score() {
        let lines = LeaderboardRanker::render_lines(&LeaderboardRanker::rank(&[user("ada", 3)]));
        assert_eq!(lines, ["1. ADA - Score: 3"]);
    }
}
