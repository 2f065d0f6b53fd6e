use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stage points of one user, the input of the leaderboard.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub user_id: Uuid,
    pub username: String,
    pub group_points: u32,
    pub playoff_points: u32,
}

impl RankingEntry {
    /// A user without any scored prediction yet.
    pub fn empty(user_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            group_points: 0,
            playoff_points: 0,
        }
    }

    pub fn total_points(&self) -> u32 {
        self.group_points + self.playoff_points
    }
}

/// One leaderboard row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserRanking {
    pub user_id: Uuid,
    pub username: String,
    pub group_points: u32,
    pub playoff_points: u32,
    pub total_points: u32,
    pub rank: u32,
}

/// Sort users by total points and assign ranks.
///
/// Equal totals are ordered by username, then user id, and share the same
/// rank: totals of 5, 5 and 3 rank 1, 1 and 3.
pub fn build_ranking<I>(entries: I) -> Vec<UserRanking>
where
    I: IntoIterator<Item = RankingEntry>,
{
    let mut entries: Vec<RankingEntry> = entries.into_iter().collect();
    entries.sort_by(|a, b| {
        b.total_points()
            .cmp(&a.total_points())
            .then_with(|| a.username.cmp(&b.username))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    let mut rankings: Vec<UserRanking> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let total_points = entry.total_points();
        let rank = match rankings.last() {
            Some(previous) if previous.total_points == total_points => previous.rank,
            _ => (index + 1) as u32,
        };

        rankings.push(UserRanking {
            user_id: entry.user_id,
            username: entry.username,
            group_points: entry.group_points,
            playoff_points: entry.playoff_points,
            total_points,
            rank,
        });
    }

    rankings
}
