use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Stored leaderboard row. Users without a ranking row yet come back with
/// zero points and no position.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct UserRankingRow {
    pub user_id: Uuid,
    pub username: String,
    pub group_points: i32,
    pub playoff_points: i32,
    pub total_points: i32,
    pub position: Option<i32>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub ranking: UserRankingRow,
    pub is_logged_in_user: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecalculationSummary {
    pub users_ranked: usize,
    pub predictions_scored: usize,
    pub results_available: usize,
}
