use sqlx::PgPool;

use crate::db::tournament_queries;
use crate::models::ranking::RecalculationSummary;
use crate::models::tournament::{MatchResultRow, ScoreRequest};
use crate::services::game_error::{validate_scores, GameError};
use crate::services::RankingService;

/// Service for the real match results entered by admins
#[derive(Debug, Clone)]
pub struct ResultService {
    pool: PgPool,
    rankings: RankingService,
}

impl ResultService {
    pub fn new(pool: PgPool, rankings: RankingService) -> Self {
        Self { pool, rankings }
    }

    /// Store the result of a match and recompute the leaderboard with it.
    pub async fn submit_result(
        &self,
        match_id: i32,
        request: &ScoreRequest,
    ) -> Result<RecalculationSummary, GameError> {
        let mut tx = self.pool.begin().await?;

        let fixture = tournament_queries::fetch_match(&mut *tx, match_id)
            .await?
            .ok_or(GameError::MatchNotFound(match_id))?;
        let (home_team_id, away_team_id) = fixture.teams().ok_or(GameError::TeamsNotSelected)?;
        let (home_score, away_score) = validate_scores(request.home_score, request.away_score)?;

        let goal_scorer_id = request.goal_scorer();
        if let Some(player_id) = goal_scorer_id {
            if !tournament_queries::player_plays_for(&mut *tx, player_id, home_team_id, away_team_id).await? {
                return Err(GameError::InvalidGoalScorer(player_id));
            }
        }

        tournament_queries::upsert_result(&mut *tx, match_id, home_score, away_score, goal_scorer_id).await?;
        let summary = self.rankings.recalculate_in_tx(&mut tx).await?;

        tx.commit().await?;

        tracing::info!(
            "Result stored for match {}: {} {} - {} {}",
            match_id,
            home_team_id,
            home_score,
            away_score,
            away_team_id
        );

        Ok(summary)
    }

    pub async fn list_results(&self) -> Result<Vec<MatchResultRow>, GameError> {
        Ok(tournament_queries::fetch_results(&self.pool).await?)
    }
}
