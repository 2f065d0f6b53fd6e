use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::{prediction_queries, tournament_queries};
use crate::models::tournament::{ScoreRequest, Stage, TournamentMatch};
use crate::scoring::{predicted_group_table, TeamTableRow};
use crate::services::game_error::{validate_scores, GameError};

/// Service for user predictions
#[derive(Debug, Clone)]
pub struct PredictionService {
    pool: PgPool,
}

impl PredictionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store or replace a user's prediction for a match.
    ///
    /// The goal scorer field must be present; `0` stands for "no goal scorer".
    /// Group stage predictions also refresh the user's predicted group table.
    pub async fn submit_prediction(
        &self,
        user_id: Uuid,
        match_id: i32,
        request: &ScoreRequest,
        now: DateTime<Utc>,
    ) -> Result<(), GameError> {
        let mut tx = self.pool.begin().await?;

        let fixture = tournament_queries::fetch_match(&mut *tx, match_id)
            .await?
            .ok_or(GameError::MatchNotFound(match_id))?;

        if fixture.has_started(now) {
            return Err(GameError::MatchStarted);
        }
        let (home_team_id, away_team_id) = fixture.teams().ok_or(GameError::TeamsNotSelected)?;
        let (home_score, away_score) = validate_scores(request.home_score, request.away_score)?;

        if request.goal_scorer_id.is_none() {
            return Err(GameError::MissingGoalScorer);
        }
        let goal_scorer_id = request.goal_scorer();
        if let Some(player_id) = goal_scorer_id {
            if !tournament_queries::player_plays_for(&mut *tx, player_id, home_team_id, away_team_id).await? {
                return Err(GameError::InvalidGoalScorer(player_id));
            }
        }

        prediction_queries::upsert_prediction(&mut *tx, user_id, match_id, home_score, away_score, goal_scorer_id)
            .await?;

        if let Some(table) = self.refresh_group_table(&mut tx, user_id, &fixture).await? {
            tracing::debug!("Predicted table of user {} now has {} teams", user_id, table.len());
        }

        tx.commit().await?;

        tracing::info!(
            "Prediction stored for user {} on match {}: {} - {}",
            user_id,
            match_id,
            home_score,
            away_score
        );

        Ok(())
    }

    async fn refresh_group_table(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        fixture: &TournamentMatch,
    ) -> Result<Option<Vec<TeamTableRow>>, sqlx::Error> {
        let group_id = match (fixture.stage, &fixture.group_id) {
            (Stage::Group, Some(group_id)) => group_id,
            _ => return Ok(None),
        };

        let fixtures = prediction_queries::fetch_group_fixture_predictions(&mut **tx, user_id, group_id).await?;
        let table = predicted_group_table(&fixtures);
        for row in &table {
            prediction_queries::upsert_user_team(&mut **tx, user_id, row).await?;
        }

        Ok(Some(table))
    }
}
