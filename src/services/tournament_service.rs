use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{prediction_queries, tournament_queries};
use crate::models::tournament::{
    GroupDetail, GroupOverview, MatchDetail, MatchPredictionRow, MatchWithPrediction, Player, PlayoffOverview,
    PlayoffPair, PlayoffPairsRequest, PlayoffPairsResponse, ScoreView, Stage, TournamentMatch,
};
use crate::scoring::ScoringRule;
use crate::services::game_error::GameError;

/// Read models of the game pages and the admin playoff pairing.
#[derive(Debug, Clone)]
pub struct TournamentService {
    pool: PgPool,
    rule: ScoringRule,
}

impl TournamentService {
    pub fn new(pool: PgPool, rule: ScoringRule) -> Self {
        Self { pool, rule }
    }

    /// Matches starting on the UTC calendar day of `now`.
    pub async fn today_matches(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<Vec<MatchWithPrediction>, GameError> {
        let (from, to) = day_bounds(now);
        let rows = tournament_queries::fetch_matches_between(&self.pool, user_id, from, to).await?;
        Ok(rows.into_iter().map(|row| match_view(&self.rule, row)).collect())
    }

    pub async fn group_overview(&self, user_id: Uuid) -> Result<Vec<GroupOverview>, GameError> {
        let groups = tournament_queries::fetch_groups(&self.pool).await?;
        let rows = tournament_queries::fetch_stage_matches(&self.pool, user_id, Stage::Group).await?;

        let mut by_group: HashMap<String, Vec<MatchWithPrediction>> = HashMap::new();
        for row in rows {
            if let Some(group_id) = row.tournament_match.group_id.clone() {
                by_group.entry(group_id).or_default().push(match_view(&self.rule, row));
            }
        }

        Ok(groups
            .into_iter()
            .map(|group| GroupOverview {
                matches: by_group.remove(&group.id).unwrap_or_default(),
                group,
            })
            .collect())
    }

    pub async fn group_detail(&self, user_id: Uuid, group_id: &str) -> Result<GroupDetail, GameError> {
        let group = tournament_queries::fetch_group(&self.pool, group_id)
            .await?
            .ok_or_else(|| GameError::GroupNotFound(group_id.to_string()))?;
        let rows = tournament_queries::fetch_group_matches(&self.pool, user_id, group_id).await?;
        let predicted_table = prediction_queries::fetch_user_teams(&self.pool, user_id, group_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(GroupDetail {
            group,
            matches: rows.into_iter().map(|row| match_view(&self.rule, row)).collect(),
            predicted_table,
        })
    }

    pub async fn playoff_overview(&self, user_id: Uuid) -> Result<Vec<PlayoffOverview>, GameError> {
        let playoffs = tournament_queries::fetch_playoffs(&self.pool).await?;
        let rows = tournament_queries::fetch_stage_matches(&self.pool, user_id, Stage::Playoff).await?;

        let mut by_playoff: HashMap<String, Vec<MatchWithPrediction>> = HashMap::new();
        for row in rows {
            if let Some(playoff_id) = row.tournament_match.playoff_id.clone() {
                by_playoff.entry(playoff_id).or_default().push(match_view(&self.rule, row));
            }
        }

        Ok(playoffs
            .into_iter()
            .map(|playoff| PlayoffOverview {
                matches: by_playoff.remove(&playoff.id).unwrap_or_default(),
                playoff,
            })
            .collect())
    }

    pub async fn match_detail(&self, user_id: Uuid, match_id: i32) -> Result<MatchDetail, GameError> {
        let row = tournament_queries::fetch_match_with_prediction(&self.pool, user_id, match_id)
            .await?
            .ok_or(GameError::MatchNotFound(match_id))?;

        let team_ids: Vec<String> = [&row.tournament_match.home_team_id, &row.tournament_match.away_team_id]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        let players = if team_ids.is_empty() {
            Vec::new()
        } else {
            tournament_queries::fetch_players_for_teams(&self.pool, &team_ids).await?
        };

        let home = row.tournament_match.home_team_id.clone();
        let (home_team_players, away_team_players): (Vec<Player>, Vec<Player>) = players
            .into_iter()
            .partition(|player| Some(&player.team_id) == home.as_ref());

        Ok(MatchDetail {
            fixture: match_view(&self.rule, row),
            home_team_players,
            away_team_players,
        })
    }

    /// Playoff fixtures with their current teams, plus every team to choose from.
    pub async fn playoff_pairs(&self) -> Result<PlayoffPairsResponse, GameError> {
        // Nil user: the admin listing carries no predictions.
        let playoffs = self.playoff_overview(Uuid::nil()).await?;
        let teams = tournament_queries::fetch_teams(&self.pool).await?;
        Ok(PlayoffPairsResponse { playoffs, teams })
    }

    /// Assign teams to playoff fixtures. All pairs are applied or none.
    pub async fn assign_playoff_pairs(&self, request: &PlayoffPairsRequest) -> Result<usize, GameError> {
        let mut tx = self.pool.begin().await?;

        for pair in &request.pairs {
            let fixture = tournament_queries::fetch_match(&mut *tx, pair.match_id)
                .await?
                .ok_or(GameError::MatchNotFound(pair.match_id))?;

            if fixture.stage != Stage::Playoff {
                return Err(GameError::InvalidPlayoffPair {
                    match_id: pair.match_id,
                    reason: "not a playoff match".to_string(),
                });
            }

            // A side left out of the request keeps the team already stored
            let resolved = resolve_pair(pair, &fixture);
            if let (Some(home), Some(away)) = (&resolved.home_team_id, &resolved.away_team_id) {
                if home == away {
                    return Err(GameError::InvalidPlayoffPair {
                        match_id: pair.match_id,
                        reason: "a team cannot play itself".to_string(),
                    });
                }
            }

            for team_id in [&pair.home_team_id, &pair.away_team_id].into_iter().flatten() {
                if !tournament_queries::team_exists(&mut *tx, team_id).await? {
                    return Err(GameError::InvalidPlayoffPair {
                        match_id: pair.match_id,
                        reason: format!("unknown team {}", team_id),
                    });
                }
            }

            tournament_queries::update_match_teams(&mut *tx, &resolved).await?;
        }

        tx.commit().await?;
        tracing::info!("Assigned teams to {} playoff matches", request.pairs.len());

        Ok(request.pairs.len())
    }
}

fn resolve_pair(pair: &PlayoffPair, fixture: &TournamentMatch) -> PlayoffPair {
    PlayoffPair {
        match_id: pair.match_id,
        home_team_id: pair.home_team_id.clone().or_else(|| fixture.home_team_id.clone()),
        away_team_id: pair.away_team_id.clone().or_else(|| fixture.away_team_id.clone()),
    }
}

fn day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .unwrap_or(now);
    (start, start + Duration::days(1))
}

fn score_view(home_score: Option<i32>, away_score: Option<i32>, goal_scorer_id: Option<i32>) -> Option<ScoreView> {
    if home_score.is_none() && away_score.is_none() {
        return None;
    }
    Some(ScoreView {
        home_score,
        away_score,
        goal_scorer_id,
    })
}

/// Attach the caller's prediction, the real result, and once both are in,
/// the points earned.
fn match_view(rule: &ScoringRule, row: MatchPredictionRow) -> MatchWithPrediction {
    let prediction = score_view(row.predicted_home_score, row.predicted_away_score, row.predicted_goal_scorer_id);
    let result = score_view(row.result_home_score, row.result_away_score, row.result_goal_scorer_id);

    let predicted = row.predicted_outcome();
    let actual = row.actual_outcome();
    let points = (predicted.is_complete() && actual.is_complete())
        .then(|| rule.evaluate_breakdown(&predicted, &actual));

    MatchWithPrediction {
        tournament_match: row.tournament_match,
        prediction,
        result,
        points,
    }
}
