use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use crate::models::tournament::{Stage, UserTeamRow};
use crate::scoring::{FixturePrediction, MatchOutcome, TeamTableRow};

/// A prediction joined with the real result of its match, if any.
#[derive(Debug, FromRow)]
pub struct ScoredPredictionRow {
    pub user_id: Uuid,
    pub match_id: i32,
    #[sqlx(try_from = "String")]
    pub stage: Stage,
    pub predicted_home_score: Option<i32>,
    pub predicted_away_score: Option<i32>,
    pub predicted_goal_scorer_id: Option<i32>,
    pub result_home_score: Option<i32>,
    pub result_away_score: Option<i32>,
    pub result_goal_scorer_id: Option<i32>,
}

impl ScoredPredictionRow {
    pub fn outcomes(&self) -> (MatchOutcome, MatchOutcome) {
        (
            MatchOutcome::from_columns(
                self.match_id,
                self.predicted_home_score,
                self.predicted_away_score,
                self.predicted_goal_scorer_id,
            ),
            MatchOutcome::from_columns(
                self.match_id,
                self.result_home_score,
                self.result_away_score,
                self.result_goal_scorer_id,
            ),
        )
    }
}

#[derive(Debug, FromRow)]
struct GroupFixtureRow {
    home_team_id: Option<String>,
    away_team_id: Option<String>,
    home_score: Option<i32>,
    away_score: Option<i32>,
}

pub async fn upsert_prediction<'e, E>(
    executor: E,
    user_id: Uuid,
    match_id: i32,
    home_score: i32,
    away_score: i32,
    goal_scorer_id: Option<i32>,
) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO user_matches (user_id, match_id, home_score, away_score, goal_scorer_id, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        ON CONFLICT (user_id, match_id) DO UPDATE SET
            home_score = EXCLUDED.home_score,
            away_score = EXCLUDED.away_score,
            goal_scorer_id = EXCLUDED.goal_scorer_id,
            updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(match_id)
    .bind(home_score)
    .bind(away_score)
    .bind(goal_scorer_id)
    .execute(executor)
    .await?;

    Ok(())
}

/// Every fixture of a group with the user's predicted score. Fixtures the
/// user has not predicted come back without scores.
pub async fn fetch_group_fixture_predictions<'e, E>(
    executor: E,
    user_id: Uuid,
    group_id: &str,
) -> Result<Vec<FixturePrediction>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, GroupFixtureRow>(
        r#"
        SELECT m.home_team_id, m.away_team_id, um.home_score, um.away_score
        FROM matches m
        LEFT JOIN user_matches um ON um.match_id = m.id AND um.user_id = $1
        WHERE m.group_id = $2
        ORDER BY m.start_date ASC, m.id ASC
        "#,
    )
    .bind(user_id)
    .bind(group_id)
    .fetch_all(executor)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let home_team_id = row.home_team_id?;
            let away_team_id = row.away_team_id?;
            Some(FixturePrediction {
                home_team_id,
                away_team_id,
                home_score: row.home_score.and_then(|s| u32::try_from(s).ok()),
                away_score: row.away_score.and_then(|s| u32::try_from(s).ok()),
            })
        })
        .collect())
}

pub async fn upsert_user_team<'e, E>(executor: E, user_id: Uuid, row: &TeamTableRow) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO user_teams
            (user_id, team_id, played, wins, draws, losses, goals_for, goals_against, goal_difference, points)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (user_id, team_id) DO UPDATE SET
            played = EXCLUDED.played,
            wins = EXCLUDED.wins,
            draws = EXCLUDED.draws,
            losses = EXCLUDED.losses,
            goals_for = EXCLUDED.goals_for,
            goals_against = EXCLUDED.goals_against,
            goal_difference = EXCLUDED.goal_difference,
            points = EXCLUDED.points
        "#,
    )
    .bind(user_id)
    .bind(&row.team_id)
    .bind(row.played)
    .bind(row.wins)
    .bind(row.draws)
    .bind(row.losses)
    .bind(row.goals_for)
    .bind(row.goals_against)
    .bind(row.goal_difference)
    .bind(row.points)
    .execute(executor)
    .await?;

    Ok(())
}

/// A user's stored predicted table for one group, in table order.
pub async fn fetch_user_teams<'e, E>(executor: E, user_id: Uuid, group_id: &str) -> Result<Vec<UserTeamRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, UserTeamRow>(
        r#"
        SELECT
            t.id AS team_id,
            COALESCE(ut.played, 0) AS played,
            COALESCE(ut.wins, 0) AS wins,
            COALESCE(ut.draws, 0) AS draws,
            COALESCE(ut.losses, 0) AS losses,
            COALESCE(ut.goals_for, 0) AS goals_for,
            COALESCE(ut.goals_against, 0) AS goals_against,
            COALESCE(ut.goal_difference, 0) AS goal_difference,
            COALESCE(ut.points, 0) AS points
        FROM teams t
        LEFT JOIN user_teams ut ON ut.team_id = t.id AND ut.user_id = $1
        WHERE t.group_id = $2
        ORDER BY points DESC, goal_difference DESC, goals_for DESC, team_id ASC
        "#,
    )
    .bind(user_id)
    .bind(group_id)
    .fetch_all(executor)
    .await
}

/// All predictions of all users, each with the result of its match.
pub async fn fetch_scored_predictions<'e, E>(executor: E) -> Result<Vec<ScoredPredictionRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, ScoredPredictionRow>(
        r#"
        SELECT
            um.user_id,
            um.match_id,
            m.stage,
            um.home_score AS predicted_home_score,
            um.away_score AS predicted_away_score,
            um.goal_scorer_id AS predicted_goal_scorer_id,
            tm.home_score AS result_home_score,
            tm.away_score AS result_away_score,
            tm.goal_scorer_id AS result_goal_scorer_id
        FROM user_matches um
        JOIN matches m ON m.id = um.match_id
        LEFT JOIN tournament_matches tm ON tm.match_id = um.match_id
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn count_results<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM tournament_matches WHERE home_score IS NOT NULL AND away_score IS NOT NULL",
    )
    .fetch_one(executor)
    .await
}
