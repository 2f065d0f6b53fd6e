use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::tournament::{
    Group, MatchPredictionRow, MatchResultRow, Player, PlayoffPair, Playoff, Stage, Team, TournamentMatch,
};

/// Columns of `TournamentMatch`, aliased for `FromRow`.
const MATCH_COLUMNS: &str = r#"
    m.id,
    m.stage,
    m.group_id,
    m.playoff_id,
    m.home_team_id,
    home_team.name AS home_team_name,
    m.away_team_id,
    away_team.name AS away_team_name,
    s.name AS stadium_name,
    m.start_date
"#;

const MATCH_JOINS: &str = r#"
    FROM matches m
    JOIN stadiums s ON s.id = m.stadium_id
    LEFT JOIN teams home_team ON home_team.id = m.home_team_id
    LEFT JOIN teams away_team ON away_team.id = m.away_team_id
"#;

/// Match columns plus the real result and the prediction of user `$1`.
fn match_with_prediction_query(filter: &str) -> String {
    format!(
        r#"
        SELECT {MATCH_COLUMNS},
            tm.home_score AS result_home_score,
            tm.away_score AS result_away_score,
            tm.goal_scorer_id AS result_goal_scorer_id,
            um.home_score AS predicted_home_score,
            um.away_score AS predicted_away_score,
            um.goal_scorer_id AS predicted_goal_scorer_id
        {MATCH_JOINS}
        LEFT JOIN tournament_matches tm ON tm.match_id = m.id
        LEFT JOIN user_matches um ON um.match_id = m.id AND um.user_id = $1
        WHERE {filter}
        ORDER BY m.start_date ASC, m.id ASC
        "#
    )
}

pub async fn fetch_match<'e, E>(executor: E, match_id: i32) -> Result<Option<TournamentMatch>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!("SELECT {MATCH_COLUMNS} {MATCH_JOINS} WHERE m.id = $1");
    sqlx::query_as::<_, TournamentMatch>(&query)
        .bind(match_id)
        .fetch_optional(executor)
        .await
}

/// Matches starting within `[from, to)`, with the user's predictions.
pub async fn fetch_matches_between(
    pool: &PgPool,
    user_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<MatchPredictionRow>, sqlx::Error> {
    let query = match_with_prediction_query("m.start_date >= $2 AND m.start_date < $3");
    sqlx::query_as::<_, MatchPredictionRow>(&query)
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
}

pub async fn fetch_group_matches(
    pool: &PgPool,
    user_id: Uuid,
    group_id: &str,
) -> Result<Vec<MatchPredictionRow>, sqlx::Error> {
    let query = match_with_prediction_query("m.group_id = $2");
    sqlx::query_as::<_, MatchPredictionRow>(&query)
        .bind(user_id)
        .bind(group_id)
        .fetch_all(pool)
        .await
}

pub async fn fetch_stage_matches(
    pool: &PgPool,
    user_id: Uuid,
    stage: Stage,
) -> Result<Vec<MatchPredictionRow>, sqlx::Error> {
    let query = match_with_prediction_query("m.stage = $2");
    sqlx::query_as::<_, MatchPredictionRow>(&query)
        .bind(user_id)
        .bind(stage.to_string())
        .fetch_all(pool)
        .await
}

pub async fn fetch_match_with_prediction(
    pool: &PgPool,
    user_id: Uuid,
    match_id: i32,
) -> Result<Option<MatchPredictionRow>, sqlx::Error> {
    let query = match_with_prediction_query("m.id = $2");
    sqlx::query_as::<_, MatchPredictionRow>(&query)
        .bind(user_id)
        .bind(match_id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_groups(pool: &PgPool) -> Result<Vec<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>("SELECT id, name FROM groups ORDER BY name ASC")
        .fetch_all(pool)
        .await
}

pub async fn fetch_group(pool: &PgPool, group_id: &str) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>("SELECT id, name FROM groups WHERE id = $1")
        .bind(group_id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_playoffs(pool: &PgPool) -> Result<Vec<Playoff>, sqlx::Error> {
    sqlx::query_as::<_, Playoff>("SELECT id, name, position FROM playoffs ORDER BY position ASC, name ASC")
        .fetch_all(pool)
        .await
}

pub async fn fetch_teams(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>("SELECT id, name, flag, group_id FROM teams ORDER BY name ASC")
        .fetch_all(pool)
        .await
}

pub async fn fetch_players_for_teams(pool: &PgPool, team_ids: &[String]) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"
        SELECT id, name, team_id
        FROM players
        WHERE team_id = ANY($1)
        ORDER BY team_id ASC, name ASC
        "#,
    )
    .bind(team_ids)
    .fetch_all(pool)
    .await
}

/// Whether `player_id` plays for one of the two given teams.
pub async fn player_plays_for<'e, E>(
    executor: E,
    player_id: i32,
    home_team_id: &str,
    away_team_id: &str,
) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let found: Option<i32> = sqlx::query_scalar(
        "SELECT id FROM players WHERE id = $1 AND team_id IN ($2, $3)",
    )
    .bind(player_id)
    .bind(home_team_id)
    .bind(away_team_id)
    .fetch_optional(executor)
    .await?;

    Ok(found.is_some())
}

pub async fn team_exists<'e, E>(executor: E, team_id: &str) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let found: Option<String> = sqlx::query_scalar("SELECT id FROM teams WHERE id = $1")
        .bind(team_id)
        .fetch_optional(executor)
        .await?;

    Ok(found.is_some())
}

pub async fn update_match_teams<'e, E>(executor: E, pair: &PlayoffPair) -> Result<u64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE matches
        SET home_team_id = $2, away_team_id = $3
        WHERE id = $1 AND stage = 'playoff'
        "#,
    )
    .bind(pair.match_id)
    .bind(pair.home_team_id.as_deref())
    .bind(pair.away_team_id.as_deref())
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

pub async fn fetch_results(pool: &PgPool) -> Result<Vec<MatchResultRow>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {MATCH_COLUMNS},
            tm.home_score,
            tm.away_score,
            tm.goal_scorer_id,
            p.name AS goal_scorer_name
        {MATCH_JOINS}
        LEFT JOIN tournament_matches tm ON tm.match_id = m.id
        LEFT JOIN players p ON p.id = tm.goal_scorer_id
        ORDER BY m.start_date ASC, m.id ASC
        "#
    );
    sqlx::query_as::<_, MatchResultRow>(&query)
        .fetch_all(pool)
        .await
}

pub async fn upsert_result<'e, E>(
    executor: E,
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
        INSERT INTO tournament_matches (match_id, home_score, away_score, goal_scorer_id, updated_at)
        VALUES ($1, $2, $3, $4, NOW())
        ON CONFLICT (match_id) DO UPDATE SET
            home_score = EXCLUDED.home_score,
            away_score = EXCLUDED.away_score,
            goal_scorer_id = EXCLUDED.goal_scorer_id,
            updated_at = NOW()
        "#,
    )
    .bind(match_id)
    .bind(home_score)
    .bind(away_score)
    .bind(goal_scorer_id)
    .execute(executor)
    .await?;

    Ok(())
}
