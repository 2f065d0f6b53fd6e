use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::ranking::UserRankingRow;
use crate::scoring::UserRanking;

#[derive(Debug, FromRow)]
pub struct RankedUser {
    pub id: Uuid,
    pub username: String,
}

/// Every registered user, the population of the leaderboard.
pub async fn fetch_users<'e, E>(executor: E) -> Result<Vec<RankedUser>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, RankedUser>("SELECT id, username FROM users")
        .fetch_all(executor)
        .await
}

pub async fn upsert_ranking<'e, E>(executor: E, ranking: &UserRanking) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO user_rankings (user_id, group_points, playoff_points, total_points, position, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        ON CONFLICT (user_id) DO UPDATE SET
            group_points = EXCLUDED.group_points,
            playoff_points = EXCLUDED.playoff_points,
            total_points = EXCLUDED.total_points,
            position = EXCLUDED.position,
            updated_at = NOW()
        "#,
    )
    .bind(ranking.user_id)
    .bind(ranking.group_points as i32)
    .bind(ranking.playoff_points as i32)
    .bind(ranking.total_points as i32)
    .bind(ranking.rank as i32)
    .execute(executor)
    .await?;

    Ok(())
}

const LEADERBOARD_QUERY: &str = r#"
    SELECT
        u.id AS user_id,
        u.username,
        COALESCE(r.group_points, 0) AS group_points,
        COALESCE(r.playoff_points, 0) AS playoff_points,
        COALESCE(r.total_points, 0) AS total_points,
        r.position,
        r.updated_at
    FROM users u
    LEFT JOIN user_rankings r ON r.user_id = u.id
"#;

pub async fn fetch_leaderboard(pool: &PgPool) -> Result<Vec<UserRankingRow>, sqlx::Error> {
    let query = format!(
        "{LEADERBOARD_QUERY} ORDER BY total_points DESC, u.username ASC, u.id ASC"
    );
    sqlx::query_as::<_, UserRankingRow>(&query)
        .fetch_all(pool)
        .await
}

pub async fn fetch_user_ranking(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRankingRow>, sqlx::Error> {
    let query = format!("{LEADERBOARD_QUERY} WHERE u.id = $1");
    sqlx::query_as::<_, UserRankingRow>(&query)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
