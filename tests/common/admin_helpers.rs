use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use crate::common::utils::{register_and_login, TestApp, UserRegLoginResponse};

/// Register the configured admin account and log it in.
pub async fn create_admin_user_and_login(app: &TestApp) -> UserRegLoginResponse {
    assert!(!app.admin_username.is_empty(), "spawn the app with a database to get an admin account");
    register_and_login(&app.address, &app.admin_username).await
}

/// A small tournament: one group of two teams, one playoff fixture.
pub struct SeededTournament {
    pub group_id: String,
    /// Group match a day in the future
    pub open_match_id: i32,
    /// Group match that kicked off an hour ago
    pub started_match_id: i32,
    /// Final without teams assigned
    pub final_match_id: i32,
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_player_id: i32,
    pub away_player_id: i32,
    pub bench_player_id: i32,
}

async fn insert_match(
    pool: &PgPool,
    stage: &str,
    group_id: Option<&str>,
    playoff_id: Option<&str>,
    teams: Option<(&str, &str)>,
    start_date: DateTime<Utc>,
) -> i32 {
    sqlx::query_scalar(
        r#"
        INSERT INTO matches (stage, group_id, playoff_id, home_team_id, away_team_id, stadium_id, start_date)
        VALUES ($1, $2, $3, $4, $5, 'lusail', $6)
        RETURNING id
        "#,
    )
    .bind(stage)
    .bind(group_id)
    .bind(playoff_id)
    .bind(teams.map(|t| t.0))
    .bind(teams.map(|t| t.1))
    .bind(start_date)
    .fetch_one(pool)
    .await
    .expect("Failed to insert match")
}

async fn insert_player(pool: &PgPool, name: &str, team_id: &str) -> i32 {
    sqlx::query_scalar("INSERT INTO players (name, team_id) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(team_id)
        .fetch_one(pool)
        .await
        .expect("Failed to insert player")
}

pub async fn seed_tournament(pool: &PgPool) -> SeededTournament {
    let statements = [
        "INSERT INTO stadiums (id, name) VALUES ('lusail', 'Lusail Iconic Stadium')",
        "INSERT INTO groups (id, name) VALUES ('group-c', 'Group C')",
        "INSERT INTO playoffs (id, name, position) VALUES ('final', 'Final', 1)",
        "INSERT INTO teams (id, name, flag, group_id) VALUES ('argentina', 'Argentina', 'ar', 'group-c')",
        "INSERT INTO teams (id, name, flag, group_id) VALUES ('mexico', 'Mexico', 'mx', 'group-c')",
        "INSERT INTO teams (id, name, flag, group_id) VALUES ('france', 'France', 'fr', NULL)",
    ];
    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .expect("Failed to seed tournament");
    }

    let now = Utc::now();
    let open_match_id = insert_match(
        pool,
        "group",
        Some("group-c"),
        None,
        Some(("argentina", "mexico")),
        now + Duration::days(1),
    )
    .await;
    let started_match_id = insert_match(
        pool,
        "group",
        Some("group-c"),
        None,
        Some(("mexico", "argentina")),
        now - Duration::hours(1),
    )
    .await;
    let final_match_id = insert_match(pool, "playoff", None, Some("final"), None, now + Duration::days(20)).await;

    SeededTournament {
        group_id: "group-c".to_string(),
        open_match_id,
        started_match_id,
        final_match_id,
        home_team_id: "argentina".to_string(),
        away_team_id: "mexico".to_string(),
        home_player_id: insert_player(pool, "Lionel Messi", "argentina").await,
        away_player_id: insert_player(pool, "Hirving Lozano", "mexico").await,
        bench_player_id: insert_player(pool, "Kylian Mbappe", "france").await,
    }
}
