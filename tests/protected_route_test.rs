use reqwest::{Client, Method};
use serde_json::Value;

mod common;
use common::utils::{make_authenticated_request, spawn_app, token_for};
use score_challenge_backend::models::user::{UserRole, UserStatus};

#[tokio::test]
async fn game_routes_require_a_token() {
    let test_app = spawn_app().await;
    let client = Client::new();

    for path in ["/game/rules", "/game/ranking", "/game/matches/today", "/game/group-stage"] {
        let response = client
            .get(&format!("{}{}", &test_app.address, path))
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(401, response.status().as_u16(), "Expected 401 for {}", path);
    }
}

#[tokio::test]
async fn game_routes_reject_a_forged_token() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let response = make_authenticated_request(
        &client,
        Method::GET,
        &format!("{}/game/rules", &test_app.address),
        "not.a.token",
        None,
    )
    .await;
    assert_eq!(401, response.status().as_u16());

    let response = client
        .get(&format!("{}/game/rules", &test_app.address))
        .header("Authorization", "Token abc")
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn game_rules_list_the_point_values() {
    let test_app = spawn_app().await;
    let token = token_for(&test_app, "viewer", UserRole::User, UserStatus::Active);

    let response = make_authenticated_request(
        &Client::new(),
        Method::GET,
        &format!("{}/game/rules", &test_app.address),
        &token,
        None,
    )
    .await;
    assert_eq!(200, response.status().as_u16());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["max_points_per_match"], 4);

    let rules = body["data"]["rules"].as_array().expect("rules should be a list");
    let points: Vec<u64> = rules.iter().filter_map(|r| r["points"].as_u64()).collect();
    assert_eq!(points, vec![3, 1, 1]);
    assert_eq!(rules[0]["label"], "Predicting the result");
    assert_eq!(rules[2]["label"], "Predicting the goal scorer");
}

#[tokio::test]
async fn admin_routes_forbid_regular_users() {
    let test_app = spawn_app().await;
    let token = token_for(&test_app, "regular", UserRole::User, UserStatus::Active);
    let client = Client::new();

    let response = make_authenticated_request(
        &client,
        Method::GET,
        &format!("{}/admin/matches", &test_app.address),
        &token,
        None,
    )
    .await;
    assert_eq!(403, response.status().as_u16());

    let response = make_authenticated_request(
        &client,
        Method::POST,
        &format!("{}/admin/rankings/recalculate", &test_app.address),
        &token,
        None,
    )
    .await;
    assert_eq!(403, response.status().as_u16());
}

#[tokio::test]
async fn admin_routes_reject_inactive_admins_and_missing_tokens() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/admin/matches", &test_app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(401, response.status().as_u16());

    let token = token_for(&test_app, "retired", UserRole::Admin, UserStatus::Inactive);
    let response = make_authenticated_request(
        &client,
        Method::GET,
        &format!("{}/admin/playoff-pairs", &test_app.address),
        &token,
        None,
    )
    .await;
    assert_eq!(401, response.status().as_u16());
}
