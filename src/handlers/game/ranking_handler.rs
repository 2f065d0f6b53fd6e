use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::db::helpers::{db_result, require_record};
use crate::handlers::game::current_user_id;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::ok_or_return;
use crate::scoring::{RuleDescription, ScoringRule};
use crate::services::RankingService;

#[derive(Debug, Serialize)]
pub struct GameRulesResponse {
    pub rules: Vec<RuleDescription>,
    pub max_points_per_match: u32,
}

/// Point values of the running game.
pub async fn get_rules(rule: web::Data<ScoringRule>) -> Result<HttpResponse> {
    let response = GameRulesResponse {
        rules: rule.describe(),
        max_points_per_match: rule.max_points_per_match(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success("Game rules", response)))
}

#[tracing::instrument(name = "Get ranking", skip(rankings, claims), fields(username = %claims.username))]
pub async fn get_ranking(
    rankings: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(current_user_id(&claims));
    let leaderboard = ok_or_return!(db_result(rankings.get_ranking(user_id).await));

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("{} players ranked", leaderboard.len()),
        leaderboard,
    )))
}

pub async fn get_my_ranking(
    rankings: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(current_user_id(&claims));
    let ranking = ok_or_return!(require_record(
        rankings.get_user_ranking(user_id).await,
        "User not found"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Ranking retrieved", ranking)))
}
