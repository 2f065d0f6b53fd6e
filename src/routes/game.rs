// src/routes/game.rs
use actix_web::{get, put, web, HttpResponse, Result};

use crate::handlers::game::{match_handler, ranking_handler, stage_handler};
use crate::middleware::auth::Claims;
use crate::models::tournament::ScoreRequest;
use crate::scoring::ScoringRule;
use crate::services::{PredictionService, RankingService, TournamentService};

/// Point values of the game
#[get("/rules")]
async fn get_rules(rule: web::Data<ScoringRule>) -> Result<HttpResponse> {
    ranking_handler::get_rules(rule).await
}

/// Matches starting today, with the caller's predictions
#[get("/matches/today")]
async fn get_today_matches(
    tournament: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    match_handler::get_today_matches(tournament, claims).await
}

/// Match detail with both squads
#[get("/matches/{match_id}")]
async fn get_match(
    path: web::Path<i32>,
    tournament: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::get_match_detail(match_id, tournament, claims).await
}

/// Create or change a prediction until kick-off
#[put("/matches/{match_id}/prediction")]
async fn submit_prediction(
    path: web::Path<i32>,
    request: web::Json<ScoreRequest>,
    predictions: web::Data<PredictionService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::submit_prediction(match_id, request, predictions, claims).await
}

#[get("/group-stage")]
async fn get_group_stage(
    tournament: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    stage_handler::get_group_stage(tournament, claims).await
}

#[get("/group-stage/{group_id}")]
async fn get_group(
    path: web::Path<String>,
    tournament: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let group_id = path.into_inner();
    stage_handler::get_group_detail(group_id, tournament, claims).await
}

#[get("/playoff-stage")]
async fn get_playoff_stage(
    tournament: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    stage_handler::get_playoff_stage(tournament, claims).await
}

/// Leaderboard of all players
#[get("/ranking")]
async fn get_ranking(
    rankings: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    ranking_handler::get_ranking(rankings, claims).await
}

#[get("/ranking/me")]
async fn get_my_ranking(
    rankings: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    ranking_handler::get_my_ranking(rankings, claims).await
}
