use actix_web::{web, HttpResponse, Result};
use chrono::Utc;

use crate::db::helpers::game_error_response;
use crate::handlers::game::current_user_id;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::tournament::ScoreRequest;
use crate::ok_or_return;
use crate::services::{PredictionService, TournamentService};

#[tracing::instrument(name = "Get today's matches", skip(tournament, claims), fields(username = %claims.username))]
pub async fn get_today_matches(
    tournament: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(current_user_id(&claims));

    match tournament.today_matches(user_id, Utc::now()).await {
        Ok(matches) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("{} matches today", matches.len()),
            matches,
        ))),
        Err(e) => Ok(game_error_response(&e)),
    }
}

#[tracing::instrument(name = "Get match detail", skip(tournament, claims), fields(username = %claims.username))]
pub async fn get_match_detail(
    match_id: i32,
    tournament: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(current_user_id(&claims));

    match tournament.match_detail(user_id, match_id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success("Match retrieved", detail))),
        Err(e) => Ok(game_error_response(&e)),
    }
}

#[tracing::instrument(
    name = "Submit prediction",
    skip(request, predictions, claims),
    fields(
        username = %claims.username,
        home_score = ?request.home_score,
        away_score = ?request.away_score
    )
)]
pub async fn submit_prediction(
    match_id: i32,
    request: web::Json<ScoreRequest>,
    predictions: web::Data<PredictionService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(current_user_id(&claims));

    match predictions.submit_prediction(user_id, match_id, &request, Utc::now()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Prediction saved"))),
        Err(e) => Ok(game_error_response(&e)),
    }
}
