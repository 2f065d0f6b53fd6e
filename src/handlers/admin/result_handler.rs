use actix_web::{web, HttpResponse, Result};
use serde::Serialize;
use tracing::{error, info};

use crate::db::helpers::game_error_response;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::ranking::RecalculationSummary;
use crate::models::tournament::ScoreRequest;
use crate::services::{RankingService, ResultService};

#[derive(Debug, Serialize)]
pub struct SubmitResultResponse {
    pub match_id: i32,
    pub rankings: RecalculationSummary,
}

/// GET /admin/matches - every fixture with its result, if entered
pub async fn get_matches(results: web::Data<ResultService>) -> Result<HttpResponse> {
    match results.list_results().await {
        Ok(matches) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("{} matches", matches.len()),
            matches,
        ))),
        Err(e) => Ok(game_error_response(&e)),
    }
}

/// PUT /admin/matches/{match_id}/result - store a result and refresh the leaderboard
#[tracing::instrument(
    name = "Submit match result",
    skip(body, results, claims),
    fields(admin = %claims.username, match_id = %match_id)
)]
pub async fn submit_result(
    match_id: web::Path<i32>,
    body: web::Json<ScoreRequest>,
    results: web::Data<ResultService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = match_id.into_inner();

    match results.submit_result(match_id, &body).await {
        Ok(rankings) => {
            info!("Admin {} entered the result of match {}", claims.username, match_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                "Result saved",
                SubmitResultResponse { match_id, rankings },
            )))
        }
        Err(e) => Ok(game_error_response(&e)),
    }
}

/// POST /admin/rankings/recalculate - rebuild the leaderboard from stored data
pub async fn recalculate_rankings(rankings: web::Data<RankingService>) -> Result<HttpResponse> {
    match rankings.recalculate_rankings().await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success("Rankings recalculated", summary))),
        Err(e) => {
            error!("Failed to recalculate rankings: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Failed to recalculate rankings")))
        }
    }
}
