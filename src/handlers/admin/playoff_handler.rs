use actix_web::{web, HttpResponse, Result};
use serde_json::json;

use crate::db::helpers::game_error_response;
use crate::models::common::ApiResponse;
use crate::models::tournament::PlayoffPairsRequest;
use crate::services::TournamentService;

/// GET /admin/playoff-pairs - playoff fixtures and the teams to pick from
pub async fn get_playoff_pairs(tournament: web::Data<TournamentService>) -> Result<HttpResponse> {
    match tournament.playoff_pairs().await {
        Ok(pairs) => Ok(HttpResponse::Ok().json(ApiResponse::success("Playoff pairs retrieved", pairs))),
        Err(e) => Ok(game_error_response(&e)),
    }
}

/// PUT /admin/playoff-pairs - assign teams to playoff fixtures
#[tracing::instrument(name = "Assign playoff pairs", skip(body, tournament), fields(pairs = body.pairs.len()))]
pub async fn assign_playoff_pairs(
    body: web::Json<PlayoffPairsRequest>,
    tournament: web::Data<TournamentService>,
) -> Result<HttpResponse> {
    if body.pairs.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error("No playoff pairs given")));
    }

    match tournament.assign_playoff_pairs(&body).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Playoff pairs saved",
            json!({ "updated_matches": updated }),
        ))),
        Err(e) => Ok(game_error_response(&e)),
    }
}
