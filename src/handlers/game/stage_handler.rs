use actix_web::{web, HttpResponse, Result};

use crate::db::helpers::game_error_response;
use crate::handlers::game::current_user_id;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::ok_or_return;
use crate::services::TournamentService;

pub async fn get_group_stage(
    tournament: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(current_user_id(&claims));

    match tournament.group_overview(user_id).await {
        Ok(groups) => Ok(HttpResponse::Ok().json(ApiResponse::success("Group stage retrieved", groups))),
        Err(e) => Ok(game_error_response(&e)),
    }
}

/// One group with its fixtures and the table the caller's predictions imply.
#[tracing::instrument(name = "Get group detail", skip(tournament, claims), fields(username = %claims.username))]
pub async fn get_group_detail(
    group_id: String,
    tournament: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(current_user_id(&claims));

    match tournament.group_detail(user_id, &group_id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success("Group retrieved", detail))),
        Err(e) => Ok(game_error_response(&e)),
    }
}

pub async fn get_playoff_stage(
    tournament: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(current_user_id(&claims));

    match tournament.playoff_overview(user_id).await {
        Ok(playoffs) => Ok(HttpResponse::Ok().json(ApiResponse::success("Playoff stage retrieved", playoffs))),
        Err(e) => Ok(game_error_response(&e)),
    }
}
