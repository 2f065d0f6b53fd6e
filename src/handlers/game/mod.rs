use actix_web::HttpResponse;
use uuid::Uuid;

use crate::db::helpers::DbResult;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;

pub mod match_handler;
pub mod ranking_handler;
pub mod stage_handler;

/// Id of the caller. The guard already rejects tokens with a malformed subject.
pub(crate) fn current_user_id(claims: &Claims) -> DbResult<Uuid> {
    claims.user_id().ok_or_else(|| {
        tracing::warn!("Token of {} carries an invalid subject", claims.username);
        HttpResponse::Unauthorized().json(ApiResponse::<()>::error("Invalid user id in token"))
    })
}
