//! Turn database and game errors into HTTP responses.
//!
//! Handlers returning `Result<HttpResponse>` unwrap with [`ok_or_return!`]:
//! ```ignore
//! let group = ok_or_return!(require_record(fetch_group(pool, &id).await, "Group not found"));
//! ```

use actix_web::{HttpResponse, HttpResponseBuilder};

use crate::models::common::ApiResponse;
use crate::services::GameError;

/// Return `Ok(response)` from the enclosing handler when `$expr` is an error.
#[macro_export]
macro_rules! ok_or_return {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(response) => return Ok(response),
        }
    };
}

/// Result type for lookups that already carry the error response
pub type DbResult<T> = Result<T, HttpResponse>;

fn database_error(e: &sqlx::Error) -> HttpResponse {
    tracing::error!("Database error: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Database error"))
}

/// Unwrap an optional record, answering 404 with `not_found_message` if missing.
pub fn require_record<T>(result: Result<Option<T>, sqlx::Error>, not_found_message: &str) -> DbResult<T> {
    match result {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::<()>::error(not_found_message))),
        Err(e) => Err(database_error(&e)),
    }
}

/// Answer 409 with `conflict_message` if the record already exists.
pub fn ensure_not_exists<T>(result: Result<Option<T>, sqlx::Error>, conflict_message: &str) -> DbResult<()> {
    match result {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::<()>::error(conflict_message))),
        Ok(None) => Ok(()),
        Err(e) => Err(database_error(&e)),
    }
}

pub fn db_result<T>(result: Result<T, sqlx::Error>) -> DbResult<T> {
    result.map_err(|e| database_error(&e))
}

/// Map a service error onto its status code and the standard envelope.
pub fn game_error_response(error: &GameError) -> HttpResponse {
    match error {
        GameError::Database(e) => database_error(e),
        other => {
            tracing::info!("Rejected game request: {}", other);
            HttpResponseBuilder::new(other.status_code()).json(ApiResponse::<()>::error(other.public_message()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_require_record() {
        assert_eq!(require_record(Ok(Some(5)), "missing").ok(), Some(5));

        let not_found = require_record::<i32>(Ok(None), "missing").unwrap_err();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let failed = require_record::<i32>(Err(sqlx::Error::RowNotFound), "missing").unwrap_err();
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_ensure_not_exists() {
        assert!(ensure_not_exists::<i32>(Ok(None), "taken").is_ok());
        let conflict = ensure_not_exists(Ok(Some("alice")), "taken").unwrap_err();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_game_error_response_status() {
        assert_eq!(game_error_response(&GameError::MatchStarted).status(), StatusCode::BAD_REQUEST);
        assert_eq!(game_error_response(&GameError::MatchNotFound(9)).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            game_error_response(&GameError::Database(sqlx::Error::PoolTimedOut)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
