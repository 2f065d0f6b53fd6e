use actix_web::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Match with id {0} not found")]
    MatchNotFound(i32),

    #[error("Group with id {0} not found")]
    GroupNotFound(String),

    #[error("Match has started, cannot change bets.")]
    MatchStarted,

    #[error("Teams have not yet been selected.")]
    TeamsNotSelected,

    #[error("No result selected.")]
    MissingScore,

    #[error("Scores cannot be negative.")]
    NegativeScore,

    #[error("No player selected.")]
    MissingGoalScorer,

    #[error("Player {0} does not play in this match.")]
    InvalidGoalScorer(i32),

    #[error("Invalid playoff pair for match {match_id}: {reason}")]
    InvalidPlayoffPair { match_id: i32, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl GameError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GameError::MatchNotFound(_) | GameError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            GameError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show to the caller. Database details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            GameError::Database(_) => "Database error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Reject negative scores and require both of them.
pub fn validate_scores(home_score: Option<i32>, away_score: Option<i32>) -> Result<(i32, i32), GameError> {
    match (home_score, away_score) {
        (Some(home), Some(away)) if home < 0 || away < 0 => Err(GameError::NegativeScore),
        (Some(home), Some(away)) => Ok((home, away)),
        _ => Err(GameError::MissingScore),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_scores() {
        assert_eq!(validate_scores(Some(2), Some(0)).unwrap(), (2, 0));
        assert!(matches!(validate_scores(Some(2), None), Err(GameError::MissingScore)));
        assert!(matches!(validate_scores(None, None), Err(GameError::MissingScore)));
        assert!(matches!(validate_scores(Some(-1), Some(0)), Err(GameError::NegativeScore)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(GameError::MatchNotFound(3).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(GameError::MatchStarted.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GameError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(GameError::Database(sqlx::Error::RowNotFound).public_message(), "Database error");
    }
}
