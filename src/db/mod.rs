pub mod helpers;
pub mod prediction_queries;
pub mod ranking_queries;
pub mod tournament_queries;
