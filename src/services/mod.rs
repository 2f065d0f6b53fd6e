pub mod game_error;
pub mod prediction_service;
pub mod ranking_service;
pub mod result_service;
pub mod tournament_service;

pub use game_error::GameError;
pub use prediction_service::PredictionService;
pub use ranking_service::RankingService;
pub use result_service::ResultService;
pub use tournament_service::TournamentService;
