pub mod playoff_handler;
pub mod result_handler;
