pub mod common;
pub mod ranking;
pub mod tournament;
pub mod user;
