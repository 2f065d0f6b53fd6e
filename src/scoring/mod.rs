//! Points and rankings for match predictions.
//!
//! Everything in here is pure: callers hand in fully materialised
//! predictions and results and get plain values back.

pub mod aggregator;
pub mod evaluator;
pub mod group_table;
pub mod outcome;
pub mod ranking;
pub mod rules;

pub use aggregator::{aggregate_stage, UserStageTally};
pub use evaluator::{evaluate_match, MatchPoints};
pub use group_table::{predicted_group_table, FixturePrediction, TeamTableRow};
pub use outcome::{classify, MatchOutcome, ResultType};
pub use ranking::{build_ranking, RankingEntry, UserRanking};
pub use rules::{RuleDescription, ScoringRule};
