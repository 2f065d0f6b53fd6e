use std::cmp::Ordering;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A match score with an optional goal scorer.
///
/// The same shape describes both a user's prediction and the real result an
/// admin entered. `None` scores mean the outcome has not been entered yet.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub match_id: i32,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub goal_scorer_id: Option<i32>,
}

impl MatchOutcome {
    pub fn new(match_id: i32, home_score: u32, away_score: u32, goal_scorer_id: Option<i32>) -> Self {
        Self {
            match_id,
            home_score: Some(home_score),
            away_score: Some(away_score),
            goal_scorer_id,
        }
    }

    /// An outcome with nothing entered yet.
    pub fn pending(match_id: i32) -> Self {
        Self {
            match_id,
            home_score: None,
            away_score: None,
            goal_scorer_id: None,
        }
    }

    /// Build an outcome from raw database columns. Negative scores cannot be
    /// scored and are treated as missing.
    pub fn from_columns(
        match_id: i32,
        home_score: Option<i32>,
        away_score: Option<i32>,
        goal_scorer_id: Option<i32>,
    ) -> Self {
        Self {
            match_id,
            home_score: home_score.and_then(|s| u32::try_from(s).ok()),
            away_score: away_score.and_then(|s| u32::try_from(s).ok()),
            goal_scorer_id,
        }
    }

    /// Both scores, if both have been entered.
    pub fn scores(&self) -> Option<(u32, u32)> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.scores().is_some()
    }

    pub fn result_type(&self) -> Option<ResultType> {
        self.scores().map(|(home, away)| classify(home, away))
    }
}

/// Who won a match, from the home side's point of view.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    Home,
    Away,
    Draw,
}

impl Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ResultType::Home => "HOME",
            ResultType::Away => "AWAY",
            ResultType::Draw => "DRAW",
        };
        write!(f, "{}", label)
    }
}

pub fn classify(home_score: u32, away_score: u32) -> ResultType {
    match home_score.cmp(&away_score) {
        Ordering::Greater => ResultType::Home,
        Ordering::Less => ResultType::Away,
        Ordering::Equal => ResultType::Draw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(2, 1), ResultType::Home);
        assert_eq!(classify(0, 3), ResultType::Away);
        assert_eq!(classify(1, 1), ResultType::Draw);
        assert_eq!(classify(0, 0), ResultType::Draw);
    }

    #[test]
    fn test_result_type_requires_both_scores() {
        let half_entered = MatchOutcome {
            match_id: 1,
            home_score: Some(2),
            away_score: None,
            goal_scorer_id: None,
        };
        assert_eq!(half_entered.result_type(), None);
        assert!(!half_entered.is_complete());
        assert_eq!(MatchOutcome::pending(1).result_type(), None);
        assert_eq!(MatchOutcome::new(1, 0, 2, None).result_type(), Some(ResultType::Away));
    }

    #[test]
    fn test_negative_columns_are_treated_as_missing() {
        let outcome = MatchOutcome::from_columns(4, Some(-1), Some(2), Some(9));
        assert_eq!(outcome.home_score, None);
        assert_eq!(outcome.away_score, Some(2));
        assert!(!outcome.is_complete());
    }
}
