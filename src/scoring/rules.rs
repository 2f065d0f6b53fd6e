use serde::{Deserialize, Serialize};

use crate::scoring::outcome::MatchOutcome;

pub const EXACT_SCORE_POINTS: u32 = 3;
pub const CORRECT_RESULT_POINTS: u32 = 1;
pub const GOAL_SCORER_POINTS: u32 = 1;

/// Point values awarded when a prediction is compared with the real result.
///
/// Loaded from the `scoring` section of the configuration; every field falls
/// back to the standard 3/1/1 values when omitted.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRule {
    /// Home and away score both predicted exactly.
    #[serde(default = "default_exact_score")]
    pub exact_score: u32,
    /// Winner (or draw) predicted correctly, score not exact.
    #[serde(default = "default_correct_result")]
    pub correct_result: u32,
    /// Goal scorer predicted correctly. Stacks with either score component.
    #[serde(default = "default_goal_scorer")]
    pub goal_scorer: u32,
}

fn default_exact_score() -> u32 {
    EXACT_SCORE_POINTS
}

fn default_correct_result() -> u32 {
    CORRECT_RESULT_POINTS
}

fn default_goal_scorer() -> u32 {
    GOAL_SCORER_POINTS
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self {
            exact_score: EXACT_SCORE_POINTS,
            correct_result: CORRECT_RESULT_POINTS,
            goal_scorer: GOAL_SCORER_POINTS,
        }
    }
}

impl ScoringRule {
    /// Upper bound of points a single prediction can earn.
    pub fn max_points_per_match(&self) -> u32 {
        self.exact_score.max(self.correct_result) + self.goal_scorer
    }

    /// Human readable rule list, in the order the game explains it.
    pub fn describe(&self) -> Vec<RuleDescription> {
        vec![
            RuleDescription {
                label: "Predicting the result".to_string(),
                points: self.exact_score,
            },
            RuleDescription {
                label: "Predicting the winner".to_string(),
                points: self.correct_result,
            },
            RuleDescription {
                label: "Predicting the goal scorer".to_string(),
                points: self.goal_scorer,
            },
        ]
    }

    pub fn evaluate_match(&self, predicted: &MatchOutcome, actual: &MatchOutcome) -> u32 {
        self.evaluate_breakdown(predicted, actual).total()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RuleDescription {
    pub label: String,
    pub points: u32,
}
