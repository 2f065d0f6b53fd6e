use serde::{Deserialize, Serialize};

use crate::scoring::outcome::MatchOutcome;
use crate::scoring::rules::ScoringRule;

/// Points one prediction earned for one match, split by component.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchPoints {
    pub score: u32,
    pub goal_scorer: u32,
}

impl MatchPoints {
    pub fn total(&self) -> u32 {
        self.score + self.goal_scorer
    }
}

impl ScoringRule {
    /// Compare a prediction with the real result of the same match.
    ///
    /// Nothing is awarded while either side is missing a score, and a missing
    /// goal scorer prediction never matches, even against a result without a
    /// scorer.
    pub fn evaluate_breakdown(&self, predicted: &MatchOutcome, actual: &MatchOutcome) -> MatchPoints {
        if predicted.match_id != actual.match_id {
            tracing::warn!(
                "Refusing to score prediction for match {} against result of match {}",
                predicted.match_id, actual.match_id
            );
            return MatchPoints::default();
        }

        let (Some(predicted_scores), Some(actual_scores)) = (predicted.scores(), actual.scores()) else {
            return MatchPoints::default();
        };

        let score = if predicted_scores == actual_scores {
            self.exact_score
        } else if predicted.result_type() == actual.result_type() {
            self.correct_result
        } else {
            0
        };

        let goal_scorer = match (predicted.goal_scorer_id, actual.goal_scorer_id) {
            (Some(predicted_scorer), Some(actual_scorer)) if predicted_scorer == actual_scorer => self.goal_scorer,
            _ => 0,
        };

        MatchPoints { score, goal_scorer }
    }
}

/// Points for one prediction under the standard 3/1/1 rule.
pub fn evaluate_match(predicted: &MatchOutcome, actual: &MatchOutcome) -> u32 {
    ScoringRule::default().evaluate_match(predicted, actual)
}
