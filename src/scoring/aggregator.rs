use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::tournament::Stage;
use crate::scoring::outcome::MatchOutcome;
use crate::scoring::rules::ScoringRule;

/// Points one user collected within one stage.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserStageTally {
    pub user_id: Uuid,
    pub stage: Stage,
    pub points: u32,
}

impl ScoringRule {
    /// Sum the points of `(predicted, actual)` pairs. Pairs whose result has
    /// not been entered contribute nothing.
    pub fn aggregate_stage(&self, pairs: &[(MatchOutcome, MatchOutcome)]) -> u32 {
        pairs
            .iter()
            .map(|(predicted, actual)| self.evaluate_match(predicted, actual))
            .sum()
    }

    pub fn tally_stage(
        &self,
        user_id: Uuid,
        stage: Stage,
        pairs: &[(MatchOutcome, MatchOutcome)],
    ) -> UserStageTally {
        UserStageTally {
            user_id,
            stage,
            points: self.aggregate_stage(pairs),
        }
    }
}

pub fn aggregate_stage(pairs: &[(MatchOutcome, MatchOutcome)]) -> u32 {
    ScoringRule::default().aggregate_stage(pairs)
}
