use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::prediction_queries::{self, ScoredPredictionRow};
use crate::db::ranking_queries::{self, RankedUser};
use crate::models::ranking::{LeaderboardEntry, RecalculationSummary, UserRankingRow};
use crate::models::tournament::Stage;
use crate::scoring::{build_ranking, MatchOutcome, RankingEntry, ScoringRule, UserRanking};

/// Service responsible for the leaderboard
#[derive(Debug, Clone)]
pub struct RankingService {
    pool: PgPool,
    rule: ScoringRule,
}

impl RankingService {
    pub fn new(pool: PgPool, rule: ScoringRule) -> Self {
        Self { pool, rule }
    }

    /// Recompute every user's points from scratch and store the new positions.
    pub async fn recalculate_rankings(&self) -> Result<RecalculationSummary, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let summary = self.recalculate_in_tx(&mut tx).await?;
        tx.commit().await?;
        Ok(summary)
    }

    /// Same as [`recalculate_rankings`](Self::recalculate_rankings) but inside
    /// the caller's transaction, so a result and the rankings it changes are
    /// committed together.
    pub async fn recalculate_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<RecalculationSummary, sqlx::Error> {
        let users = ranking_queries::fetch_users(&mut **tx).await?;
        let predictions = prediction_queries::fetch_scored_predictions(&mut **tx).await?;
        let results_available = prediction_queries::count_results(&mut **tx).await?;

        let rankings = rank_users(&self.rule, users, &predictions);
        for ranking in &rankings {
            ranking_queries::upsert_ranking(&mut **tx, ranking).await?;
        }

        let summary = RecalculationSummary {
            users_ranked: rankings.len(),
            predictions_scored: predictions
                .iter()
                .filter(|p| p.outcomes().1.is_complete())
                .count(),
            results_available: results_available.max(0) as usize,
        };

        tracing::info!(
            "Recalculated rankings: {} users, {} scored predictions, {} results",
            summary.users_ranked,
            summary.predictions_scored,
            summary.results_available
        );

        Ok(summary)
    }

    /// Leaderboard with the caller's own row marked.
    pub async fn get_ranking(&self, current_user: Uuid) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        let rows = ranking_queries::fetch_leaderboard(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|ranking| LeaderboardEntry {
                is_logged_in_user: ranking.user_id == current_user,
                ranking,
            })
            .collect())
    }

    pub async fn get_user_ranking(&self, user_id: Uuid) -> Result<Option<UserRankingRow>, sqlx::Error> {
        ranking_queries::fetch_user_ranking(&self.pool, user_id).await
    }
}

/// Score every user's predictions per stage and rank them. Users without
/// predictions still appear with zero points.
fn rank_users(rule: &ScoringRule, users: Vec<RankedUser>, predictions: &[ScoredPredictionRow]) -> Vec<UserRanking> {
    let mut pairs: HashMap<(Uuid, Stage), Vec<(MatchOutcome, MatchOutcome)>> = HashMap::new();
    for prediction in predictions {
        pairs
            .entry((prediction.user_id, prediction.stage))
            .or_default()
            .push(prediction.outcomes());
    }

    let stage_points = |user_id: Uuid, stage: Stage| -> u32 {
        pairs
            .get(&(user_id, stage))
            .map(|stage_pairs| rule.tally_stage(user_id, stage, stage_pairs).points)
            .unwrap_or(0)
    };

    let entries: Vec<RankingEntry> = users
        .into_iter()
        .map(|user| RankingEntry {
            user_id: user.id,
            group_points: stage_points(user.id, Stage::Group),
            playoff_points: stage_points(user.id, Stage::Playoff),
            username: user.username,
        })
        .collect();

    build_ranking(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> RankedUser {
        RankedUser {
            id: Uuid::new_v4(),
            username: name.to_string(),
        }
    }

    fn prediction(
        user_id: Uuid,
        match_id: i32,
        stage: Stage,
        predicted: (i32, i32, Option<i32>),
        result: Option<(i32, i32, Option<i32>)>,
    ) -> ScoredPredictionRow {
        ScoredPredictionRow {
            user_id,
            match_id,
            stage,
            predicted_home_score: Some(predicted.0),
            predicted_away_score: Some(predicted.1),
            predicted_goal_scorer_id: predicted.2,
            result_home_score: result.map(|r| r.0),
            result_away_score: result.map(|r| r.1),
            result_goal_scorer_id: result.and_then(|r| r.2),
        }
    }

    #[test]
    fn test_rank_users_splits_stages() {
        let alice = user("alice");
        let bob = user("bob");
        let carol = user("carol");
        let (alice_id, bob_id, carol_id) = (alice.id, bob.id, carol.id);

        let predictions = vec![
            // alice: exact + scorer in the group stage, winner in the playoffs
            prediction(alice_id, 1, Stage::Group, (2, 1, Some(7)), Some((2, 1, Some(7)))),
            prediction(alice_id, 10, Stage::Playoff, (1, 0, None), Some((3, 1, None))),
            // bob: exact score only
            prediction(bob_id, 1, Stage::Group, (2, 1, Some(8)), Some((2, 1, Some(7)))),
            // bob: result not entered yet
            prediction(bob_id, 2, Stage::Group, (0, 0, None), None),
        ];

        let rankings = rank_users(&ScoringRule::default(), vec![carol, bob, alice], &predictions);

        assert_eq!(rankings.len(), 3);
        assert_eq!(rankings[0].user_id, alice_id);
        assert_eq!(rankings[0].group_points, 4);
        assert_eq!(rankings[0].playoff_points, 1);
        assert_eq!(rankings[0].total_points, 5);
        assert_eq!(rankings[0].rank, 1);

        assert_eq!(rankings[1].user_id, bob_id);
        assert_eq!(rankings[1].total_points, 3);
        assert_eq!(rankings[1].rank, 2);

        assert_eq!(rankings[2].user_id, carol_id);
        assert_eq!(rankings[2].total_points, 0);
        assert_eq!(rankings[2].rank, 3);
    }

    #[test]
    fn test_rank_users_without_predictions() {
        let rankings = rank_users(&ScoringRule::default(), vec![user("bob"), user("alice")], &[]);
        assert_eq!(rankings[0].username, "alice");
        assert_eq!(rankings[1].username, "bob");
        assert!(rankings.iter().all(|r| r.rank == 1 && r.total_points == 0));
    }
}
