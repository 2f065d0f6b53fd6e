use uuid::Uuid;

use score_challenge_backend::models::tournament::Stage;
use score_challenge_backend::scoring::{
    aggregate_stage, build_ranking, classify, evaluate_match, MatchOutcome, RankingEntry, ResultType, ScoringRule,
};

#[test]
fn exact_score_with_goal_scorer_earns_four_points() {
    let predicted = MatchOutcome::new(1, 2, 1, Some(7));
    let actual = MatchOutcome::new(1, 2, 1, Some(7));
    assert_eq!(evaluate_match(&predicted, &actual), 4);
}

#[test]
fn correct_winner_with_wrong_scorer_earns_one_point() {
    let predicted = MatchOutcome::new(1, 2, 1, Some(7));
    let actual = MatchOutcome::new(1, 3, 0, Some(9));
    assert_eq!(classify(2, 1), classify(3, 0));
    assert_eq!(evaluate_match(&predicted, &actual), 1);
}

#[test]
fn draw_without_predicted_scorer_earns_one_point() {
    let predicted = MatchOutcome::new(1, 1, 1, None);
    let actual = MatchOutcome::new(1, 0, 0, Some(5));
    assert_eq!(classify(0, 0), ResultType::Draw);
    assert_eq!(evaluate_match(&predicted, &actual), 1);
}

#[test]
fn pending_result_earns_nothing() {
    let predicted = MatchOutcome::new(1, 2, 0, None);
    assert_eq!(evaluate_match(&predicted, &MatchOutcome::pending(1)), 0);
}

#[test]
fn missing_scorer_on_both_sides_never_matches() {
    let predicted = MatchOutcome::new(1, 0, 0, None);
    let actual = MatchOutcome::new(1, 0, 0, None);
    assert_eq!(evaluate_match(&predicted, &actual), 3);
}

#[test]
fn stage_totals_feed_the_ranking() {
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();

    let ranking = build_ranking(vec![
        RankingEntry {
            user_id: user_b,
            username: "B".to_string(),
            group_points: 4,
            playoff_points: 4,
        },
        RankingEntry {
            user_id: user_a,
            username: "A".to_string(),
            group_points: 6,
            playoff_points: 3,
        },
    ]);

    assert_eq!(ranking.len(), 2);
    assert_eq!((ranking[0].user_id, ranking[0].total_points, ranking[0].rank), (user_a, 9, 1));
    assert_eq!((ranking[1].user_id, ranking[1].total_points, ranking[1].rank), (user_b, 8, 2));
}

#[test]
fn stage_aggregation_ends_in_ranking() {
    let rule = ScoringRule::default();
    let user_id = Uuid::new_v4();

    let group = vec![
        (MatchOutcome::new(1, 2, 1, Some(7)), MatchOutcome::new(1, 2, 1, Some(7))),
        (MatchOutcome::new(2, 1, 0, None), MatchOutcome::new(2, 2, 0, None)),
    ];
    let playoff = vec![(MatchOutcome::new(9, 1, 1, None), MatchOutcome::pending(9))];

    let group_tally = rule.tally_stage(user_id, Stage::Group, &group);
    let playoff_tally = rule.tally_stage(user_id, Stage::Playoff, &playoff);
    assert_eq!(group_tally.points, aggregate_stage(&group));
    assert_eq!(group_tally.points, 5);
    assert_eq!(playoff_tally.points, 0);

    let ranking = build_ranking([RankingEntry {
        user_id,
        username: "solo".to_string(),
        group_points: group_tally.points,
        playoff_points: playoff_tally.points,
    }]);
    assert_eq!(ranking[0].total_points, 5);
    assert_eq!(ranking[0].rank, 1);
}

#[test]
fn configured_rule_changes_point_values() {
    let rule = ScoringRule {
        exact_score: 5,
        correct_result: 2,
        goal_scorer: 3,
    };
    let predicted = MatchOutcome::new(4, 2, 1, Some(11));

    assert_eq!(rule.evaluate_match(&predicted, &MatchOutcome::new(4, 2, 1, Some(11))), 8);
    assert_eq!(rule.evaluate_match(&predicted, &MatchOutcome::new(4, 1, 0, Some(11))), 5);
    assert_eq!(rule.evaluate_match(&predicted, &MatchOutcome::new(4, 0, 1, None)), 0);
}
