use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scoring::outcome::classify;

const WIN_POINTS: i32 = 3;
const DRAW_POINTS: i32 = 1;

/// A user's predicted score for a group fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePrediction {
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

/// A team's line in a predicted group table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TeamTableRow {
    pub team_id: String,
    pub played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
    pub points: i32,
}

impl TeamTableRow {
    fn new(team_id: &str) -> Self {
        Self {
            team_id: team_id.to_string(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        let (scored, conceded) = (scored as i32, conceded as i32);
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_difference = self.goals_for - self.goals_against;
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => {
                self.wins += 1;
                self.points += WIN_POINTS;
            }
            std::cmp::Ordering::Equal => {
                self.draws += 1;
                self.points += DRAW_POINTS;
            }
            std::cmp::Ordering::Less => self.losses += 1,
        }
    }
}

/// Build the group table implied by a user's predictions.
///
/// Every team named in a fixture gets a row, even when none of its fixtures
/// has been predicted yet.
pub fn predicted_group_table(fixtures: &[FixturePrediction]) -> Vec<TeamTableRow> {
    let mut rows: HashMap<&str, TeamTableRow> = HashMap::new();

    for fixture in fixtures {
        rows.entry(fixture.home_team_id.as_str())
            .or_insert_with(|| TeamTableRow::new(&fixture.home_team_id));
        rows.entry(fixture.away_team_id.as_str())
            .or_insert_with(|| TeamTableRow::new(&fixture.away_team_id));

        let (Some(home_score), Some(away_score)) = (fixture.home_score, fixture.away_score) else {
            continue;
        };

        tracing::debug!(
            "Predicted {} {}-{} {} ({})",
            fixture.home_team_id, home_score, away_score, fixture.away_team_id,
            classify(home_score, away_score)
        );

        if let Some(home) = rows.get_mut(fixture.home_team_id.as_str()) {
            home.record(home_score, away_score);
        }
        if let Some(away) = rows.get_mut(fixture.away_team_id.as_str()) {
            away.record(away_score, home_score);
        }
    }

    let mut table: Vec<TeamTableRow> = rows.into_values().collect();
    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(home: &str, away: &str, scores: Option<(u32, u32)>) -> FixturePrediction {
        FixturePrediction {
            home_team_id: home.to_string(),
            away_team_id: away.to_string(),
            home_score: scores.map(|s| s.0),
            away_score: scores.map(|s| s.1),
        }
    }

    #[test]
    fn test_table_points_and_goal_difference() {
        let table = predicted_group_table(&[
            fixture("qatar", "ecuador", Some((0, 2))),
            fixture("senegal", "netherlands", Some((1, 1))),
            fixture("qatar", "senegal", Some((1, 3))),
            fixture("netherlands", "ecuador", Some((1, 1))),
        ]);

        let order: Vec<&str> = table.iter().map(|r| r.team_id.as_str()).collect();
        assert_eq!(order, vec!["senegal", "ecuador", "netherlands", "qatar"]);

        let senegal = &table[0];
        assert_eq!(senegal.points, 4);
        assert_eq!(senegal.goal_difference, 2);
        assert_eq!(senegal.played, 2);

        let qatar = &table[3];
        assert_eq!(qatar.points, 0);
        assert_eq!(qatar.goal_difference, -4);
        assert_eq!(qatar.losses, 2);
    }

    #[test]
    fn test_unpredicted_fixtures_still_list_teams() {
        let table = predicted_group_table(&[
            fixture("poland", "mexico", None),
            fixture("argentina", "saudi-arabia", Some((2, 0))),
        ]);

        assert_eq!(table.len(), 4);
        assert_eq!(table[0].team_id, "argentina");
        let poland = table.iter().find(|r| r.team_id == "poland").unwrap();
        assert_eq!(poland.played, 0);
        assert_eq!(poland.points, 0);
    }
}
