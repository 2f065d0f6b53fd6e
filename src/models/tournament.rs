// src/models/tournament.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use crate::scoring::{MatchOutcome, MatchPoints, TeamTableRow};

/// Tournament phase a match belongs to. Each phase is scored separately.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Group,
    Playoff,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Group => write!(f, "group"),
            Stage::Playoff => write!(f, "playoff"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown stage: {0}")]
pub struct UnknownStage(pub String);

impl TryFrom<String> for Stage {
    type Error = UnknownStage;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "group" => Ok(Stage::Group),
            "playoff" => Ok(Stage::Playoff),
            _ => Err(UnknownStage(s)),
        }
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Group {
    pub id: String,
    pub name: String,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Playoff {
    pub id: String,
    pub name: String,
    pub position: i32,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub flag: Option<String>,
    pub group_id: Option<String>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub team_id: String,
}

/// A fixture with its teams, as stored in `matches`.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TournamentMatch {
    pub id: i32,
    #[sqlx(try_from = "String")]
    pub stage: Stage,
    pub group_id: Option<String>,
    pub playoff_id: Option<String>,
    pub home_team_id: Option<String>,
    pub home_team_name: Option<String>,
    pub away_team_id: Option<String>,
    pub away_team_name: Option<String>,
    pub stadium_name: String,
    pub start_date: DateTime<Utc>,
}

impl TournamentMatch {
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now > self.start_date
    }

    pub fn teams(&self) -> Option<(&str, &str)> {
        match (&self.home_team_id, &self.away_team_id) {
            (Some(home), Some(away)) => Some((home.as_str(), away.as_str())),
            _ => None,
        }
    }
}

/// A fixture joined with the real result and one user's prediction.
#[derive(Debug, FromRow, Clone)]
pub struct MatchPredictionRow {
    #[sqlx(flatten)]
    pub tournament_match: TournamentMatch,
    pub result_home_score: Option<i32>,
    pub result_away_score: Option<i32>,
    pub result_goal_scorer_id: Option<i32>,
    pub predicted_home_score: Option<i32>,
    pub predicted_away_score: Option<i32>,
    pub predicted_goal_scorer_id: Option<i32>,
}

impl MatchPredictionRow {
    pub fn actual_outcome(&self) -> MatchOutcome {
        MatchOutcome::from_columns(
            self.tournament_match.id,
            self.result_home_score,
            self.result_away_score,
            self.result_goal_scorer_id,
        )
    }

    pub fn predicted_outcome(&self) -> MatchOutcome {
        MatchOutcome::from_columns(
            self.tournament_match.id,
            self.predicted_home_score,
            self.predicted_away_score,
            self.predicted_goal_scorer_id,
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScoreView {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub goal_scorer_id: Option<i32>,
}

/// What the game pages show for a fixture: the match, the caller's
/// prediction, and once the result is in, the real score and points earned.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchWithPrediction {
    #[serde(flatten)]
    pub tournament_match: TournamentMatch,
    pub prediction: Option<ScoreView>,
    pub result: Option<ScoreView>,
    pub points: Option<MatchPoints>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GroupOverview {
    #[serde(flatten)]
    pub group: Group,
    pub matches: Vec<MatchWithPrediction>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: Group,
    pub matches: Vec<MatchWithPrediction>,
    pub predicted_table: Vec<TeamTableRow>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayoffOverview {
    #[serde(flatten)]
    pub playoff: Playoff,
    pub matches: Vec<MatchWithPrediction>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchDetail {
    #[serde(flatten)]
    pub fixture: MatchWithPrediction,
    pub home_team_players: Vec<Player>,
    pub away_team_players: Vec<Player>,
}

/// Real result as listed on the admin pages.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MatchResultRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub tournament_match: TournamentMatch,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub goal_scorer_id: Option<i32>,
    pub goal_scorer_name: Option<String>,
}

/// Score entry shared by predictions and admin results. A goal scorer of
/// `0` is treated as no scorer, matching the "no goal scorer" form option.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoreRequest {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub goal_scorer_id: Option<i32>,
}

impl ScoreRequest {
    pub fn goal_scorer(&self) -> Option<i32> {
        self.goal_scorer_id.filter(|id| *id != 0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayoffPair {
    pub match_id: i32,
    pub home_team_id: Option<String>,
    pub away_team_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayoffPairsRequest {
    pub pairs: Vec<PlayoffPair>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayoffPairsResponse {
    pub playoffs: Vec<PlayoffOverview>,
    pub teams: Vec<Team>,
}

/// Stored predicted table line. Teams the user has not predicted yet come
/// back with zeros.
#[derive(Debug, FromRow, Clone)]
pub struct UserTeamRow {
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

impl From<UserTeamRow> for TeamTableRow {
    fn from(row: UserTeamRow) -> Self {
        Self {
            team_id: row.team_id,
            played: row.played,
            wins: row.wins,
            draws: row.draws,
            losses: row.losses,
            goals_for: row.goals_for,
            goals_against: row.goals_against,
            goal_difference: row.goal_difference,
            points: row.points,
        }
    }
}
