use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{ModeScore, OutcomeProbabilities, ScoreMatrix};

/// Per-team form inputs collected by the prediction form.
///
/// Only `goals_scored` feeds the model, as the team's Poisson rate. The other
/// fields are range-checked and echoed back but carry no weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    /// Average goals scored per match (λ)
    pub goals_scored: f64,
    pub goals_conceded: f64,
    pub shots_on_target: f64,
    pub chances_created: f64,
    /// Share of possession, 0–100
    pub possession: f64,
    /// Pass completion rate, 0–100
    pub pass_completion: f64,
}

impl TeamStats {
    pub const DEFAULT_TEAM_A: TeamStats = TeamStats {
        goals_scored: 1.2,
        goals_conceded: 1.0,
        shots_on_target: 3.0,
        chances_created: 5.0,
        possession: 52.0,
        pass_completion: 82.0,
    };

    pub const DEFAULT_TEAM_B: TeamStats = TeamStats {
        goals_scored: 1.0,
        goals_conceded: 1.1,
        shots_on_target: 2.7,
        chances_created: 4.0,
        possession: 48.0,
        pass_completion: 79.0,
    };

    /// Default stats for a side.
    pub fn default_for(side: Side) -> TeamStats {
        match side {
            Side::TeamA => Self::DEFAULT_TEAM_A,
            Side::TeamB => Self::DEFAULT_TEAM_B,
        }
    }

    /// Stats with only the scoring rate set; the rest take the side's defaults.
    pub fn with_rate(side: Side, goals_scored: f64) -> TeamStats {
        TeamStats {
            goals_scored,
            ..Self::default_for(side)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    TeamA,
    TeamB,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::TeamA => "Team A",
            Side::TeamB => "Team B",
        }
    }
}

/// Default inputs for both sides, as restored by the form's Reset action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchInputs {
    pub team_a: TeamStats,
    pub team_b: TeamStats,
}

impl Default for MatchInputs {
    fn default() -> Self {
        MatchInputs {
            team_a: TeamStats::DEFAULT_TEAM_A,
            team_b: TeamStats::DEFAULT_TEAM_B,
        }
    }
}

/// Everything one prediction produces.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub inputs: MatchInputs,
    pub team_a_rate: f64,
    pub team_b_rate: f64,
    pub max_goals: usize,
    /// Rows are team A goals, columns team B goals
    pub matrix: ScoreMatrix,
    pub outcome: OutcomeProbabilities,
    pub mode: ModeScore,
    /// Probability mass inside the goal cutoff
    pub captured_mass: f64,
    pub computed_at: DateTime<Utc>,
}
