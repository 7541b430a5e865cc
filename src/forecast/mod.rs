use chrono::Utc;
use tracing::{debug, info};

use crate::engine::error::ensure_rate;
use crate::engine::{
    build_score_matrix, derive_outcome_probabilities, find_mode_score, EngineError,
};

pub use crate::engine::MAX_GOALS_LIMIT;

pub mod models;
pub use models::{MatchInputs, Prediction, Side, TeamStats};

/// Run one prediction: validate, build the matrix, summarise it.
///
/// Every call computes from scratch; nothing is cached between calls.
pub fn predict(inputs: &MatchInputs, max_goals: usize) -> Result<Prediction, EngineError> {
    // Rates first, so a bad rate is always the reported problem.
    let team_a_rate = ensure_rate("Team A goals scored (λ)", inputs.team_a.goals_scored)?;
    let team_b_rate = ensure_rate("Team B goals scored (λ)", inputs.team_b.goals_scored)?;
    validate_team(Side::TeamA, &inputs.team_a)?;
    validate_team(Side::TeamB, &inputs.team_b)?;

    debug!(team_a_rate, team_b_rate, max_goals, "Building score matrix");

    let matrix = build_score_matrix(team_a_rate, team_b_rate, max_goals)?;
    let outcome = derive_outcome_probabilities(&matrix);
    let mode = find_mode_score(&matrix)?;
    let captured_mass = matrix.total();

    info!(
        "Prediction λ=({:.2}, {:.2}): A {:.2}% / D {:.2}% / B {:.2}%, mode {}-{} ({:.2}%)",
        team_a_rate,
        team_b_rate,
        outcome.team_a_win * 100.0,
        outcome.draw * 100.0,
        outcome.team_b_win * 100.0,
        mode.team_a_goals,
        mode.team_b_goals,
        mode.probability * 100.0,
    );

    Ok(Prediction {
        inputs: *inputs,
        team_a_rate,
        team_b_rate,
        max_goals,
        matrix,
        outcome,
        mode,
        captured_mass,
        computed_at: Utc::now(),
    })
}

/// Range-check the form statistics that do not feed the model.
pub fn validate_team(side: Side, stats: &TeamStats) -> Result<(), EngineError> {
    let label = side.label();
    let counts = [
        ("goals conceded", stats.goals_conceded),
        ("shots on target", stats.shots_on_target),
        ("chances created", stats.chances_created),
    ];
    for (field, value) in counts {
        if !(value.is_finite() && value >= 0.0) {
            return Err(EngineError::invalid_parameter(
                format!("{label} {field}"),
                value,
                "a finite number >= 0",
            ));
        }
    }

    let percentages = [
        ("possession (%)", stats.possession),
        ("pass completion (%)", stats.pass_completion),
    ];
    for (field, value) in percentages {
        if !(0.0..=100.0).contains(&value) {
            return Err(EngineError::invalid_parameter(
                format!("{label} {field}"),
                value,
                "between 0 and 100",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DEFAULT_MAX_GOALS;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_favour_team_a() {
        let p = predict(&MatchInputs::default(), DEFAULT_MAX_GOALS).unwrap();
        assert_eq!(p.team_a_rate, 1.2);
        assert_eq!(p.team_b_rate, 1.0);
        assert_eq!(p.matrix.dim(), 9);
        assert!(p.outcome.team_a_win > p.outcome.team_b_win);
        assert_eq!((p.mode.team_a_goals, p.mode.team_b_goals), (1, 0));
        assert_relative_eq!(p.outcome.total(), p.captured_mass, epsilon = 1e-9);
    }

    #[test]
    fn unused_stats_do_not_move_the_result() {
        let base = predict(&MatchInputs::default(), DEFAULT_MAX_GOALS).unwrap();
        let mut inputs = MatchInputs::default();
        inputs.team_a.shots_on_target = 12.0;
        inputs.team_a.possession = 80.0;
        inputs.team_b.goals_conceded = 3.5;
        inputs.team_b.pass_completion = 40.0;
        let other = predict(&inputs, DEFAULT_MAX_GOALS).unwrap();
        assert_eq!(base.matrix, other.matrix);
        assert_eq!(base.outcome, other.outcome);
        assert_eq!(base.mode, other.mode);
    }

    #[test]
    fn negative_rate_is_reported_before_other_fields() {
        let inputs = MatchInputs {
            team_a: TeamStats {
                goals_scored: 1.0,
                possession: 140.0,
                ..TeamStats::DEFAULT_TEAM_A
            },
            team_b: TeamStats::with_rate(Side::TeamB, -0.5),
        };
        let err = predict(&inputs, DEFAULT_MAX_GOALS).unwrap_err();
        assert!(err.to_string().starts_with("Team B goals scored"), "{err}");
    }

    #[test]
    fn out_of_range_percentages_are_rejected() {
        let mut inputs = MatchInputs::default();
        inputs.team_a.possession = 100.5;
        let err = predict(&inputs, DEFAULT_MAX_GOALS).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Team A possession (%) must be between 0 and 100 (got 100.5)"
        );
    }

    #[test]
    fn negative_counts_are_rejected() {
        let stats = TeamStats {
            chances_created: -1.0,
            ..TeamStats::DEFAULT_TEAM_B
        };
        assert!(validate_team(Side::TeamB, &stats).is_err());
        assert!(validate_team(Side::TeamB, &TeamStats::DEFAULT_TEAM_B).is_ok());
    }

    #[test]
    fn goal_cutoff_is_capped() {
        assert!(predict(&MatchInputs::default(), MAX_GOALS_LIMIT).is_ok());
        let err = predict(&MatchInputs::default(), MAX_GOALS_LIMIT + 1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    #[test]
    fn with_rate_keeps_side_defaults() {
        let stats = TeamStats::with_rate(Side::TeamA, 2.1);
        assert_eq!(stats.goals_scored, 2.1);
        assert_eq!(stats.possession, TeamStats::DEFAULT_TEAM_A.possession);
    }

    #[test]
    fn prediction_serializes_with_nested_matrix() {
        let p = predict(&MatchInputs::default(), 2).unwrap();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["matrix"].as_array().unwrap().len(), 3);
        assert_eq!(json["mode"]["team_a_goals"], 1);
        assert_eq!(json["inputs"]["team_b"]["possession"], 48.0);
    }
}
