use serde::Serialize;

use super::error::EngineError;
use super::score_matrix::ScoreMatrix;

/// Match result probabilities read off a score matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeProbabilities {
    /// Team A scores more (cells below the diagonal).
    pub team_a_win: f64,
    /// Both teams score the same (the diagonal).
    pub draw: f64,
    /// Team B scores more (cells above the diagonal).
    pub team_b_win: f64,
}

impl OutcomeProbabilities {
    pub fn total(&self) -> f64 {
        self.team_a_win + self.draw + self.team_b_win
    }
}

/// The single most likely scoreline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeScore {
    pub team_a_goals: usize,
    pub team_b_goals: usize,
    pub probability: f64,
}

/// Split the matrix into its three regions relative to the main diagonal.
pub fn derive_outcome_probabilities(matrix: &ScoreMatrix) -> OutcomeProbabilities {
    let mut team_a_win = 0.0;
    let mut draw = 0.0;
    let mut team_b_win = 0.0;

    for (i, j, p) in matrix.cells() {
        if i > j {
            team_a_win += p;
        } else if i < j {
            team_b_win += p;
        } else {
            draw += p;
        }
    }

    OutcomeProbabilities {
        team_a_win,
        draw,
        team_b_win,
    }
}

/// Locate the most probable cell.
///
/// The scan is row-major and only a strictly greater value replaces the
/// current best, so ties go to the cell that comes first.
pub fn find_mode_score(matrix: &ScoreMatrix) -> Result<ModeScore, EngineError> {
    let mut cells = matrix.cells();
    let Some((i0, j0, p0)) = cells.next() else {
        return Err(EngineError::InvalidInput(
            "cannot take the mode of an empty matrix".to_string(),
        ));
    };

    let mut best = ModeScore {
        team_a_goals: i0,
        team_b_goals: j0,
        probability: p0,
    };
    for (i, j, p) in cells {
        if p > best.probability {
            best = ModeScore {
                team_a_goals: i,
                team_b_goals: j,
                probability: p,
            };
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::score_matrix::build_score_matrix;
    use approx::assert_relative_eq;

    fn grid_4x4() -> ScoreMatrix {
        ScoreMatrix::from_rows(vec![
            vec![0.04, 0.03, 0.02, 0.01],
            vec![0.08, 0.06, 0.04, 0.02],
            vec![0.12, 0.09, 0.06, 0.03],
            vec![0.16, 0.12, 0.08, 0.04],
        ])
        .unwrap()
    }

    #[test]
    fn regions_of_a_hand_built_grid() {
        let o = derive_outcome_probabilities(&grid_4x4());
        assert_relative_eq!(o.team_a_win, 0.65, epsilon = 1e-12);
        assert_relative_eq!(o.draw, 0.20, epsilon = 1e-12);
        assert_relative_eq!(o.team_b_win, 0.15, epsilon = 1e-12);
    }

    #[test]
    fn regions_partition_the_matrix() {
        for (lambda_a, lambda_b) in [(0.0, 0.0), (1.2, 1.0), (0.4, 3.1), (5.0, 0.2)] {
            for max_goals in [0, 3, 8, 12] {
                let m = build_score_matrix(lambda_a, lambda_b, max_goals).unwrap();
                let o = derive_outcome_probabilities(&m);
                assert_relative_eq!(o.total(), m.total(), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn stronger_attack_is_the_favourite() {
        let m = build_score_matrix(1.2, 1.0, 8).unwrap();
        let o = derive_outcome_probabilities(&m);
        assert!(o.team_a_win > o.team_b_win);
        assert!((0.98..=1.0).contains(&o.total()), "total {}", o.total());
    }

    #[test]
    fn team_a_win_grows_with_its_rate() {
        let mut last = 0.0;
        for lambda_a in [0.5, 1.0, 2.0] {
            let m = build_score_matrix(lambda_a, 1.0, 8).unwrap();
            let win = derive_outcome_probabilities(&m).team_a_win;
            assert!(win >= last, "{win} < {last} at lambda_a={lambda_a}");
            last = win;
        }
    }

    #[test]
    fn single_cell_is_all_draw() {
        let m = ScoreMatrix::from_rows(vec![vec![0.3]]).unwrap();
        let o = derive_outcome_probabilities(&m);
        assert_eq!(o.draw, 0.3);
        assert_eq!(o.team_a_win, 0.0);
        assert_eq!(o.team_b_win, 0.0);
    }

    #[test]
    fn zero_rates_have_nil_nil_mode() {
        let m = build_score_matrix(0.0, 0.0, 8).unwrap();
        let mode = find_mode_score(&m).unwrap();
        assert_eq!((mode.team_a_goals, mode.team_b_goals), (0, 0));
        assert_eq!(mode.probability, 1.0);
    }

    #[test]
    fn ties_resolve_to_first_in_row_major_order() {
        let m = ScoreMatrix::from_rows(vec![vec![0.1, 0.4], vec![0.4, 0.1]]).unwrap();
        let mode = find_mode_score(&m).unwrap();
        assert_eq!((mode.team_a_goals, mode.team_b_goals), (0, 1));
        assert_eq!(mode.probability, 0.4);
    }

    #[test]
    fn mode_of_default_rates() {
        // With λb = 1 the 1-0 and 1-1 cells are equal; 1-0 comes first.
        let m = build_score_matrix(1.2, 1.0, 8).unwrap();
        let mode = find_mode_score(&m).unwrap();
        assert_eq!((mode.team_a_goals, mode.team_b_goals), (1, 0));
        assert_relative_eq!(mode.probability, (-2.2f64).exp() * 1.2, epsilon = 1e-12);
    }

    #[test]
    fn empty_matrix_has_no_mode() {
        let m = ScoreMatrix::from_rows(Vec::new()).unwrap();
        let err = find_mode_score(&m).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }
}
