use serde::Serialize;

use super::error::{ensure_rate, EngineError};
use super::poisson;

/// Goals per team covered by the matrix when the caller does not say.
pub const DEFAULT_MAX_GOALS: usize = 8;

/// Hard ceiling on the goal cutoff. Matrix cost grows with its square.
pub const MAX_GOALS_LIMIT: usize = 30;

/// Joint probability table over final scores.
///
/// Row index = team A goals, column index = team B goals. The matrix is always
/// square and stored row-major. Cells are never renormalised, so the total is
/// the probability mass captured below the goal cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "Vec<Vec<f64>>")]
pub struct ScoreMatrix {
    dim: usize,
    cells: Vec<f64>,
}

impl ScoreMatrix {
    /// Build a matrix from explicit rows. The input must be square; the empty
    /// matrix is allowed.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, EngineError> {
        let dim = rows.len();
        let mut cells = Vec::with_capacity(dim * dim);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(EngineError::InvalidInput(format!(
                    "row {i} has {} columns, expected {dim}",
                    row.len()
                )));
            }
            cells.extend(row);
        }
        Ok(ScoreMatrix { dim, cells })
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Probability of team A scoring `i` and team B scoring `j`, if inside the grid.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.dim && j < self.dim {
            Some(self.cells[i * self.dim + j])
        } else {
            None
        }
    }

    /// Row `i` (team A scoring `i`), if inside the grid.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.dim {
            Some(&self.cells[i * self.dim..(i + 1) * self.dim])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // chunks_exact panics on a zero chunk size
        self.cells.chunks_exact(self.dim.max(1))
    }

    /// Every cell as `(i, j, p)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let dim = self.dim;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, p)| (idx / dim, idx % dim, *p))
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}

impl From<ScoreMatrix> for Vec<Vec<f64>> {
    fn from(matrix: ScoreMatrix) -> Self {
        matrix.to_rows()
    }
}

/// Build the independent-Poisson score matrix for two scoring rates.
///
/// Both rates and the cutoff (at most [`MAX_GOALS_LIMIT`]) are validated
/// before anything is allocated. The result has `(max_goals + 1)²` cells,
/// each `pmf(i; λa) · pmf(j; λb)`.
pub fn build_score_matrix(
    lambda_a: f64,
    lambda_b: f64,
    max_goals: usize,
) -> Result<ScoreMatrix, EngineError> {
    let lambda_a = ensure_rate("team_a_rate", lambda_a)?;
    let lambda_b = ensure_rate("team_b_rate", lambda_b)?;
    let max_goals = ensure_max_goals(max_goals)?;

    let pmf_a = poisson::pmf_table(lambda_a, max_goals);
    let pmf_b = poisson::pmf_table(lambda_b, max_goals);

    let dim = max_goals + 1;
    let mut cells = Vec::with_capacity(dim * dim);
    for p_i in &pmf_a {
        for p_j in &pmf_b {
            cells.push(p_i * p_j);
        }
    }

    Ok(ScoreMatrix { dim, cells })
}

pub fn ensure_max_goals(max_goals: usize) -> Result<usize, EngineError> {
    if max_goals > MAX_GOALS_LIMIT {
        return Err(EngineError::invalid_parameter(
            "max_goals",
            max_goals as f64,
            "at most 30",
        ));
    }
    Ok(max_goals)
}
