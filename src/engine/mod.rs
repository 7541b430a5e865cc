//! Independent-Poisson scoreline engine.
//!
//! Everything in here is a pure function of its inputs: no I/O, no logging,
//! no shared state. A prediction allocates a fresh [`ScoreMatrix`] and derives
//! its summaries from it.

pub mod error;
pub mod outcome;
pub mod poisson;
pub mod score_matrix;

pub use error::EngineError;
pub use outcome::{derive_outcome_probabilities, find_mode_score, ModeScore, OutcomeProbabilities};
pub use score_matrix::{
    build_score_matrix, ensure_max_goals, ScoreMatrix, DEFAULT_MAX_GOALS, MAX_GOALS_LIMIT,
};
