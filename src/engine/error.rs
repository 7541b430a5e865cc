#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// A caller-supplied number is outside its allowed range.
    #[error("{name} must be {reason} (got {value})")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: &'static str,
    },

    /// A score matrix that breaks the square, non-empty contract.
    #[error("invalid score matrix: {0}")]
    InvalidInput(String),
}

impl EngineError {
    pub fn invalid_parameter(name: impl Into<String>, value: f64, reason: &'static str) -> Self {
        EngineError::InvalidParameter {
            name: name.into(),
            value,
            reason,
        }
    }
}

/// Check that a scoring rate is a finite, non-negative number.
pub fn ensure_rate(name: &str, lambda: f64) -> Result<f64, EngineError> {
    // NaN fails this comparison too
    if lambda.is_finite() && lambda >= 0.0 {
        Ok(lambda)
    } else {
        Err(EngineError::invalid_parameter(name, lambda, "a finite number >= 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_rate_accepts_zero_and_positive() {
        assert_eq!(ensure_rate("lambda", 0.0), Ok(0.0));
        assert_eq!(ensure_rate("lambda", 2.5), Ok(2.5));
    }

    #[test]
    fn ensure_rate_rejects_negative_and_non_finite() {
        for bad in [-0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = ensure_rate("team_a_rate", bad).unwrap_err();
            assert!(matches!(err, EngineError::InvalidParameter { .. }));
        }
    }

    #[test]
    fn error_message_names_the_parameter() {
        let err = ensure_rate("team_a_rate", -0.5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "team_a_rate must be a finite number >= 0 (got -0.5)"
        );
    }
}
