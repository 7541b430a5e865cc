//! Poisson probability mass function.
//!
//! Computed with the recurrence `p(0) = e^-λ`, `p(k) = p(k-1) · λ / k`, so no
//! factorial is ever formed and large `k` cannot overflow. With `λ = 0` the
//! recurrence yields exactly `1` at `k = 0` and `0` everywhere else.
//!
//! Callers are expected to have validated `lambda` (finite, `>= 0`).

/// P(X = k) for X ~ Poisson(lambda).
pub fn pmf(k: usize, lambda: f64) -> f64 {
    debug_assert!(lambda.is_finite() && lambda >= 0.0, "lambda out of range");

    let mut p = (-lambda).exp();
    for n in 1..=k {
        p *= lambda / n as f64;
        if p == 0.0 {
            break;
        }
    }
    p
}

/// P(X = k) for every `k` in `0..=max_k`.
///
/// The tail beyond `max_k` is dropped, not folded into the last bucket, so the
/// table sums to at most one.
pub fn pmf_table(lambda: f64, max_k: usize) -> Vec<f64> {
    debug_assert!(lambda.is_finite() && lambda >= 0.0, "lambda out of range");

    let mut out = Vec::with_capacity(max_k + 1);
    let mut p = (-lambda).exp();
    out.push(p);
    for k in 1..=max_k {
        p *= lambda / k as f64;
        out.push(p);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn closed_form(k: u32, lambda: f64) -> f64 {
        let factorial: f64 = (1..=k).map(f64::from).product();
        (-lambda).exp() * lambda.powi(k as i32) / factorial
    }

    #[test]
    fn table_matches_closed_form_for_small_k() {
        let table = pmf_table(1.7, 8);
        assert_eq!(table.len(), 9);
        for (k, p) in table.iter().enumerate() {
            assert_relative_eq!(*p, closed_form(k as u32, 1.7), max_relative = 1e-12);
        }
    }

    #[test]
    fn single_value_agrees_with_table() {
        let table = pmf_table(2.3, 10);
        for k in 0..=10 {
            assert_relative_eq!(pmf(k, 2.3), table[k], max_relative = 1e-12);
        }
    }

    #[test]
    fn zero_rate_is_degenerate_at_zero() {
        let table = pmf_table(0.0, 5);
        assert_eq!(table, vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(pmf(0, 0.0), 1.0);
        assert_eq!(pmf(3, 0.0), 0.0);
    }

    #[test]
    fn truncated_table_sums_below_one() {
        let sum: f64 = pmf_table(3.0, 4).iter().sum();
        assert!(sum < 1.0);
        let sum: f64 = pmf_table(3.0, 60).iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn large_k_stays_finite() {
        // 200! overflows f64; the recurrence never forms it
        let p = pmf(200, 150.0);
        assert!(p.is_finite() && p > 0.0);
        assert!(pmf_table(4.0, 400).iter().all(|p| p.is_finite()));
    }
}
