//! Probability calculators.
//!
//! Counting quantities are exact ([`BigUint`]); probabilities are `f64`.

use num_bigint::BigUint;
use num_traits::One;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Largest `n` accepted by [`combinations`] and [`binomial_pmf`]. Both run in
/// O(min(k, n - k)), and C(n, k) has up to ~n·log10(2) digits.
pub const MAX_N: u64 = 100_000;

/// P(A) = favorable / total.
pub fn simple_probability(favorable: u64, total: u64) -> CoreResult<f64> {
    if total == 0 {
        return Err(CoreError::domain("total number of cases must be positive"));
    }
    if favorable > total {
        return Err(CoreError::domain(format!(
            "favorable cases ({favorable}) cannot exceed total cases ({total})"
        )));
    }
    Ok(favorable as f64 / total as f64)
}

/// Binomial coefficient C(n, k), exact.
///
/// Multiplicative formula on the smaller of `k` and `n - k`; every
/// intermediate division is exact because the running value is always
/// C(n - k + i, i).
pub fn combinations(n: u64, k: u64) -> CoreResult<BigUint> {
    check_k_le_n(n, k)?;
    let k = k.min(n - k);
    let mut acc = BigUint::one();
    for i in 1..=k {
        acc *= n - k + i;
        acc /= i;
    }
    Ok(acc)
}

/// ln C(n, k), summed term by term so it never overflows.
fn ln_combinations(n: u64, k: u64) -> f64 {
    let k = k.min(n - k);
    (1..=k)
        .map(|i| ((n - k + i) as f64).ln() - (i as f64).ln())
        .sum()
}

/// P(X = k) for X ~ B(n, p).
///
/// Evaluated in log space: ln C(n,k) + k ln p + (n-k) ln(1-p), then
/// exponentiated. The p = 0 and p = 1 endpoints are handled exactly
/// (0^0 = 1).
pub fn binomial_pmf(n: u64, k: u64, p: f64) -> CoreResult<f64> {
    check_k_le_n(n, k)?;
    if !(0.0..=1.0).contains(&p) {
        return Err(CoreError::domain(format!(
            "success probability must lie in [0, 1], got {p}"
        )));
    }
    if p == 0.0 {
        return Ok(if k == 0 { 1.0 } else { 0.0 });
    }
    if p == 1.0 {
        return Ok(if k == n { 1.0 } else { 0.0 });
    }
    let failures = (n - k) as f64;
    let ln_pmf = ln_combinations(n, k) + k as f64 * p.ln() + failures * (-p).ln_1p();
    Ok(ln_pmf.exp().clamp(0.0, 1.0))
}

fn check_k_le_n(n: u64, k: u64) -> CoreResult<()> {
    if n > MAX_N {
        return Err(CoreError::domain(format!("n ({n}) exceeds the limit of {MAX_N}")));
    }
    if k > n {
        return Err(CoreError::domain(format!("k ({k}) cannot exceed n ({n})")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Two-level probability tree
// ---------------------------------------------------------------------------

/// Branch and leaf probabilities of the tree A / Ā, then B / B̄.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityTree {
    pub p_a: f64,
    pub p_not_a: f64,
    pub p_b_given_a: f64,
    pub p_not_b_given_a: f64,
    pub p_b_given_not_a: f64,
    pub p_not_b_given_not_a: f64,
    /// P(A ∩ B)
    pub p_a_and_b: f64,
    /// P(Ā ∩ B)
    pub p_not_a_and_b: f64,
    /// Total probability P(B).
    pub p_b: f64,
}

pub fn probability_tree(
    p_a: f64,
    p_b_given_a: f64,
    p_b_given_not_a: f64,
) -> CoreResult<ProbabilityTree> {
    for (name, value) in [
        ("P(A)", p_a),
        ("P(B|A)", p_b_given_a),
        ("P(B|Ā)", p_b_given_not_a),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(CoreError::domain(format!(
                "{name} must lie in [0, 1], got {value}"
            )));
        }
    }

    let p_a_and_b = p_a * p_b_given_a;
    let p_not_a_and_b = (1.0 - p_a) * p_b_given_not_a;
    Ok(ProbabilityTree {
        p_a,
        p_not_a: 1.0 - p_a,
        p_b_given_a,
        p_not_b_given_a: 1.0 - p_b_given_a,
        p_b_given_not_a,
        p_not_b_given_not_a: 1.0 - p_b_given_not_a,
        p_a_and_b,
        p_not_a_and_b,
        p_b: p_a_and_b + p_not_a_and_b,
    })
}
