/// Numeric kernel: pure closed-form calculators.
///
/// Architecture:
/// ```text
///   plain numbers / parsed text
///        │
///        ▼
///   ┌─────────────┐
///   │ probability  │  simple ratio, n choose k, binomial pmf, tree
///   └─────────────┘
///   ┌─────────────┐
///   │  sequence    │  arithmetic detection + term projection
///   └─────────────┘
///   ┌─────────────┐
///   │   affine     │  two-point line fit + collinearity check
///   └─────────────┘
/// ```

pub mod affine;
pub mod probability;
pub mod sequence;

/// Default absolute tolerance for float comparisons.
pub const DEFAULT_ABS_TOL: f64 = 1e-9;

/// Relative tolerance applied on top of the absolute one.
const REL_TOL: f64 = 1e-9;

/// `|a - b| <= max(REL_TOL * max(|a|, |b|), abs_tol)`.
///
/// NaN is never close to anything.
pub fn is_close(a: f64, b: f64, abs_tol: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= (REL_TOL * scale).max(abs_tol)
}

/// Neumaier-compensated sum.
pub fn compensated_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for x in values {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_close_absolute_floor() {
        assert!(is_close(0.1 + 0.2, 0.3, DEFAULT_ABS_TOL));
        assert!(is_close(0.0, 5e-10, DEFAULT_ABS_TOL));
        assert!(!is_close(0.0, 1e-8, DEFAULT_ABS_TOL));
    }

    #[test]
    fn is_close_scales_with_magnitude() {
        assert!(is_close(1e12, 1e12 + 1e2, DEFAULT_ABS_TOL));
        assert!(!is_close(1e12, 1e12 + 1e4, DEFAULT_ABS_TOL));
    }

    #[test]
    fn is_close_rejects_nan() {
        assert!(!is_close(f64::NAN, f64::NAN, DEFAULT_ABS_TOL));
        assert!(!is_close(1.0, f64::NAN, DEFAULT_ABS_TOL));
    }

    #[test]
    fn compensated_sum_recovers_small_terms() {
        let values = [1e16, 1.0, -1e16];
        assert_eq!(compensated_sum(values), 1.0);
    }
}
