//! Arithmetic sequence detection and projection.

use serde::Serialize;

use super::is_close;
use crate::error::{CoreError, CoreResult};

/// Verdict of [`detect_arithmetic_sequence`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceAnalysis {
    pub is_arithmetic: bool,
    /// `terms[1] - terms[0]`.
    pub common_difference: f64,
    pub first_term: f64,
    /// Index `i` of the first difference `terms[i + 1] - terms[i]` that
    /// departs from the common difference.
    pub first_mismatch_index: Option<usize>,
}

/// Decide whether `terms` has a constant step.
///
/// Single pass over consecutive differences; stops at the first one that is
/// not close to `terms[1] - terms[0]`.
pub fn detect_arithmetic_sequence(terms: &[f64], abs_tol: f64) -> CoreResult<SequenceAnalysis> {
    if terms.len() < 2 {
        return Err(CoreError::InsufficientData {
            what: "terms",
            required: 2,
            given: terms.len(),
        });
    }

    let common_difference = terms[1] - terms[0];
    let first_mismatch_index = terms
        .windows(2)
        .position(|w| !is_close(w[1] - w[0], common_difference, abs_tol));

    Ok(SequenceAnalysis {
        is_arithmetic: first_mismatch_index.is_none(),
        common_difference,
        first_term: terms[0],
        first_mismatch_index,
    })
}

/// u_n = first_term + n * common_difference, for n in `0..count`.
pub fn project_terms(first_term: f64, common_difference: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|n| first_term + n as f64 * common_difference)
        .collect()
}

/// Parse whitespace-separated decimal tokens ("2 5 8 11").
pub fn parse_terms(text: &str) -> CoreResult<Vec<f64>> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, tok)| match tok.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(CoreError::format(format!(
                "term {} ('{tok}') is not a finite number",
                i + 1
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::kernel::DEFAULT_ABS_TOL;

    #[test]
    fn detects_arithmetic_sequence() {
        let a = detect_arithmetic_sequence(&[2.0, 5.0, 8.0, 11.0], DEFAULT_ABS_TOL).unwrap();
        assert!(a.is_arithmetic);
        assert_eq!(a.common_difference, 3.0);
        assert_eq!(a.first_term, 2.0);
        assert_eq!(a.first_mismatch_index, None);
    }

    #[test]
    fn reports_first_mismatch() {
        let a = detect_arithmetic_sequence(&[2.0, 5.0, 9.0], DEFAULT_ABS_TOL).unwrap();
        assert!(!a.is_arithmetic);
        assert_eq!(a.first_mismatch_index, Some(1));
    }

    #[test]
    fn stops_at_first_mismatch_only() {
        let a = detect_arithmetic_sequence(&[0.0, 1.0, 2.0, 4.0, 7.0], DEFAULT_ABS_TOL).unwrap();
        assert_eq!(a.first_mismatch_index, Some(2));
    }

    #[test]
    fn tolerates_decimal_rounding() {
        let a = detect_arithmetic_sequence(&[0.1, 0.2, 0.3, 0.4], DEFAULT_ABS_TOL).unwrap();
        assert!(a.is_arithmetic);
    }

    #[test]
    fn two_terms_are_always_arithmetic() {
        let a = detect_arithmetic_sequence(&[4.0, -1.5], DEFAULT_ABS_TOL).unwrap();
        assert!(a.is_arithmetic);
        assert_eq!(a.common_difference, -5.5);
    }

    #[test]
    fn rejects_single_term() {
        let err = detect_arithmetic_sequence(&[1.0], DEFAULT_ABS_TOL).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn projects_terms() {
        assert_eq!(project_terms(2.0, 3.0, 4), vec![2.0, 5.0, 8.0, 11.0]);
        assert!(project_terms(2.0, 3.0, 0).is_empty());
    }

    #[test]
    fn parses_terms() {
        assert_eq!(parse_terms("  2 5\t8\n11 ").unwrap(), vec![2.0, 5.0, 8.0, 11.0]);
        assert_eq!(parse_terms("-1.5 2e3").unwrap(), vec![-1.5, 2000.0]);
        assert!(parse_terms("").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_non_numeric_token() {
        let err = parse_terms("2 5 huit").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("term 3"));
        assert!(parse_terms("1 inf").is_err());
        assert!(parse_terms("1,5 2").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::kernel::DEFAULT_ABS_TOL;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn projected_terms_are_arithmetic(
            first in -1e4_f64..1e4,
            d in -1e3_f64..1e3,
            count in 2_usize..100,
        ) {
            let terms = project_terms(first, d, count);
            let a = detect_arithmetic_sequence(&terms, DEFAULT_ABS_TOL).unwrap();
            prop_assert!(a.is_arithmetic, "mismatch at {:?}", a.first_mismatch_index);
            prop_assert!((a.common_difference - d).abs() < 1e-9);
            prop_assert_eq!(a.first_term, first);
        }
    }
}
