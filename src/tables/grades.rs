use serde::Serialize;

use super::model::GradeRow;
use crate::error::{CoreError, CoreResult};
use crate::kernel::compensated_sum;

/// Σ(score · weight) / Σ(weight), unrounded.
pub fn weighted_average(rows: &[GradeRow]) -> CoreResult<f64> {
    if rows.is_empty() {
        return Err(CoreError::domain("cannot average an empty grade table"));
    }
    let total_weight = compensated_sum(rows.iter().map(GradeRow::weight));
    if total_weight == 0.0 {
        return Err(CoreError::domain("sum of weights is zero"));
    }
    let weighted = compensated_sum(rows.iter().map(|r| r.score() * r.weight()));
    if !(total_weight.is_finite() && weighted.is_finite()) {
        return Err(CoreError::domain("weights too large to average"));
    }
    Ok(weighted / total_weight)
}

/// Honours band of an average out of 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mention {
    BelowPass,
    Pass,
    Good,
    VeryGood,
    Excellent,
}

/// <10 below pass, [10,12) pass, [12,14) good, [14,16) very good, ≥16 excellent.
/// NaN classifies as below pass.
pub fn classify_average(value: f64) -> Mention {
    match value {
        v if v >= 16.0 => Mention::Excellent,
        v if v >= 14.0 => Mention::VeryGood,
        v if v >= 12.0 => Mention::Good,
        v if v >= 10.0 => Mention::Pass,
        _ => Mention::BelowPass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn row(score: f64, weight: f64) -> GradeRow {
        GradeRow::new("subject", score, weight).unwrap()
    }

    #[test]
    fn equal_weights_give_plain_mean() {
        let avg = weighted_average(&[row(10.0, 1.0), row(20.0, 1.0)]).unwrap();
        assert_eq!(avg, 15.0);
    }

    #[test]
    fn weights_shift_the_mean() {
        let avg = weighted_average(&[row(8.0, 3.0), row(16.0, 1.0)]).unwrap();
        assert_eq!(avg, 10.0);
    }

    #[test]
    fn result_is_not_rounded() {
        let avg = weighted_average(&[row(10.0, 1.0), row(11.0, 1.0), row(11.0, 1.0)]).unwrap();
        assert!((avg - 32.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_table_is_a_domain_error() {
        assert_eq!(weighted_average(&[]).unwrap_err().kind(), ErrorKind::Domain);
    }

    #[test]
    fn overflowing_weights_are_a_domain_error() {
        let err = weighted_average(&[row(10.0, 1e308), row(10.0, 1e308)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        let err = weighted_average(&[row(20.0, 1e308)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn zero_weight_is_rejected_as_domain_error() {
        let err = GradeRow::new("subject", 12.0, 0.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn thresholds() {
        assert_eq!(classify_average(0.0), Mention::BelowPass);
        assert_eq!(classify_average(9.999), Mention::BelowPass);
        assert_eq!(classify_average(10.0), Mention::Pass);
        assert_eq!(classify_average(11.99), Mention::Pass);
        assert_eq!(classify_average(12.0), Mention::Good);
        assert_eq!(classify_average(14.0), Mention::VeryGood);
        assert_eq!(classify_average(15.99), Mention::VeryGood);
        assert_eq!(classify_average(16.0), Mention::Excellent);
        assert_eq!(classify_average(20.0), Mention::Excellent);
        assert_eq!(classify_average(f64::NAN), Mention::BelowPass);
    }

    #[test]
    fn mention_serializes_upper_case() {
        let json = serde_json::to_string(&Mention::VeryGood).unwrap();
        assert_eq!(json, "\"VERY_GOOD\"");
    }
}
