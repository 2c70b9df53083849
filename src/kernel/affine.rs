//! Affine function detection: does every point lie on f(x) = a·x + b?
//!
//! The line is fixed by the first two points only; the remaining points are
//! then tested against it. This is a membership test, not a regression.

use serde::{Deserialize, Serialize};

use super::is_close;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// f(x) = slope · x + intercept
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AffineFit {
    pub slope: f64,
    pub intercept: f64,
}

impl AffineFit {
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffineAnalysis {
    pub is_affine: bool,
    pub slope: f64,
    pub intercept: f64,
    pub first_mismatch_index: Option<usize>,
}

/// Line through `points[0]` and `points[1]`.
pub fn fit_affine(points: &[Point]) -> CoreResult<AffineFit> {
    let (p0, p1) = match points {
        [p0, p1, ..] => (p0, p1),
        _ => {
            return Err(CoreError::InsufficientData {
                what: "points",
                required: 2,
                given: points.len(),
            })
        }
    };
    if p1.x == p0.x {
        return Err(CoreError::Degenerate(format!(
            "first two points share x = {}: vertical line, slope undefined",
            p0.x
        )));
    }

    let slope = (p1.y - p0.y) / (p1.x - p0.x);
    Ok(AffineFit {
        slope,
        intercept: p0.y - slope * p0.x,
    })
}

/// Fit on the first two points, then check every point (those two included)
/// against the line. Stops at the first point off the line.
pub fn detect_affine(points: &[Point], abs_tol: f64) -> CoreResult<AffineAnalysis> {
    let fit = fit_affine(points)?;
    let first_mismatch_index = points
        .iter()
        .position(|p| !is_close(p.y, fit.eval(p.x), abs_tol));

    Ok(AffineAnalysis {
        is_affine: first_mismatch_index.is_none(),
        slope: fit.slope,
        intercept: fit.intercept,
        first_mismatch_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::kernel::DEFAULT_ABS_TOL;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn fit_two_points() {
        let fit = fit_affine(&pts(&[(0.0, 1.0), (1.0, 3.0)])).unwrap();
        assert_eq!(fit.slope, 2.0);
        assert_eq!(fit.intercept, 1.0);
    }

    #[test]
    fn fit_ignores_points_after_the_second() {
        let fit = fit_affine(&pts(&[(2.0, 0.0), (4.0, 1.0), (100.0, -7.0)])).unwrap();
        assert_eq!(fit.slope, 0.5);
        assert_eq!(fit.intercept, -1.0);
    }

    #[test]
    fn fit_vertical_line_is_degenerate() {
        let err = fit_affine(&pts(&[(1.0, 1.0), (1.0, 5.0)])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Degenerate);
    }

    #[test]
    fn fit_needs_two_points() {
        let err = fit_affine(&pts(&[(1.0, 1.0)])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        assert!(fit_affine(&[]).is_err());
    }

    #[test]
    fn detect_collinear_points() {
        let a =
            detect_affine(&pts(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]), DEFAULT_ABS_TOL).unwrap();
        assert!(a.is_affine);
        assert_eq!(a.first_mismatch_index, None);
    }

    #[test]
    fn detect_reports_first_point_off_the_line() {
        let a = detect_affine(
            &pts(&[(0.0, 1.0), (1.0, 3.0), (2.0, 6.0), (3.0, 0.0)]),
            DEFAULT_ABS_TOL,
        )
        .unwrap();
        assert!(!a.is_affine);
        assert_eq!(a.first_mismatch_index, Some(2));
        assert_eq!(a.slope, 2.0);
    }

    #[test]
    fn detect_accepts_unsorted_x() {
        let a = detect_affine(
            &pts(&[(1.0, 0.3), (0.0, 0.1), (3.0, 0.7), (-2.0, -0.3)]),
            DEFAULT_ABS_TOL,
        )
        .unwrap();
        assert!(a.is_affine);
    }

    #[test]
    fn detect_propagates_degenerate_fit() {
        let err = detect_affine(&pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]), DEFAULT_ABS_TOL)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Degenerate);
    }
}
