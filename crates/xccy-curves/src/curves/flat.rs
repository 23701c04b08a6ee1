//! Flat forward curve.

use xccy_core::Date;

use crate::error::CurveResult;
use crate::traits::Curve;

/// A curve with a constant continuously compounded zero rate.
///
/// `DF(t) = exp(-r * t)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatForwardCurve {
    reference_date: Date,
    rate: f64,
}

impl FlatForwardCurve {
    /// Creates a flat curve at the given continuously compounded rate.
    #[must_use]
    pub fn new(reference_date: Date, rate: f64) -> Self {
        Self {
            reference_date,
            rate,
        }
    }

    /// Returns the curve rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Curve for FlatForwardCurve {
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        if t <= 0.0 {
            return Ok(1.0);
        }
        Ok((-self.rate * t).exp())
    }

    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn max_date(&self) -> Date {
        self.reference_date.add_days(365 * 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_curve() {
        let today = Date::from_ymd(2024, 1, 15).unwrap();
        let curve = FlatForwardCurve::new(today, 0.03);

        assert_relative_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
        assert_relative_eq!(curve.discount_factor(-1.0).unwrap(), 1.0);
        assert_relative_eq!(curve.discount_factor(2.0).unwrap(), (-0.06_f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(curve.zero_rate(5.0).unwrap(), 0.03, epsilon = 1e-14);
    }

    #[test]
    fn test_forward_rate_between_dates() {
        let today = Date::from_ymd(2024, 1, 15).unwrap();
        let curve = FlatForwardCurve::new(today, 0.02);
        let start = today.add_days(365);
        let end = today.add_days(730);

        let fwd = curve.forward_rate_between(start, end).unwrap();
        assert_relative_eq!(fwd, 0.02_f64.exp() - 1.0, epsilon = 1e-14);
    }
}
