//! Log-linear discount curve over pillar dates.

use xccy_core::Date;
use xccy_math::interpolation::{Interpolator, LogLinearInterpolator};

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A discount curve interpolated log-linearly between pillar dates.
///
/// The curve always carries an implicit node `(reference_date, 1.0)`.
/// Log-linear interpolation on discount factors gives piecewise-constant
/// instantaneous forwards; beyond the last pillar the last forward is
/// extended.
///
/// # Example
///
/// ```rust
/// use xccy_core::Date;
/// use xccy_curves::prelude::*;
///
/// let today = Date::from_ymd(2024, 1, 15).unwrap();
/// let curve = InterpolatedDiscountCurve::new(
///     today,
///     &[(today.add_days(365), 0.98), (today.add_days(730), 0.955)],
/// )
/// .unwrap();
///
/// assert!((curve.discount_factor(1.0).unwrap() - 0.98).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedDiscountCurve {
    reference_date: Date,
    dates: Vec<Date>,
    interpolator: LogLinearInterpolator,
}

impl InterpolatedDiscountCurve {
    /// Creates a curve from `(pillar date, discount factor)` nodes.
    ///
    /// # Errors
    ///
    /// - `InsufficientPoints` if no pillar is given
    /// - `NonMonotonicTenors` if pillar dates are not strictly increasing
    ///   and strictly after the reference date
    /// - `Math` if a discount factor is non-positive or not finite
    pub fn new(reference_date: Date, pillars: &[(Date, f64)]) -> CurveResult<Self> {
        if pillars.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }

        let mut dates = Vec::with_capacity(pillars.len() + 1);
        let mut times = Vec::with_capacity(pillars.len() + 1);
        let mut dfs = Vec::with_capacity(pillars.len() + 1);
        dates.push(reference_date);
        times.push(0.0);
        dfs.push(1.0);

        for (i, &(date, df)) in pillars.iter().enumerate() {
            let t = reference_date.days_between(&date) as f64 / 365.0;
            let prev = times[i];
            if t <= prev {
                return Err(CurveError::NonMonotonicTenors {
                    index: i,
                    prev,
                    current: t,
                });
            }
            dates.push(date);
            times.push(t);
            dfs.push(df);
        }

        let interpolator = LogLinearInterpolator::new(times, dfs)?.with_extrapolation();

        Ok(Self {
            reference_date,
            dates,
            interpolator,
        })
    }

    /// Creates a curve from `(pillar date, continuously compounded zero rate)` nodes.
    pub fn from_zero_rates(reference_date: Date, pillars: &[(Date, f64)]) -> CurveResult<Self> {
        let nodes: Vec<(Date, f64)> = pillars
            .iter()
            .map(|&(date, rate)| {
                let t = reference_date.days_between(&date) as f64 / 365.0;
                (date, (-rate * t).exp())
            })
            .collect();
        Self::new(reference_date, &nodes)
    }

    /// Returns the curve nodes, including the reference node.
    #[must_use]
    pub fn nodes(&self) -> Vec<(Date, f64)> {
        self.dates
            .iter()
            .copied()
            .zip(self.interpolator.y_values().iter().copied())
            .collect()
    }

    /// Returns the pillar dates, including the reference date.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }
}

impl Curve for InterpolatedDiscountCurve {
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        if t <= 0.0 {
            return Ok(1.0);
        }
        Ok(self.interpolator.interpolate(t)?)
    }

    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn max_date(&self) -> Date {
        self.dates.last().copied().unwrap_or(self.reference_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn today() -> Date {
        Date::from_ymd(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_nodes_are_repriced() {
        let d1 = today().add_days(365);
        let d2 = today().add_days(730);
        let curve = InterpolatedDiscountCurve::new(today(), &[(d1, 0.98), (d2, 0.955)]).unwrap();

        assert_relative_eq!(curve.discount_factor_at(d1).unwrap(), 0.98, epsilon = 1e-15);
        assert_relative_eq!(curve.discount_factor_at(d2).unwrap(), 0.955, epsilon = 1e-15);
        assert_relative_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
        assert_eq!(curve.max_date(), d2);
        assert_eq!(curve.nodes().len(), 3);
    }

    #[test]
    fn test_flat_forward_extrapolation() {
        let d1 = today().add_days(365);
        let curve = InterpolatedDiscountCurve::from_zero_rates(today(), &[(d1, 0.02)]).unwrap();

        // A single node gives a flat curve in both directions
        assert_relative_eq!(curve.zero_rate(0.5).unwrap(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(curve.zero_rate(3.0).unwrap(), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_nodes() {
        assert!(matches!(
            InterpolatedDiscountCurve::new(today(), &[]),
            Err(CurveError::InsufficientPoints { .. })
        ));

        let d1 = today().add_days(365);
        assert!(matches!(
            InterpolatedDiscountCurve::new(today(), &[(d1, 0.98), (d1, 0.97)]),
            Err(CurveError::NonMonotonicTenors { index: 1, .. })
        ));
        assert!(matches!(
            InterpolatedDiscountCurve::new(today(), &[(today(), 1.0)]),
            Err(CurveError::NonMonotonicTenors { index: 0, .. })
        ));
        assert!(matches!(
            InterpolatedDiscountCurve::new(today(), &[(d1, f64::NAN)]),
            Err(CurveError::Math(_))
        ));
    }
}
