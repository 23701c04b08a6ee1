//! Multiplicative composition of two curves.

use std::fmt;
use std::sync::Arc;

use xccy_core::Date;

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A curve whose discount factors are the product of two curves.
///
/// `DF(t) = DF_base(t) * DF_spread(t)`
///
/// Used to discount the non-collateral leg when the curve being solved is
/// a basis over the collateral curve rather than a full discount curve.
#[derive(Clone)]
pub struct ComposedCurve {
    base: Arc<dyn Curve>,
    spread: Arc<dyn Curve>,
}

impl ComposedCurve {
    /// Composes two curves sharing a reference date.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the reference dates differ.
    pub fn new(base: Arc<dyn Curve>, spread: Arc<dyn Curve>) -> CurveResult<Self> {
        if base.reference_date() != spread.reference_date() {
            return Err(CurveError::invalid_configuration(format!(
                "cannot compose curves with reference dates {} and {}",
                base.reference_date(),
                spread.reference_date()
            )));
        }
        Ok(Self { base, spread })
    }

    /// Returns the base curve.
    #[must_use]
    pub fn base(&self) -> &Arc<dyn Curve> {
        &self.base
    }

    /// Returns the spread curve.
    #[must_use]
    pub fn spread(&self) -> &Arc<dyn Curve> {
        &self.spread
    }
}

impl fmt::Debug for ComposedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedCurve")
            .field("reference_date", &self.base.reference_date())
            .field("max_date", &self.max_date())
            .finish()
    }
}

impl Curve for ComposedCurve {
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        Ok(self.base.discount_factor(t)? * self.spread.discount_factor(t)?)
    }

    fn reference_date(&self) -> Date {
        self.base.reference_date()
    }

    fn max_date(&self) -> Date {
        self.base.max_date().min(self.spread.max_date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatForwardCurve;
    use approx::assert_relative_eq;

    #[test]
    fn test_rates_add() {
        let today = Date::from_ymd(2024, 1, 15).unwrap();
        let curve = ComposedCurve::new(
            Arc::new(FlatForwardCurve::new(today, 0.02)),
            Arc::new(FlatForwardCurve::new(today, -0.0015)),
        )
        .unwrap();

        assert_relative_eq!(curve.zero_rate(4.0).unwrap(), 0.0185, epsilon = 1e-14);
    }

    #[test]
    fn test_reference_dates_must_match() {
        let today = Date::from_ymd(2024, 1, 15).unwrap();
        let result = ComposedCurve::new(
            Arc::new(FlatForwardCurve::new(today, 0.02)),
            Arc::new(FlatForwardCurve::new(today.add_days(1), 0.01)),
        );
        assert!(matches!(result, Err(CurveError::InvalidConfiguration { .. })));
    }
}
