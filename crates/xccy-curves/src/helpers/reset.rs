//! Notional reset strategies for mark-to-market swaps.
//!
//! A mark-to-market cross-currency swap resets the notional of one leg at
//! the start of every period to the FX forward for that date, so the leg
//! carries no FX principal risk. Under collateralized FX parity
//!
//! ```text
//! F(t) = S · P_base(t) / P_quote(t)
//! ```
//!
//! where `S` is the spot in quote currency per unit of base currency.
//! Notionals are returned relative to the inception notional, so a
//! resettable quote leg gets `F(t)/S` and a resettable base leg `S/F(t)`.

use std::fmt;
use std::sync::Arc;

use xccy_core::types::Date;

use super::discount::LegSide;
use crate::cashflows::{FloatingCoupon, Leg};
use crate::error::{ensure_finite, CurveError, CurveResult};
use crate::quotes::Quote;
use crate::traits::Curve;

/// Computes per-period notionals for the resettable leg of a swap.
pub trait NotionalReset: Send + Sync + fmt::Debug {
    /// The leg whose notional resets.
    fn resettable_leg(&self) -> LegSide;

    /// Records the reset dates of the resettable leg, one per coupon.
    fn mark_reset_dates(&mut self, leg: &Leg);

    /// The reset dates marked by the last call to `mark_reset_dates`.
    fn reset_dates(&self) -> &[Date];

    /// Version of the market data the notionals depend on, besides the curves.
    fn version(&self) -> u64;

    /// Notionals for each reset date, relative to the inception notional.
    fn reset_notionals(&self, base_curve: &dyn Curve, quote_curve: &dyn Curve)
        -> CurveResult<Vec<f64>>;
}

/// Resets one leg to the FX forward implied by the two discount curves.
#[derive(Debug, Clone)]
pub struct MarkToMarketReset {
    fx_spot: Arc<dyn Quote>,
    resettable: LegSide,
    reset_dates: Vec<Date>,
}

impl MarkToMarketReset {
    /// Creates a reset strategy on the given leg.
    #[must_use]
    pub fn new(fx_spot: Arc<dyn Quote>, resettable: LegSide) -> Self {
        Self {
            fx_spot,
            resettable,
            reset_dates: Vec::new(),
        }
    }

    /// Creates a reset strategy from the base-leg-resettable flag.
    #[must_use]
    pub fn from_flag(fx_spot: Arc<dyn Quote>, is_fx_base_currency_leg_resettable: bool) -> Self {
        let resettable = if is_fx_base_currency_leg_resettable {
            LegSide::Base
        } else {
            LegSide::Quote
        };
        Self::new(fx_spot, resettable)
    }

    /// Current FX spot.
    ///
    /// # Errors
    ///
    /// `MissingQuote` if unset, `NumericalFailure` if not positive and finite.
    pub fn spot(&self) -> CurveResult<f64> {
        let spot = self
            .fx_spot
            .value()
            .ok_or_else(|| CurveError::missing_quote("fx spot"))?;
        if !(spot.is_finite() && spot > 0.0) {
            return Err(CurveError::numerical_failure(format!("fx spot = {spot}")));
        }
        Ok(spot)
    }

    /// FX forward for a date implied by the two curves.
    pub fn fx_forward(
        &self,
        date: Date,
        base_curve: &dyn Curve,
        quote_curve: &dyn Curve,
    ) -> CurveResult<f64> {
        let spot = self.spot()?;
        let ratio = forward_ratio(date, base_curve, quote_curve)?;
        ensure_finite(spot * ratio, || format!("fx forward at {date}"))
    }
}

/// `P_base(t) / P_quote(t)`, the forward-to-spot ratio.
fn forward_ratio(date: Date, base_curve: &dyn Curve, quote_curve: &dyn Curve) -> CurveResult<f64> {
    let df_base = base_curve.discount_factor_at(date)?;
    let df_quote = quote_curve.discount_factor_at(date)?;
    ensure_finite(df_base / df_quote, || format!("fx forward ratio at {date}"))
}

impl NotionalReset for MarkToMarketReset {
    fn resettable_leg(&self) -> LegSide {
        self.resettable
    }

    fn mark_reset_dates(&mut self, leg: &Leg) {
        self.reset_dates = leg.iter().map(FloatingCoupon::accrual_start).collect();
    }

    fn reset_dates(&self) -> &[Date] {
        &self.reset_dates
    }

    fn version(&self) -> u64 {
        self.fx_spot.version()
    }

    fn reset_notionals(
        &self,
        base_curve: &dyn Curve,
        quote_curve: &dyn Curve,
    ) -> CurveResult<Vec<f64>> {
        // The spot cancels out of the normalized notionals but must still be valid.
        self.spot()?;

        self.reset_dates
            .iter()
            .map(|&date| {
                let ratio = forward_ratio(date, base_curve, quote_curve)?;
                let notional = match self.resettable {
                    LegSide::Quote => ratio,
                    LegSide::Base => 1.0 / ratio,
                };
                ensure_finite(notional, || format!("reset notional at {date}"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatForwardCurve;
    use crate::quotes::SimpleQuote;
    use approx::assert_relative_eq;

    fn today() -> Date {
        Date::from_ymd(2024, 1, 15).unwrap()
    }

    fn with_dates(mut reset: MarkToMarketReset, dates: Vec<Date>) -> MarkToMarketReset {
        reset.reset_dates = dates;
        reset
    }

    #[test]
    fn test_fx_forward_parity() {
        let spot = Arc::new(SimpleQuote::new(1.10));
        let base = FlatForwardCurve::new(today(), 0.03);
        let quote = FlatForwardCurve::new(today(), 0.05);
        let one_year = today().add_days(365);

        let reset = MarkToMarketReset::from_flag(spot, false);
        let fwd = reset.fx_forward(one_year, &base, &quote).unwrap();
        assert_relative_eq!(fwd, 1.10 * 0.02_f64.exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_normalized_notionals() {
        let spot: Arc<dyn Quote> = Arc::new(SimpleQuote::new(150.0));
        let base = FlatForwardCurve::new(today(), 0.04);
        let quote = FlatForwardCurve::new(today(), 0.01);
        let dates = vec![today(), today().add_days(365)];

        let on_quote = with_dates(MarkToMarketReset::new(spot.clone(), LegSide::Quote), dates.clone());
        let notionals = on_quote.reset_notionals(&base, &quote).unwrap();
        assert_relative_eq!(notionals[0], 1.0, epsilon = 1e-15);
        assert_relative_eq!(notionals[1], (-0.03_f64).exp(), epsilon = 1e-14);

        let on_base = with_dates(MarkToMarketReset::new(spot, LegSide::Base), dates);
        let notionals = on_base.reset_notionals(&base, &quote).unwrap();
        assert_relative_eq!(notionals[1], 0.03_f64.exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_invalid_spot() {
        let spot = Arc::new(SimpleQuote::empty());
        let curve = FlatForwardCurve::new(today(), 0.02);
        let reset = with_dates(MarkToMarketReset::new(spot.clone(), LegSide::Quote), vec![today()]);

        assert!(matches!(
            reset.reset_notionals(&curve, &curve),
            Err(CurveError::MissingQuote { .. })
        ));

        spot.set_value(-1.0);
        assert!(matches!(
            reset.reset_notionals(&curve, &curve),
            Err(CurveError::NumericalFailure { .. })
        ));
        assert_eq!(reset.version(), 1);
    }
}
