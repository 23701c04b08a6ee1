//! Present value of cross-currency legs.
//!
//! Values are per unit of the leg's inception notional, in the leg's own
//! currency, discounted on whichever curve the caller resolved for it.
//!
//! ```text
//! constant notional N:
//!   coupons   = Σ N·rate_i·τ_i·P(pay_i)
//!   exchanges = N·(P(final) − P(initial))
//!   bps       = Σ N·τ_i·P(pay_i)
//!
//! resetting notionals a_i:
//!   coupons   = Σ a_i·rate_i·τ_i·P(end_i)
//!   exchanges = Σ a_i·(P(end_i) − P(start_i))
//!   bps       = Σ a_i·τ_i·P(end_i)
//! ```
//!
//! With every `a_i = N` the resetting exchanges telescope to the constant ones.

use xccy_core::types::Date;

use super::Leg;
use crate::error::{ensure_finite, CurveError, CurveResult};
use crate::traits::Curve;

/// Components of a leg's present value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LegValuation {
    /// PV of the coupon payments.
    pub coupons: f64,
    /// PV of the notional exchanges (the MtM adjustment for a resetting leg).
    pub exchanges: f64,
    /// PV of one unit of spread paid on every coupon.
    pub bps: f64,
}

impl LegValuation {
    /// Total leg value.
    #[must_use]
    pub fn npv(&self) -> f64 {
        self.coupons + self.exchanges
    }
}

fn discount(curve: &dyn Curve, date: Date) -> CurveResult<f64> {
    ensure_finite(curve.discount_factor_at(date)?, || {
        format!("discount factor at {date}")
    })
}

/// Values a constant-notional leg with notional exchanges on the given dates.
///
/// Coupons paid before the curve's reference date are ignored.
pub fn value_constant_notional_leg(
    leg: &Leg,
    initial_exchange: Date,
    final_exchange: Date,
    curve: &dyn Curve,
) -> CurveResult<LegValuation> {
    let reference = curve.reference_date();
    let mut valuation = LegValuation::default();

    for coupon in leg.iter().filter(|c| c.payment_date() >= reference) {
        let df = discount(curve, coupon.payment_date())?;
        valuation.coupons += coupon.amount()? * df;
        valuation.bps += coupon.nominal() * coupon.accrual_period() * df;
    }

    let notional = leg.notional();
    valuation.exchanges =
        notional * (discount(curve, final_exchange)? - discount(curve, initial_exchange)?);

    ensure_finite(valuation.npv(), || "leg value".to_string())?;
    Ok(valuation)
}

/// Values a leg whose notional resets every period.
///
/// `notionals[i]` applies to the i-th coupon; each period carries its own
/// notional exchange, paid at accrual start and returned at accrual end.
/// Periods paid before the curve's reference date are ignored, as is the
/// opening exchange of a period already under way.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if the notionals do not match the coupons,
/// and `NumericalFailure` for a non-finite notional or discount factor.
pub fn value_resetting_leg(
    leg: &Leg,
    notionals: &[f64],
    curve: &dyn Curve,
) -> CurveResult<LegValuation> {
    if notionals.len() != leg.len() {
        return Err(CurveError::invalid_configuration(format!(
            "{} reset notionals for {} coupons",
            notionals.len(),
            leg.len()
        )));
    }

    let reference = curve.reference_date();
    let mut valuation = LegValuation::default();

    for (coupon, &notional) in leg.iter().zip(notionals) {
        let notional = ensure_finite(notional, || {
            format!("reset notional at {}", coupon.accrual_start())
        })?;
        if coupon.payment_date() < reference {
            continue;
        }

        let df_end = discount(curve, coupon.accrual_end())?;
        valuation.exchanges += notional * df_end;
        if coupon.accrual_start() >= reference {
            valuation.exchanges -= notional * discount(curve, coupon.accrual_start())?;
        }
        valuation.coupons += notional * df_end * coupon.rate()? * coupon.accrual_period();
        valuation.bps += notional * df_end * coupon.accrual_period();
    }

    ensure_finite(valuation.npv(), || "resetting leg value".to_string())?;
    Ok(valuation)
}
