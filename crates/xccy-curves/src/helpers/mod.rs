//! Rate helpers for bootstrapping discount curves.
//!
//! A rate helper ties one market quote to the curve being built: the
//! bootstrap driver binds a candidate curve with
//! [`set_term_structure`](RateHelper::set_term_structure) and adjusts it until
//! [`implied_quote`](RateHelper::implied_quote) matches [`quote`](RateHelper::quote).
//!
//! - [`CrossCurrencyBasisSwapRateHelper`]: constant-notional or mark-to-market
//!   cross-currency basis swaps
//! - [`DiscountResolver`]: per-leg discount curve selection
//! - [`NotionalReset`] / [`MarkToMarketReset`]: per-period notional resets

mod discount;
mod reset;
mod xccy;

pub use discount::{DiscountMode, DiscountResolver, LegSide};
pub use reset::{MarkToMarketReset, NotionalReset};
pub use xccy::{CrossCurrencyBasisSwapRateHelper, MAX_FIXING_DAYS, MAX_SWAP_TENOR};

use std::fmt;
use std::sync::Arc;

use xccy_core::types::Date;

use crate::error::CurveResult;
use crate::traits::Curve;

/// The concrete kind of a rate helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HelperKind {
    /// Cross-currency basis swap with constant notionals.
    ConstantNotional,
    /// Cross-currency basis swap with one leg resetting to the FX forward.
    MarkToMarket {
        /// The leg whose notional resets.
        resettable: LegSide,
    },
}

impl fmt::Display for HelperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HelperKind::ConstantNotional => write!(f, "Constant Notional"),
            HelperKind::MarkToMarket { resettable } => {
                write!(f, "Mark-to-Market ({resettable} leg resets)")
            }
        }
    }
}

/// A borrowed, typed view of a helper handed to visitors.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum HelperView<'a> {
    /// A constant-notional cross-currency helper.
    ConstantNotional(&'a CrossCurrencyBasisSwapRateHelper),
    /// A mark-to-market cross-currency helper and its reset strategy.
    MarkToMarket {
        /// The helper.
        helper: &'a CrossCurrencyBasisSwapRateHelper,
        /// Its notional reset strategy.
        reset: &'a dyn NotionalReset,
    },
}

impl<'a> HelperView<'a> {
    /// The cross-currency helper behind the view.
    #[must_use]
    pub fn helper(&self) -> &'a CrossCurrencyBasisSwapRateHelper {
        match *self {
            HelperView::ConstantNotional(helper) | HelperView::MarkToMarket { helper, .. } => {
                helper
            }
        }
    }
}

/// The contract between a bootstrap driver and a quoted instrument.
pub trait RateHelper: Send + Sync {
    /// The market quote.
    ///
    /// # Errors
    ///
    /// `MissingQuote` if the quote is unset or not finite.
    fn quote(&self) -> CurveResult<f64>;

    /// The quote implied by the bound curve.
    ///
    /// # Errors
    ///
    /// `TermStructureNotSet` if no curve is bound; `NumericalFailure` if the
    /// bound curve produces non-finite values.
    fn implied_quote(&self) -> CurveResult<f64>;

    /// `quote - implied_quote`, the residual a driver drives to zero.
    fn quote_error(&self) -> CurveResult<f64> {
        Ok(self.quote()? - self.implied_quote()?)
    }

    /// First date the instrument depends on.
    fn earliest_date(&self) -> Date;

    /// Date the helper anchors to on the bootstrapped curve.
    fn pillar_date(&self) -> Date;

    /// Last payment date.
    fn maturity_date(&self) -> Date;

    /// Binds the curve under construction.
    fn set_term_structure(&mut self, curve: Arc<dyn Curve>) -> CurveResult<()>;

    /// Regenerates dates for a new evaluation date.
    fn initialize_dates(&mut self, evaluation_date: Date) -> CurveResult<()>;

    /// The concrete kind of helper.
    fn kind(&self) -> HelperKind;

    /// Calls the visitor with a typed view of this helper.
    fn accept(&self, visitor: &mut dyn FnMut(HelperView<'_>));

    /// Human-readable description.
    fn description(&self) -> String;
}
