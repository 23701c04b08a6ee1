//! Floating coupons, legs and leg valuation.
//!
//! A cross-currency basis swap leg is a strip of floating coupons on one
//! index, with a notional exchanged at the start and returned at maturity.
//! [`build_cross_currency_leg`] builds the coupons; the valuation functions
//! discount them together with the notional exchanges.

mod coupon;
mod leg;
mod valuation;

pub use coupon::FloatingCoupon;
pub use leg::{build_cross_currency_leg, Leg};
pub use valuation::{value_constant_notional_leg, value_resetting_leg, LegValuation};
