//! Core traits for discount curves.
//!
//! This module defines the [`Curve`] trait consumed by the legs, the
//! rate helpers and the bootstrap driver. Implementations only need to
//! provide discount factors and their date range; rates are derived.

use xccy_core::Date;

use crate::error::CurveResult;

/// The core trait for discount curves.
///
/// # Required Methods
///
/// - [`discount_factor`](Curve::discount_factor): the primary method for discounting
/// - [`reference_date`](Curve::reference_date): the curve's valuation date
/// - [`max_date`](Curve::max_date): the last pillar date
///
/// # Example
///
/// ```rust
/// use xccy_core::Date;
/// use xccy_curves::prelude::*;
///
/// let today = Date::from_ymd(2024, 1, 15).unwrap();
/// let curve = FlatForwardCurve::new(today, 0.02);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - (-0.02_f64).exp()).abs() < 1e-15);
/// ```
pub trait Curve: Send + Sync {
    /// Returns the discount factor from the reference date to time `t`.
    ///
    /// Returns 1.0 for t ≤ 0.
    fn discount_factor(&self, t: f64) -> CurveResult<f64>;

    /// Returns the curve's reference (valuation) date.
    ///
    /// All times are measured from this date.
    fn reference_date(&self) -> Date;

    /// Returns the maximum date backed by curve data.
    fn max_date(&self) -> Date;

    /// Returns the year fraction from the reference date to the given date.
    ///
    /// Uses ACT/365 Fixed convention.
    fn year_fraction(&self, date: Date) -> f64 {
        self.reference_date().days_between(&date) as f64 / 365.0
    }

    /// Returns the discount factor for a specific date.
    fn discount_factor_at(&self, date: Date) -> CurveResult<f64> {
        self.discount_factor(self.year_fraction(date))
    }

    /// Returns the continuously compounded zero rate at time `t`.
    fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        if t <= 0.0 {
            return Ok(0.0);
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Returns the simply-compounded forward rate between times `t1` and `t2`.
    ///
    /// `F(t1, t2) = (DF(t1) / DF(t2) - 1) / (t2 - t1)`
    fn forward_rate(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if t2 <= t1 {
            return Ok(0.0);
        }

        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;

        if df2 <= 0.0 {
            return Ok(0.0);
        }

        Ok((df1 / df2 - 1.0) / (t2 - t1))
    }

    /// Returns the forward rate between two dates.
    fn forward_rate_between(&self, start: Date, end: Date) -> CurveResult<f64> {
        self.forward_rate(self.year_fraction(start), self.year_fraction(end))
    }
}

impl<C: Curve + ?Sized> Curve for std::sync::Arc<C> {
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        (**self).discount_factor(t)
    }

    fn reference_date(&self) -> Date {
        (**self).reference_date()
    }

    fn max_date(&self) -> Date {
        (**self).max_date()
    }
}
