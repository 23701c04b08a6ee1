//! Floating-rate coupon.

use std::sync::Arc;

use xccy_core::types::Date;

use crate::error::CurveResult;
use crate::index::IborIndex;

/// One accrual period of a floating leg.
///
/// The coupon pays `nominal * (fixing + spread) * accrual_period` on the
/// payment date. The fixing is looked up or forecast each time [`rate`](Self::rate)
/// is called, so the coupon follows its index's forecast curve.
#[derive(Debug, Clone)]
pub struct FloatingCoupon {
    payment_date: Date,
    accrual_start: Date,
    accrual_end: Date,
    fixing_date: Date,
    nominal: f64,
    spread: f64,
    accrual_period: f64,
    index: Arc<IborIndex>,
}

impl FloatingCoupon {
    /// Creates a coupon accruing between two dates, paid at accrual end.
    ///
    /// The fixing date and accrual period follow the index conventions.
    #[must_use]
    pub fn new(
        accrual_start: Date,
        accrual_end: Date,
        nominal: f64,
        spread: f64,
        index: Arc<IborIndex>,
    ) -> Self {
        Self {
            payment_date: accrual_end,
            accrual_start,
            accrual_end,
            fixing_date: index.fixing_date(accrual_start),
            nominal,
            spread,
            accrual_period: index.day_count().year_fraction(accrual_start, accrual_end),
            index,
        }
    }

    /// Payment date.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Accrual start date.
    #[must_use]
    pub fn accrual_start(&self) -> Date {
        self.accrual_start
    }

    /// Accrual end date.
    #[must_use]
    pub fn accrual_end(&self) -> Date {
        self.accrual_end
    }

    /// Index fixing date.
    #[must_use]
    pub fn fixing_date(&self) -> Date {
        self.fixing_date
    }

    /// Coupon notional.
    #[must_use]
    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    /// Spread over the index fixing.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Accrual year fraction in the index day count.
    #[must_use]
    pub fn accrual_period(&self) -> f64 {
        self.accrual_period
    }

    /// The underlying index.
    #[must_use]
    pub fn index(&self) -> &Arc<IborIndex> {
        &self.index
    }

    /// Index fixing for this coupon.
    pub fn index_fixing(&self) -> CurveResult<f64> {
        self.index
            .fixing(self.fixing_date, self.accrual_start, self.accrual_end)
    }

    /// Coupon rate: index fixing plus spread.
    pub fn rate(&self) -> CurveResult<f64> {
        Ok(self.index_fixing()? + self.spread)
    }

    /// Coupon amount paid on the payment date.
    pub fn amount(&self) -> CurveResult<f64> {
        Ok(self.nominal * self.rate()? * self.accrual_period)
    }
}
