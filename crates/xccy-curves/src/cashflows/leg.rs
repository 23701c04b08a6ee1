//! Floating legs.

use std::sync::Arc;

use xccy_core::schedule::Schedule;
use xccy_core::types::Date;

use super::FloatingCoupon;
use crate::error::{CurveError, CurveResult};
use crate::index::IborIndex;

/// An ordered strip of floating coupons in one currency.
///
/// Coupons are kept in payment order.
#[derive(Debug, Clone)]
pub struct Leg {
    coupons: Vec<FloatingCoupon>,
    spread: f64,
}

impl Leg {
    /// Returns the coupons.
    #[must_use]
    pub fn coupons(&self) -> &[FloatingCoupon] {
        &self.coupons
    }

    /// Iterates over the coupons in payment order.
    pub fn iter(&self) -> std::slice::Iter<'_, FloatingCoupon> {
        self.coupons.iter()
    }

    /// Number of coupons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Returns true if the leg has no coupons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }

    /// First accrual start.
    #[must_use]
    pub fn start_date(&self) -> Option<Date> {
        self.coupons.iter().map(FloatingCoupon::accrual_start).min()
    }

    /// Last payment date.
    #[must_use]
    pub fn maturity_date(&self) -> Option<Date> {
        self.coupons.iter().map(FloatingCoupon::payment_date).max()
    }

    /// Notional of the first coupon.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.coupons.first().map_or(0.0, FloatingCoupon::nominal)
    }

    /// Spread added to every coupon.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Returns true if the coupons include a non-zero spread.
    #[must_use]
    pub fn carries_spread(&self) -> bool {
        self.spread != 0.0
    }
}

impl<'a> IntoIterator for &'a Leg {
    type Item = &'a FloatingCoupon;
    type IntoIter = std::slice::Iter<'a, FloatingCoupon>;

    fn into_iter(self) -> Self::IntoIter {
        self.coupons.iter()
    }
}

/// Builds a floating leg over a schedule.
///
/// Every accrual period becomes one coupon on `index` with the given
/// notional and a constant `basis` spread, paid at accrual end.
///
/// # Errors
///
/// Returns `EmptySchedule` if the schedule has no accrual period.
pub fn build_cross_currency_leg(
    schedule: &Schedule,
    index: &Arc<IborIndex>,
    notional: f64,
    basis: f64,
) -> CurveResult<Leg> {
    if schedule.len() < 2 {
        return Err(CurveError::EmptySchedule);
    }

    let coupons = schedule
        .periods()
        .map(|(start, end)| FloatingCoupon::new(start, end, notional, basis, Arc::clone(index)))
        .collect();

    Ok(Leg {
        coupons,
        spread: basis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use xccy_core::calendars::{BusinessDayConvention, TargetCalendar};
    use xccy_core::schedule::ScheduleConfig;
    use xccy_core::types::Period;

    fn schedule(years: i32) -> Schedule {
        let start = Date::from_ymd(2024, 1, 17).unwrap();
        let end = start.add_years(years).unwrap();
        let config = ScheduleConfig::new(start, end, Period::months(3), Arc::new(TargetCalendar))
            .with_convention(BusinessDayConvention::ModifiedFollowing);
        Schedule::generate(&config).unwrap()
    }

    #[test]
    fn test_leg_follows_schedule() {
        let index = Arc::new(IborIndex::euribor(Period::months(3)));
        let schedule = schedule(2);
        let leg = build_cross_currency_leg(&schedule, &index, 1.0, -0.0015).unwrap();

        assert_eq!(leg.len(), 8);
        assert_eq!(leg.start_date(), schedule.start_date());
        assert_eq!(leg.maturity_date(), schedule.end_date());
        assert!(leg.carries_spread());
        assert!(leg.iter().all(|c| c.spread() == -0.0015 && c.nominal() == 1.0));
        assert!(leg
            .coupons()
            .windows(2)
            .all(|w| w[0].accrual_end() == w[1].accrual_start()));
    }

    #[test]
    fn test_zero_spread_leg() {
        let index = Arc::new(IborIndex::euribor(Period::months(3)));
        let leg = build_cross_currency_leg(&schedule(1), &index, 1.0, 0.0).unwrap();
        assert!(!leg.carries_spread());
        assert_eq!(leg.notional(), 1.0);
    }

    #[test]
    fn test_degenerate_schedule_is_rejected() {
        // A weekend window collapses onto a single Monday
        let saturday = Date::from_ymd(2024, 1, 13).unwrap();
        let config = ScheduleConfig::new(
            saturday,
            saturday.add_days(1),
            Period::months(3),
            Arc::new(xccy_core::calendars::WeekendCalendar),
        );
        let schedule = Schedule::generate(&config).unwrap();
        assert_eq!(schedule.len(), 1);

        let index = Arc::new(IborIndex::euribor(Period::months(3)));
        assert!(matches!(
            build_cross_currency_leg(&schedule, &index, 1.0, 0.0),
            Err(CurveError::EmptySchedule)
        ));
    }
}
