//! Ibor-style floating rate indices.
//!
//! An [`IborIndex`] knows its fixing conventions, stores historical fixings
//! and forecasts future fixings off an optional forecast curve.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use xccy_core::calendars::{BusinessDayConvention, Calendar, TargetCalendar};
use xccy_core::daycounts::DayCountConvention;
use xccy_core::types::{Currency, Date, Period};

use crate::error::{ensure_finite, CurveError, CurveResult};
use crate::traits::Curve;

/// A term floating-rate index such as Euribor 3M.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use xccy_core::prelude::*;
/// use xccy_curves::prelude::*;
///
/// let today = Date::from_ymd(2024, 1, 15).unwrap();
/// let index = IborIndex::euribor(Period::months(3))
///     .with_forecast_curve(Arc::new(FlatForwardCurve::new(today, 0.03)));
///
/// assert_eq!(index.name(), "Euribor3M");
/// let start = today.add_days(30);
/// let end = start.add_months(3).unwrap();
/// let rate = index.fixing(index.fixing_date(start), start, end).unwrap();
///
/// // Simple ACT/360 forward off the continuously compounded curve
/// let days = start.days_between(&end) as f64;
/// let expected = ((0.03 * days / 365.0).exp() - 1.0) / (days / 360.0);
/// assert!((rate - expected).abs() < 1e-12);
/// ```
pub struct IborIndex {
    family: String,
    currency: Currency,
    tenor: Period,
    fixing_days: u32,
    fixing_calendar: Arc<dyn Calendar>,
    convention: BusinessDayConvention,
    end_of_month: bool,
    day_count: DayCountConvention,
    forecast_curve: Option<Arc<dyn Curve>>,
    fixings: RwLock<BTreeMap<Date, f64>>,
}

impl IborIndex {
    /// Creates an index with Modified Following, no end-of-month rule and ACT/360.
    #[must_use]
    pub fn new(
        family: impl Into<String>,
        currency: Currency,
        tenor: Period,
        fixing_days: u32,
        fixing_calendar: Arc<dyn Calendar>,
    ) -> Self {
        Self {
            family: family.into(),
            currency,
            tenor,
            fixing_days,
            fixing_calendar,
            convention: BusinessDayConvention::ModifiedFollowing,
            end_of_month: false,
            day_count: DayCountConvention::Act360,
            forecast_curve: None,
            fixings: RwLock::new(BTreeMap::new()),
        }
    }

    /// Euribor on the TARGET calendar with two fixing days.
    #[must_use]
    pub fn euribor(tenor: Period) -> Self {
        Self::new("Euribor", Currency::EUR, tenor, 2, Arc::new(TargetCalendar))
    }

    /// Sets the business day convention.
    #[must_use]
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Sets the end-of-month rule.
    #[must_use]
    pub fn with_end_of_month(mut self, eom: bool) -> Self {
        self.end_of_month = eom;
        self
    }

    /// Sets the accrual day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the curve used to forecast future fixings.
    #[must_use]
    pub fn with_forecast_curve(mut self, curve: Arc<dyn Curve>) -> Self {
        self.forecast_curve = Some(curve);
        self
    }

    /// Index name, e.g. `Euribor3M`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}{}", self.family, self.tenor)
    }

    /// Index family, e.g. `Euribor`.
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Index currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Index tenor.
    #[must_use]
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// Business days between fixing and value date.
    #[must_use]
    pub fn fixing_days(&self) -> u32 {
        self.fixing_days
    }

    /// Fixing calendar.
    #[must_use]
    pub fn fixing_calendar(&self) -> &Arc<dyn Calendar> {
        &self.fixing_calendar
    }

    /// Business day convention.
    #[must_use]
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// End-of-month rule.
    #[must_use]
    pub fn end_of_month(&self) -> bool {
        self.end_of_month
    }

    /// Accrual day count.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Forecast curve, if set.
    #[must_use]
    pub fn forecast_curve(&self) -> Option<&Arc<dyn Curve>> {
        self.forecast_curve.as_ref()
    }

    /// Fixing date for a coupon starting on `value_date`.
    #[must_use]
    pub fn fixing_date(&self, value_date: Date) -> Date {
        self.fixing_calendar
            .advance_business_days(value_date, -(self.fixing_days as i32))
    }

    /// Value date for a fixing on `fixing_date`.
    #[must_use]
    pub fn value_date(&self, fixing_date: Date) -> Date {
        self.fixing_calendar
            .advance_business_days(fixing_date, self.fixing_days as i32)
    }

    /// Stores a historical fixing, replacing any previous value.
    pub fn add_fixing(&self, fixing_date: Date, value: f64) {
        self.fixings.write().insert(fixing_date, value);
    }

    /// Removes all stored fixings.
    pub fn clear_fixings(&self) {
        self.fixings.write().clear();
    }

    /// Returns the stored fixing for a date.
    #[must_use]
    pub fn past_fixing(&self, fixing_date: Date) -> Option<f64> {
        self.fixings.read().get(&fixing_date).copied()
    }

    /// Returns the fixing for a coupon accruing from `value_start` to `value_end`.
    ///
    /// Fixings before the forecast curve's reference date must be stored.
    /// A fixing on the reference date uses the stored value when present.
    /// Later fixings are forecast as the simple forward over the accrual period.
    ///
    /// # Errors
    ///
    /// - `MissingFixing` for a past fixing absent from the store
    /// - `ForecastCurveNotSet` when a forecast is needed and no curve is set
    /// - `NumericalFailure` if the forecast is not finite
    pub fn fixing(&self, fixing_date: Date, value_start: Date, value_end: Date) -> CurveResult<f64> {
        let Some(curve) = self.forecast_curve.as_ref() else {
            return self.past_fixing(fixing_date).ok_or_else(|| {
                CurveError::ForecastCurveNotSet { index: self.name() }
            });
        };

        let today = curve.reference_date();
        if fixing_date < today {
            return self
                .past_fixing(fixing_date)
                .ok_or_else(|| CurveError::missing_fixing(self.name(), fixing_date));
        }
        if fixing_date == today {
            if let Some(stored) = self.past_fixing(fixing_date) {
                return Ok(stored);
            }
        }

        self.forecast(curve.as_ref(), value_start, value_end)
    }

    /// Forecasts the simple forward rate between two dates.
    pub fn forecast_fixing(&self, value_start: Date, value_end: Date) -> CurveResult<f64> {
        let curve = self
            .forecast_curve
            .as_ref()
            .ok_or_else(|| CurveError::ForecastCurveNotSet { index: self.name() })?;
        self.forecast(curve.as_ref(), value_start, value_end)
    }

    fn forecast(&self, curve: &dyn Curve, start: Date, end: Date) -> CurveResult<f64> {
        let tau = self.day_count.year_fraction(start, end);
        if !(tau > 0.0) {
            return Err(CurveError::invalid_configuration(format!(
                "{} forecast period {start} to {end} is empty",
                self.name()
            )));
        }
        let df_start = curve.discount_factor_at(start)?;
        let df_end = curve.discount_factor_at(end)?;
        ensure_finite((df_start / df_end - 1.0) / tau, || {
            format!("{} forecast from {start} to {end}", self.name())
        })
    }
}

impl fmt::Debug for IborIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IborIndex")
            .field("name", &self.name())
            .field("currency", &self.currency)
            .field("fixing_days", &self.fixing_days)
            .field("calendar", &self.fixing_calendar.name())
            .field("convention", &self.convention)
            .field("end_of_month", &self.end_of_month)
            .field("day_count", &self.day_count)
            .field("has_forecast_curve", &self.forecast_curve.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatForwardCurve;
    use approx::assert_relative_eq;

    fn today() -> Date {
        Date::from_ymd(2024, 1, 15).unwrap()
    }

    fn euribor() -> IborIndex {
        IborIndex::euribor(Period::months(3))
            .with_forecast_curve(Arc::new(FlatForwardCurve::new(today(), 0.03)))
    }

    #[test]
    fn test_forecast_is_simple_forward() {
        let index = euribor();
        let start = Date::from_ymd(2024, 4, 17).unwrap();
        let end = Date::from_ymd(2024, 7, 17).unwrap();

        let tau = 91.0 / 360.0;
        let t1 = index.forecast_curve().unwrap().year_fraction(start);
        let t2 = index.forecast_curve().unwrap().year_fraction(end);
        let expected = ((0.03 * (t2 - t1)).exp() - 1.0) / tau;

        let rate = index.fixing(index.fixing_date(start), start, end).unwrap();
        assert_relative_eq!(rate, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_past_fixings() {
        let index = euribor();
        let past = Date::from_ymd(2024, 1, 10).unwrap();
        let start = index.value_date(past);
        let end = start.add_months(3).unwrap();

        assert!(matches!(
            index.fixing(past, start, end),
            Err(CurveError::MissingFixing { .. })
        ));

        index.add_fixing(past, 0.0391);
        assert_eq!(index.fixing(past, start, end).unwrap(), 0.0391);
    }

    #[test]
    fn test_todays_fixing_prefers_store() {
        let index = euribor();
        let start = index.value_date(today());
        let end = start.add_months(3).unwrap();

        let forecast = index.fixing(today(), start, end).unwrap();
        assert!((forecast - 0.0391).abs() > 1e-4);

        index.add_fixing(today(), 0.0391);
        assert_eq!(index.fixing(today(), start, end).unwrap(), 0.0391);
    }

    #[test]
    fn test_no_forecast_curve() {
        let index = IborIndex::euribor(Period::months(6));
        let start = Date::from_ymd(2024, 4, 17).unwrap();
        let end = Date::from_ymd(2024, 10, 17).unwrap();
        assert!(matches!(
            index.fixing(index.fixing_date(start), start, end),
            Err(CurveError::ForecastCurveNotSet { .. })
        ));
    }

    #[test]
    fn test_fixing_calendar() {
        let index = euribor();
        // Monday 2024-04-01 is Easter Monday; two TARGET days before is Wednesday
        let value = Date::from_ymd(2024, 4, 2).unwrap();
        assert_eq!(index.fixing_date(value), Date::from_ymd(2024, 3, 27).unwrap());
        assert_eq!(index.name(), "Euribor3M");
    }
}
