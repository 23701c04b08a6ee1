//! Accrual schedule generation for swap legs.
//!
//! Schedules are generated backward from the termination date at a fixed
//! tenor, so any irregular period is a short front stub. Each date is
//! computed as `termination - i * tenor` rather than by repeated stepping,
//! so month-end days do not drift.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use xccy_core::prelude::*;
//!
//! let config = ScheduleConfig::new(
//!     Date::from_ymd(2024, 3, 19).unwrap(),
//!     Date::from_ymd(2029, 3, 19).unwrap(),
//!     Period::months(3),
//!     Arc::new(TargetCalendar),
//! )
//! .with_convention(BusinessDayConvention::ModifiedFollowing);
//!
//! let schedule = Schedule::generate(&config).unwrap();
//! assert_eq!(schedule.periods().count(), 20);
//! ```

use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::calendars::{BusinessDayConvention, Calendar};
use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Period};

/// Configuration for schedule generation.
#[derive(Clone)]
pub struct ScheduleConfig {
    /// First accrual start date.
    pub effective_date: Date,
    /// Last accrual end date (before adjustment).
    pub termination_date: Date,
    /// Accrual period length.
    pub tenor: Period,
    /// Calendar for business day adjustments.
    pub calendar: Arc<dyn Calendar>,
    /// Business day adjustment convention.
    pub convention: BusinessDayConvention,
    /// End-of-month rule.
    pub end_of_month: bool,
}

impl ScheduleConfig {
    /// Creates a new schedule configuration with Following adjustment and no EOM rule.
    #[must_use]
    pub fn new(
        effective_date: Date,
        termination_date: Date,
        tenor: Period,
        calendar: Arc<dyn Calendar>,
    ) -> Self {
        Self {
            effective_date,
            termination_date,
            tenor,
            calendar,
            convention: BusinessDayConvention::Following,
            end_of_month: false,
        }
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
}

impl fmt::Debug for ScheduleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleConfig")
            .field("effective_date", &self.effective_date)
            .field("termination_date", &self.termination_date)
            .field("tenor", &self.tenor)
            .field("calendar", &self.calendar.name())
            .field("convention", &self.convention)
            .field("end_of_month", &self.end_of_month)
            .finish()
    }
}

/// An immutable accrual schedule.
///
/// Holds both unadjusted and adjusted dates; accrual periods run between
/// consecutive adjusted dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    unadjusted_dates: Vec<Date>,
    adjusted_dates: Vec<Date>,
    tenor: Period,
    convention: BusinessDayConvention,
}

impl Schedule {
    /// Generates a schedule from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSchedule` if the termination date is not
    /// after the effective date or the tenor is not positive.
    pub fn generate(config: &ScheduleConfig) -> CoreResult<Self> {
        if config.termination_date <= config.effective_date {
            return Err(CoreError::invalid_schedule(format!(
                "termination {} must be after effective {}",
                config.termination_date, config.effective_date
            )));
        }
        if !config.tenor.is_positive() {
            return Err(CoreError::invalid_schedule(format!(
                "tenor {} must be positive",
                config.tenor
            )));
        }

        let calendar = config.calendar.as_ref();
        let termination = config.termination_date;
        let eom = config.end_of_month
            && (termination.is_end_of_month() || calendar.is_end_of_month(termination));

        let mut unadjusted = vec![termination];
        let mut i = 1;
        loop {
            let step = config.tenor.checked_times(-i).ok_or_else(|| {
                CoreError::invalid_schedule(format!("too many {} periods", config.tenor))
            })?;
            let mut date = termination.add_period(&step)?;
            if eom {
                date = date.end_of_month();
            }
            if date <= config.effective_date {
                break;
            }
            unadjusted.push(date);
            i += 1;
        }
        unadjusted.push(config.effective_date);
        unadjusted.reverse();

        let roll_to_month_end = eom && config.convention != BusinessDayConvention::Unadjusted;
        let mut pairs: Vec<(Date, Date)> = unadjusted
            .iter()
            .enumerate()
            .map(|(k, &date)| {
                // The effective date is never rolled to month end.
                let adjusted = if roll_to_month_end && k > 0 {
                    calendar.end_of_month(date)
                } else {
                    calendar.adjust(date, config.convention)
                };
                (date, adjusted)
            })
            .collect();
        pairs.dedup_by(|next, prev| next.1 == prev.1);

        trace!(
            "generated {} dates from {} to {} at {}",
            pairs.len(),
            config.effective_date,
            termination,
            config.tenor
        );

        Ok(Self {
            unadjusted_dates: pairs.iter().map(|p| p.0).collect(),
            adjusted_dates: pairs.iter().map(|p| p.1).collect(),
            tenor: config.tenor,
            convention: config.convention,
        })
    }

    /// Returns the unadjusted schedule dates.
    #[must_use]
    pub fn unadjusted_dates(&self) -> &[Date] {
        &self.unadjusted_dates
    }

    /// Returns the adjusted schedule dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.adjusted_dates
    }

    /// Returns an iterator over the accrual periods (start, end) using adjusted dates.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.adjusted_dates.windows(2).map(|w| (w[0], w[1]))
    }

    /// First adjusted date.
    #[must_use]
    pub fn start_date(&self) -> Option<Date> {
        self.adjusted_dates.first().copied()
    }

    /// Last adjusted date.
    #[must_use]
    pub fn end_date(&self) -> Option<Date> {
        self.adjusted_dates.last().copied()
    }

    /// Number of dates in the schedule.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjusted_dates.len()
    }

    /// Returns true if the schedule holds no dates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjusted_dates.is_empty()
    }

    /// Accrual tenor the schedule was generated with.
    #[must_use]
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// Business day convention the schedule was adjusted with.
    #[must_use]
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{TargetCalendar, WeekendCalendar};
    use proptest::prelude::*;

    fn config(start: Date, end: Date, tenor: Period) -> ScheduleConfig {
        ScheduleConfig::new(start, end, tenor, Arc::new(TargetCalendar))
            .with_convention(BusinessDayConvention::ModifiedFollowing)
    }

    #[test]
    fn test_regular_quarterly() {
        let start = Date::from_ymd(2024, 3, 19).unwrap();
        let end = Date::from_ymd(2029, 3, 19).unwrap();
        let schedule = Schedule::generate(&config(start, end, Period::months(3))).unwrap();

        assert_eq!(schedule.len(), 21);
        assert_eq!(schedule.start_date(), Some(start));
        assert_eq!(schedule.end_date(), Some(end));
        // 2024-06-19 is a Wednesday
        assert_eq!(schedule.dates()[1], Date::from_ymd(2024, 6, 19).unwrap());
    }

    #[test]
    fn test_short_front_stub() {
        let start = Date::from_ymd(2024, 2, 1).unwrap();
        let end = Date::from_ymd(2025, 3, 17).unwrap();
        let schedule = Schedule::generate(&config(start, end, Period::months(6))).unwrap();

        let unadjusted = schedule.unadjusted_dates();
        assert_eq!(unadjusted[0], start);
        assert_eq!(unadjusted[1], Date::from_ymd(2024, 3, 17).unwrap());
        assert_eq!(unadjusted[2], Date::from_ymd(2024, 9, 17).unwrap());
        // 2024-03-17 is a Sunday
        assert_eq!(schedule.dates()[1], Date::from_ymd(2024, 3, 18).unwrap());
    }

    #[test]
    fn test_end_of_month_rule() {
        let start = Date::from_ymd(2024, 2, 29).unwrap();
        let end = Date::from_ymd(2025, 2, 28).unwrap();
        let eom = config(start, end, Period::months(3)).with_end_of_month(true);
        let schedule = Schedule::generate(&eom).unwrap();

        let expected = [
            Date::from_ymd(2024, 2, 29).unwrap(),
            Date::from_ymd(2024, 5, 31).unwrap(),
            Date::from_ymd(2024, 8, 30).unwrap(), // 31st is a Saturday
            Date::from_ymd(2024, 11, 29).unwrap(), // 30th is a Saturday
            Date::from_ymd(2025, 2, 28).unwrap(),
        ];
        assert_eq!(schedule.dates(), &expected);
    }

    #[test]
    fn test_without_end_of_month_rule_day_is_kept() {
        let start = Date::from_ymd(2024, 2, 29).unwrap();
        let end = Date::from_ymd(2025, 2, 28).unwrap();
        let schedule = Schedule::generate(&config(start, end, Period::months(3))).unwrap();

        // No drift: each date is termination minus a multiple of 3M
        assert_eq!(
            schedule.unadjusted_dates()[1],
            Date::from_ymd(2024, 5, 28).unwrap()
        );
    }

    #[test]
    fn test_invalid_inputs() {
        let start = Date::from_ymd(2024, 3, 19).unwrap();
        assert!(Schedule::generate(&config(start, start, Period::months(3))).is_err());
        let end = Date::from_ymd(2025, 3, 19).unwrap();
        assert!(Schedule::generate(&config(start, end, Period::months(0))).is_err());
    }

    #[test]
    fn test_schedules_compare_by_value() {
        let start = Date::from_ymd(2024, 3, 19).unwrap();
        let end = Date::from_ymd(2026, 3, 19).unwrap();
        let quarterly = Schedule::generate(&config(start, end, Period::months(3))).unwrap();
        assert_eq!(
            quarterly,
            Schedule::generate(&config(start, end, Period::months(3))).unwrap()
        );
        assert_ne!(
            quarterly,
            Schedule::generate(&config(start, end, Period::months(6))).unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_schedule_is_increasing_and_on_business_days(
            offset in 0i64..2000,
            years in 1i32..12,
            months in prop::sample::select(vec![1, 3, 6, 12]),
            eom in any::<bool>(),
        ) {
            let start = Date::from_ymd(2020, 1, 1).unwrap().add_days(offset);
            let end = start.add_years(years).unwrap();
            let cfg = ScheduleConfig::new(start, end, Period::months(months), Arc::new(WeekendCalendar))
                .with_convention(BusinessDayConvention::ModifiedFollowing)
                .with_end_of_month(eom);
            let schedule = Schedule::generate(&cfg).unwrap();

            prop_assert!(schedule.len() >= 2);
            prop_assert!(schedule.dates().windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(schedule.unadjusted_dates()[0], start);
            for &date in schedule.dates() {
                prop_assert!(WeekendCalendar.is_business_day(date));
            }
        }
    }
}
