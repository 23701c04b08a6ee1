//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait with date rolling and business day arithmetic
//! - [`WeekendCalendar`] and the [`TargetCalendar`] for EUR settlement
//! - [`CalendarId`], a serializable calendar selector for configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

mod conventions;
mod target;

pub use conventions::{adjust, BusinessDayConvention};
pub use target::{easter_sunday, TargetCalendar};

use crate::error::CoreError;
use crate::types::Date;

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays
/// for a specific market or jurisdiction.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days.
    ///
    /// With `days == 0` the date is rolled forward to a business day.
    fn advance_business_days(&self, date: Date, days: i32) -> Date {
        if days == 0 {
            return self.next_business_day(date);
        }

        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days > 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        conventions::following(date, self)
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        conventions::preceding(date, self)
    }

    /// Returns the last business day of the date's month.
    fn end_of_month(&self, date: Date) -> Date {
        self.previous_business_day(date.end_of_month())
    }

    /// Returns true if the date is the last business day of its month.
    fn is_end_of_month(&self, date: Date) -> bool {
        date.month() != self.next_business_day(date.add_days(1)).month()
    }
}

/// A simple weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekends Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Serializable calendar selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CalendarId {
    /// Saturdays and Sundays only.
    #[default]
    WeekendsOnly,
    /// TARGET (euro settlement) calendar.
    Target,
}

impl CalendarId {
    /// Creates the calendar this identifier names.
    #[must_use]
    pub fn to_calendar(self) -> Arc<dyn Calendar> {
        match self {
            CalendarId::WeekendsOnly => Arc::new(WeekendCalendar),
            CalendarId::Target => Arc::new(TargetCalendar),
        }
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarId::WeekendsOnly => write!(f, "WeekendsOnly"),
            CalendarId::Target => write!(f, "TARGET"),
        }
    }
}

impl FromStr for CalendarId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WEEKENDSONLY" | "WEEKENDS" | "WEEKEND" => Ok(CalendarId::WeekendsOnly),
            "TARGET" | "TARGET2" | "EUR" => Ok(CalendarId::Target),
            _ => Err(CoreError::unknown_convention(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;

        assert!(cal.is_business_day(Date::from_ymd(2025, 1, 6).unwrap()));
        assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 4).unwrap()));
        assert!(cal.is_holiday(Date::from_ymd(2025, 1, 5).unwrap()));
    }

    #[test]
    fn test_advance_business_days() {
        let cal = WeekendCalendar;

        // Friday + 2 business days = Tuesday
        let friday = Date::from_ymd(2025, 1, 3).unwrap();
        assert_eq!(
            cal.advance_business_days(friday, 2),
            Date::from_ymd(2025, 1, 7).unwrap()
        );
        assert_eq!(
            cal.advance_business_days(friday, -1),
            Date::from_ymd(2025, 1, 2).unwrap()
        );

        // Zero days rolls a weekend forward
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert_eq!(
            cal.advance_business_days(saturday, 0),
            Date::from_ymd(2025, 1, 6).unwrap()
        );
    }

    #[test]
    fn test_business_end_of_month() {
        let cal = WeekendCalendar;

        // 2024-08-31 is a Saturday
        let friday = Date::from_ymd(2024, 8, 30).unwrap();
        assert!(cal.is_end_of_month(friday));
        assert_eq!(cal.end_of_month(Date::from_ymd(2024, 8, 5).unwrap()), friday);
        assert!(!cal.is_end_of_month(Date::from_ymd(2024, 8, 29).unwrap()));
    }

    #[test]
    fn test_calendar_id() {
        assert_eq!("target".parse::<CalendarId>().unwrap(), CalendarId::Target);
        assert_eq!(CalendarId::Target.to_calendar().name(), "TARGET");
        assert_eq!(CalendarId::default().to_calendar().name(), "Weekends Only");
        assert!("moon".parse::<CalendarId>().is_err());
    }
}
