//! Date type for schedule and curve calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use super::period::{Period, TimeUnit};
use crate::error::{CoreError, CoreResult};

/// A calendar date.
///
/// Newtype over `chrono::NaiveDate` with the month arithmetic and
/// end-of-month queries needed for swap schedules.
///
/// # Example
///
/// ```rust
/// use xccy_core::types::Date;
///
/// let date = Date::from_ymd(2024, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day of year (1-366).
    #[must_use]
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total_months =
            i64::from(self.year()) * 12 + i64::from(self.month()) - 1 + i64::from(months);
        let new_year = i32::try_from(total_months.div_euclid(12))
            .map_err(|_| CoreError::invalid_date(format!("{self} plus {months} months")))?;
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let new_day = self.day().min(days_in_month(new_year, new_month));

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds a number of years to the date, clamping Feb 29 to Feb 28.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is invalid.
    pub fn add_years(&self, years: i32) -> CoreResult<Self> {
        let months = years
            .checked_mul(12)
            .ok_or_else(|| CoreError::invalid_date(format!("{self} plus {years} years")))?;
        self.add_months(months)
    }

    /// Adds a period to the date.
    ///
    /// Days and weeks are calendar days; months and years use
    /// [`add_months`](Self::add_months) so month ends are clamped.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_period(&self, period: &Period) -> CoreResult<Self> {
        let n = period.length();
        match period.unit() {
            TimeUnit::Days => Ok(self.add_days(i64::from(n))),
            TimeUnit::Weeks => Ok(self.add_days(7 * i64::from(n))),
            TimeUnit::Months => self.add_months(n),
            TimeUnit::Years => self.add_years(n),
        }
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the last calendar day of the date's month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        self.add_days(i64::from(self.days_in_month() - self.day()))
    }

    /// Checks if the date is the last calendar day of its month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        _ => 28,
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Add<i64> for Date {
    type Output = Date;

    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Date;

    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_months_clamps_day() {
        let date = Date::from_ymd(2023, 1, 31).unwrap();
        assert_eq!(date.add_months(1).unwrap(), Date::from_ymd(2023, 2, 28).unwrap());
        assert_eq!(date.add_months(3).unwrap(), Date::from_ymd(2023, 4, 30).unwrap());
    }

    #[test]
    fn test_add_negative_months_across_year() {
        let date = Date::from_ymd(2024, 2, 15).unwrap();
        assert_eq!(date.add_months(-3).unwrap(), Date::from_ymd(2023, 11, 15).unwrap());
        assert_eq!(date.add_months(-14).unwrap(), Date::from_ymd(2022, 12, 15).unwrap());
    }

    #[test]
    fn test_add_years_leap_day() {
        let date = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(date.add_years(1).unwrap(), Date::from_ymd(2025, 2, 28).unwrap());
        assert_eq!(date.add_years(4).unwrap(), Date::from_ymd(2028, 2, 29).unwrap());
    }

    #[test]
    fn test_add_out_of_range_is_an_error() {
        let date = Date::from_ymd(2024, 2, 29).unwrap();
        assert!(date.add_years(200_000_000).is_err());
        assert!(date.add_months(i32::MAX).is_err());
        assert!(date.add_period(&Period::years(i32::MAX)).is_err());
    }

    #[test]
    fn test_add_period() {
        let date = Date::from_ymd(2024, 3, 15).unwrap();
        let cases = [
            ("2D", Date::from_ymd(2024, 3, 17).unwrap()),
            ("1W", Date::from_ymd(2024, 3, 22).unwrap()),
            ("3M", Date::from_ymd(2024, 6, 15).unwrap()),
            ("5Y", Date::from_ymd(2029, 3, 15).unwrap()),
        ];
        for (tenor, expected) in cases {
            let period: Period = tenor.parse().unwrap();
            assert_eq!(date.add_period(&period).unwrap(), expected, "{tenor}");
        }
    }

    #[test]
    fn test_end_of_month() {
        let date = Date::from_ymd(2024, 2, 10).unwrap();
        assert_eq!(date.end_of_month(), Date::from_ymd(2024, 2, 29).unwrap());
        assert!(date.end_of_month().is_end_of_month());
        assert!(!date.is_end_of_month());
    }

    #[test]
    fn test_arithmetic_operators() {
        let a = Date::from_ymd(2024, 1, 1).unwrap();
        let b = a + 31;
        assert_eq!(b, Date::from_ymd(2024, 2, 1).unwrap());
        assert_eq!(b - a, 31);
        assert_eq!(b - 31, a);
    }

    #[test]
    fn test_parse_and_display() {
        let date: Date = "2024-06-28".parse().unwrap();
        assert_eq!(date.to_string(), "2024-06-28");
        assert!(Date::parse("2024-13-01").is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let date = Date::from_ymd(2024, 6, 28).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-06-28\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
