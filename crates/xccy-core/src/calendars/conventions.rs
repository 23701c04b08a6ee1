//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Calendar;
use crate::error::CoreError;
use crate::types::Date;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment - use the date as-is even if not a business day.
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the preceding business day, unless it crosses a month boundary,
    /// in which case move to the following business day.
    ModifiedPreceding,

    /// Move to the nearest business day (following or preceding, whichever is closer).
    Nearest,
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Nearest => "Nearest",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "UNADJUSTED" | "NONE" => Ok(Self::Unadjusted),
            "FOLLOWING" | "F" => Ok(Self::Following),
            "MODIFIEDFOLLOWING" | "MF" => Ok(Self::ModifiedFollowing),
            "PRECEDING" | "P" => Ok(Self::Preceding),
            "MODIFIEDPRECEDING" | "MP" => Ok(Self::ModifiedPreceding),
            "NEAREST" => Ok(Self::Nearest),
            _ => Err(CoreError::unknown_convention(s)),
        }
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if convention == BusinessDayConvention::Unadjusted || calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,

        BusinessDayConvention::Following => following(date, calendar),

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                preceding(date, calendar)
            }
        }

        BusinessDayConvention::Preceding => preceding(date, calendar),

        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                following(date, calendar)
            }
        }

        BusinessDayConvention::Nearest => {
            let fwd = following(date, calendar);
            let back = preceding(date, calendar);

            if date.days_between(&fwd) <= back.days_between(&date) {
                fwd
            } else {
                back
            }
        }
    }
}

/// Returns the next business day on or after the given date.
pub(crate) fn following<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(1);
    }
    date
}

/// Returns the previous business day on or before the given date.
pub(crate) fn preceding<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(-1);
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    #[test]
    fn test_following() {
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::Following, &WeekendCalendar);
        assert_eq!(adjusted, Date::from_ymd(2025, 1, 6).unwrap());
    }

    #[test]
    fn test_preceding() {
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::Preceding, &WeekendCalendar);
        assert_eq!(adjusted, Date::from_ymd(2025, 1, 3).unwrap());
    }

    #[test]
    fn test_modified_following_month_end() {
        // Saturday 2024-08-31 would roll into September
        let saturday = Date::from_ymd(2024, 8, 31).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::ModifiedFollowing, &WeekendCalendar);
        assert_eq!(adjusted, Date::from_ymd(2024, 8, 30).unwrap());
    }

    #[test]
    fn test_modified_preceding_month_start() {
        // Sunday 2024-09-01 would roll back into August
        let sunday = Date::from_ymd(2024, 9, 1).unwrap();
        let adjusted = adjust(sunday, BusinessDayConvention::ModifiedPreceding, &WeekendCalendar);
        assert_eq!(adjusted, Date::from_ymd(2024, 9, 2).unwrap());
    }

    #[test]
    fn test_nearest() {
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        assert_eq!(
            adjust(saturday, BusinessDayConvention::Nearest, &WeekendCalendar),
            Date::from_ymd(2025, 1, 3).unwrap()
        );
        assert_eq!(
            adjust(sunday, BusinessDayConvention::Nearest, &WeekendCalendar),
            Date::from_ymd(2025, 1, 6).unwrap()
        );
    }

    #[test]
    fn test_unadjusted() {
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::Unadjusted, &WeekendCalendar);
        assert_eq!(adjusted, saturday);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "Modified Following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!(
            "mf".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert!("sideways".parse::<BusinessDayConvention>().is_err());
    }
}
