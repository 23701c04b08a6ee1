//! TARGET calendar for euro settlement.

use chrono::NaiveDate;

use super::Calendar;
use crate::types::Date;

/// TARGET holiday calendar.
///
/// ## Holidays
///
/// - Saturdays and Sundays
/// - New Year's Day (January 1)
/// - Good Friday and Easter Monday (from 2000)
/// - Labour Day (May 1, from 2000)
/// - Christmas Day (December 25)
/// - Day of Goodwill (December 26, from 2000)
/// - December 31 in 1998, 1999 and 2001
///
/// Holidays falling on weekends are not moved.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetCalendar;

impl Calendar for TargetCalendar {
    fn name(&self) -> &'static str {
        "TARGET"
    }

    fn is_business_day(&self, date: Date) -> bool {
        if date.is_weekend() {
            return false;
        }

        let (y, m, d) = (date.year(), date.month(), date.day());
        let fixed_holiday = matches!((m, d), (1, 1) | (12, 25))
            || (y >= 2000 && matches!((m, d), (5, 1) | (12, 26)))
            || (m == 12 && d == 31 && matches!(y, 1998 | 1999 | 2001));
        if fixed_holiday {
            return false;
        }

        if y >= 2000 {
            if let Some(easter) = easter_sunday(y).map(Date::from) {
                if date == easter.add_days(-2) || date == easter.add_days(1) {
                    return false;
                }
            }
        }

        true
    }
}

/// Calculate Easter Sunday using the Anonymous Gregorian algorithm.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::BusinessDayConvention;

    #[test]
    fn test_easter_dates() {
        assert_eq!(easter_sunday(2024), NaiveDate::from_ymd_opt(2024, 3, 31));
        assert_eq!(easter_sunday(2025), NaiveDate::from_ymd_opt(2025, 4, 20));
        assert_eq!(easter_sunday(2019), NaiveDate::from_ymd_opt(2019, 4, 21));
    }

    #[test]
    fn test_target_holidays_2024() {
        let cal = TargetCalendar;
        let holidays = [(1, 1), (3, 29), (4, 1), (5, 1), (12, 25), (12, 26)];
        for (m, d) in holidays {
            let date = Date::from_ymd(2024, m, d).unwrap();
            assert!(!cal.is_business_day(date), "{date} should be a holiday");
        }

        assert!(cal.is_business_day(Date::from_ymd(2024, 3, 28).unwrap()));
        assert!(cal.is_business_day(Date::from_ymd(2024, 12, 31).unwrap()));
    }

    #[test]
    fn test_historical_new_years_eve() {
        let cal = TargetCalendar;
        assert!(!cal.is_business_day(Date::from_ymd(2001, 12, 31).unwrap()));
        assert!(cal.is_business_day(Date::from_ymd(2002, 12, 31).unwrap()));
    }

    #[test]
    fn test_roll_over_easter() {
        let cal = TargetCalendar;
        // Good Friday 2024-03-29 rolls past Easter Monday to Tuesday
        let good_friday = Date::from_ymd(2024, 3, 29).unwrap();
        assert_eq!(
            cal.adjust(good_friday, BusinessDayConvention::Following),
            Date::from_ymd(2024, 4, 2).unwrap()
        );
        assert_eq!(
            cal.advance_business_days(Date::from_ymd(2024, 3, 27).unwrap(), 2),
            Date::from_ymd(2024, 4, 2).unwrap()
        );
    }
}
