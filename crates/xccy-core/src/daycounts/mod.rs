//! Day count conventions for floating-rate accrual.
//!
//! - [`Act360`]: Actual/360, the money-market basis of most Ibor indices
//! - [`Act365Fixed`]: Actual/365 Fixed, used by GBP, AUD and CAD indices
//!
//! # Usage
//!
//! ```rust
//! use xccy_core::daycounts::{Act360, DayCount};
//! use xccy_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 4, 15).unwrap();
//! assert_eq!(Act360.year_fraction(start, end), dec!(0.25));
//! ```

mod act360;
mod act365;

pub use act360::Act360;
pub use act365::Act365Fixed;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Year fractions are exact decimals; callers working in `f64` use
/// [`year_fraction_f64`](DayCount::year_fraction_f64).
pub trait DayCount: Send + Sync {
    /// Returns the name of the convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Year fraction as `f64`; NaN only if the decimal cannot be represented.
    fn year_fraction_f64(&self, start: Date, end: Date) -> f64 {
        self.year_fraction(start, end).to_f64().unwrap_or(f64::NAN)
    }
}

/// Serializable day count selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// Actual/360
    #[default]
    Act360,
    /// Actual/365 Fixed
    Act365Fixed,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
        }
    }

    /// Year fraction between two dates as `f64`.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            DayCountConvention::Act360 => Act360.year_fraction_f64(start, end),
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction_f64(start, end),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(' ', "");
        match normalized.as_str() {
            "ACT/360" | "ACT360" | "ACTUAL/360" | "A360" => Ok(Self::Act360),
            "ACT/365F" | "ACT/365FIXED" | "ACT365FIXED" | "ACTUAL/365" | "A365F" => {
                Ok(Self::Act365Fixed)
            }
            _ => Err(CoreError::unknown_convention(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convention_dispatch() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2024, 7, 1).unwrap();

        assert_relative_eq!(
            DayCountConvention::Act360.year_fraction(start, end),
            182.0 / 360.0,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            DayCountConvention::Act365Fixed.year_fraction(start, end),
            182.0 / 365.0,
            epsilon = 1e-15
        );
        assert_eq!(
            DayCountConvention::Act365Fixed.to_day_count().day_count(start, end),
            182
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "ACT/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "Act/365 Fixed".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365Fixed
        );
        assert!("30/360".parse::<DayCountConvention>().is_err());
    }
}
