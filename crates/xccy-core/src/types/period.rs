//! Tenor periods such as `3M` or `5Y`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Unit of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Calendar days.
    Days,
    /// Calendar weeks.
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

impl TimeUnit {
    fn suffix(self) -> char {
        match self {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y',
        }
    }
}

/// A length of time expressed in a single unit.
///
/// Periods serialize as market strings (`"3M"`, `"5Y"`). Day and week
/// periods only compare against month and year periods when the answer does
/// not depend on month lengths, so `partial_cmp` can return `None`.
///
/// # Example
///
/// ```rust
/// use xccy_core::types::{Period, TimeUnit};
///
/// let tenor: Period = "5Y".parse().unwrap();
/// assert_eq!(tenor, Period::new(60, TimeUnit::Months));
/// assert!(tenor > "3M".parse().unwrap());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    length: i32,
    unit: TimeUnit,
}

impl Period {
    /// Creates a new period.
    #[must_use]
    pub const fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// Shorthand for a period in days.
    #[must_use]
    pub const fn days(length: i32) -> Self {
        Self::new(length, TimeUnit::Days)
    }

    /// Shorthand for a period in months.
    #[must_use]
    pub const fn months(length: i32) -> Self {
        Self::new(length, TimeUnit::Months)
    }

    /// Shorthand for a period in years.
    #[must_use]
    pub const fn years(length: i32) -> Self {
        Self::new(length, TimeUnit::Years)
    }

    /// Returns the number of units.
    #[must_use]
    pub const fn length(&self) -> i32 {
        self.length
    }

    /// Returns the unit.
    #[must_use]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns true if the period is strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.length > 0
    }

    /// Multiplies the length, keeping the unit.
    ///
    /// Returns `None` if the length overflows.
    #[must_use]
    pub fn checked_times(&self, n: i32) -> Option<Self> {
        self.length
            .checked_mul(n)
            .map(|length| Self::new(length, self.unit))
    }

    /// Length in months for month and year periods.
    #[must_use]
    pub fn in_months(&self) -> Option<i64> {
        match self.unit {
            TimeUnit::Months => Some(i64::from(self.length)),
            TimeUnit::Years => Some(12 * i64::from(self.length)),
            TimeUnit::Days | TimeUnit::Weeks => None,
        }
    }

    /// Length in days for day and week periods.
    #[must_use]
    pub fn in_days(&self) -> Option<i64> {
        match self.unit {
            TimeUnit::Days => Some(i64::from(self.length)),
            TimeUnit::Weeks => Some(7 * i64::from(self.length)),
            TimeUnit::Months | TimeUnit::Years => None,
        }
    }

    /// Bounds on the length in days: months span 28 to 31 days.
    fn day_bounds(&self) -> (i64, i64) {
        match (self.in_days(), self.in_months()) {
            (Some(d), _) => (d, d),
            (None, Some(m)) => (28 * m, 31 * m),
            (None, None) => (0, 0),
        }
    }
}

impl PartialEq for Period {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

// Mixed-unit comparisons never report `Equal`, so equality is an equivalence.
impl Eq for Period {}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if let (Some(a), Some(b)) = (self.in_months(), other.in_months()) {
            return Some(a.cmp(&b));
        }
        if let (Some(a), Some(b)) = (self.in_days(), other.in_days()) {
            return Some(a.cmp(&b));
        }
        let (lo_a, hi_a) = self.day_bounds();
        let (lo_b, hi_b) = other.day_bounds();
        if hi_a < lo_b {
            Some(Ordering::Less)
        } else if lo_a > hi_b {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.unit.suffix())
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        let split = s
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .ok_or_else(|| CoreError::invalid_period("empty period"))?;
        let (digits, unit) = s.split_at(split);

        let unit = match unit.to_ascii_uppercase().as_str() {
            "D" => TimeUnit::Days,
            "W" => TimeUnit::Weeks,
            "M" => TimeUnit::Months,
            "Y" => TimeUnit::Years,
            other => {
                return Err(CoreError::invalid_period(format!(
                    "unknown unit '{other}' in '{s}'"
                )))
            }
        };
        let length = digits
            .parse::<i32>()
            .map_err(|_| CoreError::invalid_period(format!("bad length in '{s}'")))?;

        Ok(Self::new(length, unit))
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
