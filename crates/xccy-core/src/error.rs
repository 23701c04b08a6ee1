//! Error types for date and convention handling.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by dates, periods, calendars and schedules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Period string or value could not be interpreted.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// Description of the period error.
        message: String,
    },

    /// Calendar or business day error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },

    /// Schedule could not be generated from the given inputs.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of what's invalid.
        reason: String,
    },

    /// Unknown or unsupported convention name.
    #[error("Unknown convention '{name}'")]
    UnknownConvention {
        /// The name that failed to parse.
        name: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid period error.
    #[must_use]
    pub fn invalid_period(message: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            message: message.into(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar_error(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    /// Creates an unknown convention error.
    #[must_use]
    pub fn unknown_convention(name: impl Into<String>) -> Self {
        Self::UnknownConvention { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_schedule_error_display() {
        let err = CoreError::invalid_schedule("termination before effective date");
        assert_eq!(
            err.to_string(),
            "Invalid schedule: termination before effective date"
        );
    }
}
