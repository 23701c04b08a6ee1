//! Error types for curve, helper and bootstrap operations.
//!
//! The rate helpers distinguish three failure classes:
//!
//! - **Invalid configuration** (`InvalidConfiguration`, `EmptySchedule`): raised
//!   at construction or date initialization, never at solve time.
//! - **Unbound dependency** (`TermStructureNotSet`): the implied quote was
//!   requested before the bootstrap driver bound a curve.
//! - **Numerical failure** (`NumericalFailure`): a discount factor, fixing or
//!   annuity came out non-finite. This is the only class a driver may retry.

use xccy_core::error::CoreError;
use xccy_core::types::Date;
use xccy_math::error::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Helper or curve inputs cannot define a meaningful instrument.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of what's wrong.
        reason: String,
    },

    /// The curve under construction was not bound before a query.
    #[error("Term structure not set for {helper}")]
    TermStructureNotSet {
        /// Description of the helper that was queried.
        helper: String,
    },

    /// A computed quantity was NaN or infinite.
    #[error("Numerical failure: {reason}")]
    NumericalFailure {
        /// What was being computed.
        reason: String,
    },

    /// A leg was requested over a schedule without any period.
    #[error("Empty schedule: at least one accrual period is required")]
    EmptySchedule,

    /// A past index fixing is missing from the fixing store.
    #[error("Missing {index} fixing for {date}")]
    MissingFixing {
        /// Index name.
        index: String,
        /// Fixing date.
        date: Date,
    },

    /// A quote has no value.
    #[error("Quote '{name}' has no value")]
    MissingQuote {
        /// Name of the quote.
        name: String,
    },

    /// An index was asked to forecast without a forecast curve.
    #[error("No forecast curve set for index {index}")]
    ForecastCurveNotSet {
        /// Index name.
        index: String,
    },

    /// Two helpers share a pillar date.
    #[error("Duplicate pillar date {date}")]
    DuplicatePillar {
        /// The shared pillar date.
        date: Date,
    },

    /// Curve calibration failed to converge.
    #[error(
        "Calibration failed after {iterations} iterations (residual: {residual:.2e}): {message}"
    )]
    CalibrationFailure {
        /// Number of iterations attempted.
        iterations: usize,
        /// Final residual value.
        residual: f64,
        /// Description of failure.
        message: String,
    },

    /// Not enough data points for a curve.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Pillar times are not strictly increasing.
    #[error("Non-monotonic tenors at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicTenors {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous tenor value.
        prev: f64,
        /// Current tenor value.
        current: f64,
    },

    /// Interpolation failed.
    #[error("Interpolation error: {reason}")]
    InterpolationError {
        /// Description of the interpolation error.
        reason: String,
    },

    /// Date or convention error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Solver or interpolation error.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Creates an unbound term structure error.
    #[must_use]
    pub fn term_structure_not_set(helper: impl Into<String>) -> Self {
        Self::TermStructureNotSet {
            helper: helper.into(),
        }
    }

    /// Creates a numerical failure error.
    #[must_use]
    pub fn numerical_failure(reason: impl Into<String>) -> Self {
        Self::NumericalFailure {
            reason: reason.into(),
        }
    }

    /// Creates a missing fixing error.
    #[must_use]
    pub fn missing_fixing(index: impl Into<String>, date: Date) -> Self {
        Self::MissingFixing {
            index: index.into(),
            date,
        }
    }

    /// Creates a missing quote error.
    #[must_use]
    pub fn missing_quote(name: impl Into<String>) -> Self {
        Self::MissingQuote { name: name.into() }
    }

    /// Creates a calibration failure error.
    #[must_use]
    pub fn calibration_failed(
        iterations: usize,
        residual: f64,
        message: impl Into<String>,
    ) -> Self {
        Self::CalibrationFailure {
            iterations,
            residual,
            message: message.into(),
        }
    }

    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates an interpolation error.
    #[must_use]
    pub fn interpolation_error(reason: impl Into<String>) -> Self {
        Self::InterpolationError {
            reason: reason.into(),
        }
    }

    /// Returns true if a bootstrap driver may retry after this error.
    ///
    /// Only numerical failures qualify; configuration errors and unbound
    /// dependencies abort the bootstrap pass.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NumericalFailure { .. } | Self::Math(MathError::NonFiniteObjective { .. })
        )
    }
}

/// Checks that a computed value is finite.
pub(crate) fn ensure_finite(value: f64, what: impl FnOnce() -> String) -> CurveResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CurveError::numerical_failure(format!("{} = {value}", what())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::invalid_configuration("tenor 1M shorter than index tenor 3M");
        assert!(err.to_string().contains("Invalid configuration"));

        let err = CurveError::term_structure_not_set("USD/EUR 5Y basis");
        assert_eq!(err.to_string(), "Term structure not set for USD/EUR 5Y basis");
    }

    #[test]
    fn test_recoverability() {
        assert!(CurveError::numerical_failure("df").is_recoverable());
        assert!(CurveError::from(MathError::NonFiniteObjective { x: 0.1 }).is_recoverable());
        assert!(!CurveError::term_structure_not_set("helper").is_recoverable());
        assert!(!CurveError::invalid_configuration("bad").is_recoverable());
        assert!(!CurveError::EmptySchedule.is_recoverable());
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite(0.5, || "df".into()).unwrap(), 0.5);
        let err = ensure_finite(f64::NAN, || "discount factor at 2030-01-01".into()).unwrap_err();
        assert!(matches!(err, CurveError::NumericalFailure { .. }));
        assert!(err.to_string().contains("2030-01-01"));
    }

    #[test]
    fn test_core_error_conversion() {
        let err: CurveError = CoreError::invalid_period("bad").into();
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("Invalid period"));
    }
}
