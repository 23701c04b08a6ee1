//! Errors raised by the root finder and the interpolator.

use thiserror::Error;

/// Result alias for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// Failures of the numerical routines behind curve bootstrapping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Brent ran out of iterations before the bracket closed.
    #[error("No convergence in {iterations} iterations, last residual {residual:.2e}")]
    ConvergenceFailed {
        /// Iterations performed.
        iterations: u32,
        /// Objective value at the best estimate.
        residual: f64,
    },

    /// The objective does not change sign over the bracket.
    #[error("Root not bracketed: f({a}) = {fa:.2e}, f({b}) = {fb:.2e}")]
    InvalidBracket {
        /// Left end.
        a: f64,
        /// Right end.
        b: f64,
        /// Objective at `a`.
        fa: f64,
        /// Objective at `b`.
        fb: f64,
    },

    /// The objective produced NaN or an infinity.
    #[error("Objective is not finite at x = {x}")]
    NonFiniteObjective {
        /// Probe point.
        x: f64,
    },

    /// Query outside the node range of an interpolator without extrapolation.
    #[error("{x} lies outside the interpolation range [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// Query point.
        x: f64,
        /// First node.
        min: f64,
        /// Last node.
        max: f64,
    },

    /// Too few nodes to interpolate.
    #[error("Need at least {required} nodes, got {actual}")]
    InsufficientData {
        /// Nodes required.
        required: usize,
        /// Nodes given.
        actual: usize,
    },

    /// Malformed nodes: unequal lengths, unordered abscissae or non-positive values.
    #[error("Invalid nodes: {reason}")]
    InvalidInput {
        /// What is wrong with the nodes.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failure.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid node error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a too-few-nodes error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}
