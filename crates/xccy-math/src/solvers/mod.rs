//! Root-finding algorithms.
//!
//! The bootstrap solves one curve node at a time against a bracket of
//! admissible zero rates, so only a bracketing method is provided:
//!
//! - [`brent`]: bisection safeguarded by inverse quadratic interpolation
//!
//! # Example
//!
//! ```rust
//! use xccy_math::solvers::{brent, SolverConfig};
//!
//! // Continuously compounded rate giving a 5Y discount factor of 0.9
//! let f = |r: f64| (-r * 5.0).exp() - 0.9;
//! let result = brent(f, -0.1, 0.3, &SolverConfig::default()).unwrap();
//! assert!((result.root - 0.9f64.ln() / -5.0).abs() < 1e-10);
//! ```

mod brent;

pub use brent::brent;

/// Default bracket tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Stopping rules for [`brent`].
///
/// Iteration stops once the residual or the half-width of the bracket falls
/// below `tolerance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Residual and bracket tolerance.
    pub tolerance: f64,
    /// Iteration cap.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS)
    }
}

impl SolverConfig {
    /// Creates stopping rules.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Replaces the tolerance.
    #[must_use]
    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self { tolerance, ..self }
    }

    /// Replaces the iteration cap.
    #[must_use]
    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }
}

/// A converged root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// Root estimate.
    pub root: f64,
    /// Iterations used.
    pub iterations: u32,
    /// Objective at `root`.
    pub residual: f64,
}
