//! Repricing validation for curve bootstrap.
//!
//! A bootstrapped curve is only as good as its fit: every helper's implied
//! quote must match its market quote within tolerance. The bootstrapper
//! attaches a [`RepricingReport`] to every curve it builds.
//!
//! # Usage
//!
//! ```rust,ignore
//! let result = PiecewiseBootstrapper::new(today).bootstrap(&mut helpers)?;
//!
//! if !result.is_valid() {
//!     for check in result.failed_checks() {
//!         eprintln!("{check}");
//!     }
//! }
//! let curve = result.into_curve()?;
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::error::{CurveError, CurveResult};
use crate::helpers::{HelperKind, RateHelper};

/// Default repricing tolerance on quotes (1e-8 = 0.0001bp).
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Result of repricing a single helper against the curve.
#[derive(Debug, Clone)]
pub struct RepricingCheck {
    /// Helper description.
    pub helper: String,

    /// Helper kind.
    pub kind: HelperKind,

    /// Market quote.
    pub quote: f64,

    /// Quote implied by the curve.
    pub implied_quote: f64,

    /// Absolute error |implied_quote - quote|
    pub error: f64,

    /// Tolerance applied.
    pub tolerance: f64,

    /// Whether the helper repriced within tolerance.
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a new repricing check result.
    #[must_use]
    pub fn new(
        helper: String,
        kind: HelperKind,
        quote: f64,
        implied_quote: f64,
        tolerance: f64,
    ) -> Self {
        let error = (implied_quote - quote).abs();
        let passed = error <= tolerance;

        Self {
            helper,
            kind,
            quote,
            implied_quote,
            error,
            tolerance,
            passed,
        }
    }

    /// Reprices a helper against its bound curve.
    pub fn from_helper(helper: &dyn RateHelper, tolerance: f64) -> CurveResult<Self> {
        Ok(Self::new(
            helper.description(),
            helper.kind(),
            helper.quote()?,
            helper.implied_quote()?,
            tolerance,
        ))
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "✓" } else { "✗" };
        write!(
            f,
            "{} {} | quote: {:.6} | implied: {:.6} | error: {:.2e} (tol: {:.2e})",
            status, self.helper, self.quote, self.implied_quote, self.error, self.tolerance
        )
    }
}

/// Repricing report over all helpers of a bootstrap.
#[derive(Debug, Clone)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
    max_error: f64,
    rms_error: f64,
    passed_count: usize,
}

impl RepricingReport {
    /// Creates a new repricing report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        let max_error = checks.iter().map(|c| c.error).fold(0.0_f64, f64::max);

        let rms_error = if checks.is_empty() {
            0.0
        } else {
            let sum_sq: f64 = checks.iter().map(|c| c.error * c.error).sum();
            (sum_sq / checks.len() as f64).sqrt()
        };

        let passed_count = checks.iter().filter(|c| c.passed).count();

        Self {
            checks,
            max_error,
            rms_error,
            passed_count,
        }
    }

    /// Reprices every helper against its bound curve.
    ///
    /// Helpers are independent once bound, so they are repriced in parallel.
    pub fn from_helpers(helpers: &[Box<dyn RateHelper>], tolerance: f64) -> CurveResult<Self> {
        let checks = helpers
            .par_iter()
            .map(|helper| RepricingCheck::from_helper(helper.as_ref(), tolerance))
            .collect::<CurveResult<Vec<_>>>()?;
        Ok(Self::new(checks))
    }

    /// Returns whether all helpers passed repricing validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.passed_count == self.checks.len()
    }

    /// Returns the individual repricing checks.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Returns the maximum absolute error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Returns the RMS error.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        self.rms_error
    }

    /// Returns the number of helpers that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.passed_count
    }

    /// Returns the number of helpers that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.checks.len() - self.passed_count
    }

    /// Returns failed checks for error reporting.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repricing Report")?;
        writeln!(f, "================")?;
        writeln!(f, "Status: {}", if self.is_valid() { "PASSED" } else { "FAILED" })?;
        writeln!(f, "Helpers: {}/{} passed", self.passed_count, self.checks.len())?;
        writeln!(f, "Max Error: {:.2e}", self.max_error)?;
        writeln!(f, "RMS Error: {:.2e}", self.rms_error)?;

        if !self.checks.is_empty() {
            writeln!(f)?;
            writeln!(f, "Details:")?;
            for check in &self.checks {
                writeln!(f, "  {check}")?;
            }
        }

        Ok(())
    }
}

/// A bootstrapped curve with its repricing report.
#[derive(Debug, Clone)]
pub struct BootstrapResult<C> {
    /// The bootstrapped curve.
    pub curve: C,

    /// Repricing validation report.
    pub repricing_report: RepricingReport,

    /// Time taken to build the curve.
    pub build_duration: Duration,
}

impl<C> BootstrapResult<C> {
    /// Creates a new bootstrap result.
    #[must_use]
    pub fn new(curve: C, repricing_report: RepricingReport, build_duration: Duration) -> Self {
        Self {
            curve,
            repricing_report,
            build_duration,
        }
    }

    /// Returns whether every helper reprices within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.repricing_report.is_valid()
    }

    /// Returns the maximum repricing error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.repricing_report.max_error()
    }

    /// Returns failed checks.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&RepricingCheck> {
        self.repricing_report.failed_checks()
    }

    /// Returns a reference to the curve.
    #[must_use]
    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// Consumes the result and returns the curve if it repriced every helper.
    ///
    /// # Errors
    ///
    /// Returns `CalibrationFailure` if any helper failed repricing.
    pub fn into_curve(self) -> CurveResult<C> {
        if self.is_valid() {
            Ok(self.curve)
        } else {
            Err(CurveError::calibration_failed(
                0,
                self.max_error(),
                format!(
                    "{} helper(s) failed repricing",
                    self.repricing_report.failed_count()
                ),
            ))
        }
    }

    /// Consumes the result and returns the curve without checking validity.
    #[must_use]
    pub fn into_curve_unchecked(self) -> C {
        self.curve
    }
}

impl<C> fmt::Display for BootstrapResult<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bootstrap Result")?;
        writeln!(f, "Build time: {:?}", self.build_duration)?;
        writeln!(f)?;
        write!(f, "{}", self.repricing_report)
    }
}

/// Helper to time curve building operations.
pub struct BuildTimer {
    start: Instant,
}

impl BuildTimer {
    /// Starts a new timer.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Returns the elapsed duration.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
