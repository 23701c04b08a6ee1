//! Interpolation of discount factors over pillar times.
//!
//! - [`LogLinearInterpolator`]: linear in `ln(y)`, so discount factors get
//!   piecewise-constant forward rates between pillars

mod log_linear;

pub use log_linear::LogLinearInterpolator;

use crate::error::MathResult;

/// A curve through a fixed set of nodes.
pub trait Interpolator: Send + Sync {
    /// Value at `x`.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Slope at `x`.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Whether queries beyond the end nodes are answered.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// First node abscissa.
    fn min_x(&self) -> f64;

    /// Last node abscissa.
    fn max_x(&self) -> f64;

    /// Whether `x` lies between the first and last node.
    fn in_range(&self, x: f64) -> bool {
        (self.min_x()..=self.max_x()).contains(&x)
    }
}
