//! Log-linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Log-linear interpolation between data points.
///
/// Interpolates the natural logarithm of y values, then exponentiates the result:
///
/// ```text
/// y(x) = exp(linear_interpolate(x, ln(y)))
/// ```
///
/// With extrapolation enabled the first and last segments are extended, so a
/// discount curve continues at its last forward rate.
///
/// # Example
///
/// ```rust
/// use xccy_math::interpolation::{LogLinearInterpolator, Interpolator};
///
/// let times = vec![0.0, 1.0, 2.0];
/// let discount_factors = vec![1.0, 0.97, 0.94];
///
/// let interp = LogLinearInterpolator::new(times, discount_factors).unwrap();
/// let df = interp.interpolate(1.5).unwrap();
/// assert!(df > 0.94 && df < 0.97);
/// ```
#[derive(Debug, Clone)]
pub struct LogLinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    log_ys: Vec<f64>,
    allow_extrapolation: bool,
}

impl LogLinearInterpolator {
    /// Creates a new log-linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are fewer than 2 points
    /// - Lengths differ
    /// - x values are not strictly increasing
    /// - Any y value is non-positive or not finite
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }

        if xs.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        let mut log_ys = Vec::with_capacity(ys.len());
        for (i, &y) in ys.iter().enumerate() {
            if !(y > 0.0 && y.is_finite()) {
                return Err(MathError::invalid_input(format!(
                    "y[{i}] = {y} is not a positive finite value"
                )));
            }
            log_ys.push(y.ln());
        }

        Ok(Self {
            xs,
            ys,
            log_ys,
            allow_extrapolation: false,
        })
    }

    /// Enables extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Returns the original y values.
    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        &self.ys
    }

    /// Returns the x values.
    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.xs
    }

    /// Finds the index i such that xs[i] <= x < xs[i+1].
    fn find_segment(&self, x: f64) -> usize {
        let last = self.xs.len() - 2;
        self.xs.partition_point(|&probe| probe <= x).saturating_sub(1).min(last)
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if !self.allow_extrapolation && !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        Ok(())
    }

    fn segment(&self, x: f64) -> (f64, f64) {
        let i = self.find_segment(x);
        let slope = (self.log_ys[i + 1] - self.log_ys[i]) / (self.xs[i + 1] - self.xs[i]);
        (self.log_ys[i] + slope * (x - self.xs[i]), slope)
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let (log_y, _) = self.segment(x);
        Ok(log_y.exp())
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let (log_y, slope) = self.segment(x);
        Ok(log_y.exp() * slope)
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
