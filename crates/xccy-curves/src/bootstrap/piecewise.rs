//! Sequential bootstrap over helper pillars.
//!
//! Bootstraps a discount curve by solving for each helper's pillar node in
//! turn, holding previously solved nodes fixed.

use std::sync::Arc;

use log::{debug, trace, warn};
use xccy_core::types::Date;
use xccy_math::error::MathError;
use xccy_math::solvers::brent;

use crate::config::{BootstrapConfig, Validate};
use crate::curves::InterpolatedDiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::helpers::RateHelper;
use crate::repricing::{BootstrapResult, BuildTimer, RepricingReport};
use crate::traits::Curve;

/// Piecewise bootstrapper for log-linear discount curves.
///
/// The algorithm:
/// 1. Sort helpers by pillar date and reject shared pillars
/// 2. Start from the node DF(0) = 1.0 at the reference date
/// 3. For each helper, Brent-solve the zero rate of its pillar node so that
///    the helper's implied quote matches its market quote; every probe
///    rebuilds the curve and rebinds the helper
/// 4. Rebind every helper to the final curve and reprice them all
///
/// A numerical failure during a probe narrows the search bracket toward the
/// previous node's rate and retries; any other error aborts the pass.
///
/// # Example
///
/// ```rust,ignore
/// let mut helpers: Vec<Box<dyn RateHelper>> = vec![Box::new(two_year), Box::new(five_year)];
/// let result = PiecewiseBootstrapper::new(today).bootstrap(&mut helpers)?;
/// assert!(result.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct PiecewiseBootstrapper {
    reference_date: Date,
    config: BootstrapConfig,
}

impl PiecewiseBootstrapper {
    /// Creates a bootstrapper with the default configuration.
    #[must_use]
    pub fn new(reference_date: Date) -> Self {
        Self {
            reference_date,
            config: BootstrapConfig::default(),
        }
    }

    /// Sets the bootstrap configuration.
    #[must_use]
    pub fn with_config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the reference date.
    #[must_use]
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Bootstraps a curve that reprices every helper.
    ///
    /// Helpers are reordered by pillar date and left bound to the final curve.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` for an invalid configuration
    /// - `InsufficientPoints` if no helper is given
    /// - `DuplicatePillar` if two helpers share a pillar
    /// - `CalibrationFailure` if a pillar has no root in the rate bracket or
    ///   the solver does not converge
    /// - any non-recoverable helper error, and a numerical failure that
    ///   persists after `max_bracket_retries` narrowed brackets
    pub fn bootstrap(
        &self,
        helpers: &mut [Box<dyn RateHelper>],
    ) -> CurveResult<BootstrapResult<InterpolatedDiscountCurve>> {
        let timer = BuildTimer::start();
        self.config.validate_or_error()?;

        if helpers.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }

        helpers.sort_by_key(|helper| helper.pillar_date());
        if let Some(pair) = helpers
            .windows(2)
            .find(|w| w[0].pillar_date() == w[1].pillar_date())
        {
            return Err(CurveError::DuplicatePillar {
                date: pair[1].pillar_date(),
            });
        }

        let mut nodes: Vec<(Date, f64)> = Vec::with_capacity(helpers.len());
        let mut previous_rate =
            0.0_f64.clamp(self.config.min_zero_rate, self.config.max_zero_rate);

        for helper in helpers.iter_mut() {
            let pillar = helper.pillar_date();
            let t = self.reference_date.days_between(&pillar) as f64 / 365.0;

            let (mut lo, mut hi) = (self.config.min_zero_rate, self.config.max_zero_rate);
            let mut retries = 0;
            let rate = loop {
                match self.solve_pillar(helper.as_mut(), &nodes, pillar, t, lo, hi) {
                    Ok(rate) => break rate,
                    Err(err)
                        if err.is_recoverable() && retries < self.config.max_bracket_retries =>
                    {
                        retries += 1;
                        lo = previous_rate + 0.5 * (lo - previous_rate);
                        hi = previous_rate + 0.5 * (hi - previous_rate);
                        warn!(
                            "{}: {err}; retrying in [{lo:.6}, {hi:.6}] ({retries}/{})",
                            helper.description(),
                            self.config.max_bracket_retries
                        );
                    }
                    Err(err) => return Err(err),
                }
            };

            nodes.push((pillar, (-rate * t).exp()));
            previous_rate = rate;
        }

        let curve = InterpolatedDiscountCurve::new(self.reference_date, &nodes)?;
        let shared: Arc<dyn Curve> = Arc::new(curve.clone());
        for helper in helpers.iter_mut() {
            helper.set_term_structure(Arc::clone(&shared))?;
        }

        let repricing_report =
            RepricingReport::from_helpers(helpers, self.config.repricing_tolerance)?;

        Ok(BootstrapResult::new(curve, repricing_report, timer.elapsed()))
    }

    /// Solves the zero rate of the pillar node for one helper.
    fn solve_pillar(
        &self,
        helper: &mut dyn RateHelper,
        nodes: &[(Date, f64)],
        pillar: Date,
        t: f64,
        lo: f64,
        hi: f64,
    ) -> CurveResult<f64> {
        let mut failure: Option<CurveError> = None;
        let mut trial = nodes.to_vec();
        trial.push((pillar, 1.0));

        let objective = |rate: f64| -> f64 {
            if failure.is_some() {
                return f64::NAN;
            }
            if let Some(node) = trial.last_mut() {
                node.1 = (-rate * t).exp();
            }
            let residual = InterpolatedDiscountCurve::new(self.reference_date, &trial)
                .and_then(|curve| helper.set_term_structure(Arc::new(curve)))
                .and_then(|()| helper.quote_error());
            match residual {
                Ok(value) => {
                    trace!("{pillar}: zero rate {rate:.10} -> quote error {value:.3e}");
                    value
                }
                Err(err) => {
                    failure = Some(err);
                    f64::NAN
                }
            }
        };

        let solved = brent(objective, lo, hi, &self.config.solver_config());
        if let Some(err) = failure {
            return Err(err);
        }

        match solved {
            Ok(result) => {
                debug!(
                    "solved pillar {pillar}: zero rate {:.8} in {} iterations (residual {:.2e})",
                    result.root, result.iterations, result.residual
                );
                Ok(result.root)
            }
            Err(MathError::InvalidBracket { a, b, fa, fb }) => Err(CurveError::calibration_failed(
                0,
                fa.abs().min(fb.abs()),
                format!("no root for pillar {pillar} with zero rate in [{a}, {b}]"),
            )),
            Err(MathError::ConvergenceFailed {
                iterations,
                residual,
            }) => Err(CurveError::calibration_failed(
                iterations as usize,
                residual,
                format!("pillar {pillar} did not converge"),
            )),
            Err(err) => Err(err.into()),
        }
    }
}
