//! Brent's root-finding algorithm.

use log::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Combines the reliability of bisection with the speed of the secant method
/// and inverse quadratic interpolation. The objective is `FnMut` so callers
/// can probe stateful models (a rate helper rebound to a trial curve).
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints)
///
/// # Errors
///
/// - `InvalidBracket` if the endpoints do not bracket a root
/// - `NonFiniteObjective` as soon as the objective returns NaN or infinity
/// - `ConvergenceFailed` after `max_iterations`
pub fn brent<F>(mut f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: FnMut(f64) -> f64,
{
    let mut eval = |x: f64| -> MathResult<f64> {
        let y = f(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(MathError::NonFiniteObjective { x })
        }
    };

    let (mut a, mut b) = (a, b);
    let mut fa = eval(a)?;
    let mut fb = eval(b)?;

    if fa == 0.0 {
        return Ok(SolverResult {
            root: a,
            iterations: 0,
            residual: fa,
        });
    }
    if fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        // Keep the root between b and c.
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.tolerance;
        let m = 0.5 * (c - b);

        if fb.abs() < config.tolerance || m.abs() <= tol || fb == 0.0 {
            trace!("brent converged to {b} in {iteration} iterations");
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Secant step
                (2.0 * m * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * m * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }

            let min1 = 3.0 * m * q - (tol * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = m;
                e = d;
            }
        } else {
            d = m;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(m) };
        fb = eval(b)?;
    }

    Err(MathError::convergence_failed(config.max_iterations, fb.abs()))
}
