//! Curve bootstrapping from rate helpers.
//!
//! - [`PiecewiseBootstrapper`]: solves one curve node per helper pillar, in
//!   pillar order, each by Brent root finding on the helper's quote error

mod piecewise;

pub use piecewise::PiecewiseBootstrapper;
