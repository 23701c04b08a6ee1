//! # Xccy Math
//!
//! Numerical building blocks for curve bootstrapping.
//!
//! This crate provides:
//!
//! - **Solvers**: Brent's bracketing root finder
//! - **Interpolation**: Log-linear interpolation of discount factors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Interpolator, LogLinearInterpolator};
    pub use crate::solvers::{brent, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
