//! Discount curve implementations.
//!
//! - [`FlatForwardCurve`]: a single continuously compounded rate
//! - [`InterpolatedDiscountCurve`]: log-linear discount factors over pillar dates,
//!   the curve the bootstrapper builds
//! - [`ComposedCurve`]: the product of two curves' discount factors, used to
//!   express a solved basis as a multiplicative spread over a collateral curve

mod composed;
mod flat;
mod interpolated;

pub use composed::ComposedCurve;
pub use flat::FlatForwardCurve;
pub use interpolated::InterpolatedDiscountCurve;
