//! # Xccy Curves
//!
//! Cross-currency basis swap rate helpers and discount curve bootstrapping.
//!
//! This crate provides:
//!
//! - **Curve Trait**: Core [`Curve`] trait consumed by legs, helpers and the bootstrapper
//! - **Curve Types**: Flat forward, log-linear interpolated and composed discount curves
//! - **Indices**: IBOR-style indices with fixing history and curve forecasting
//! - **Cash Flows**: Floating legs with notional exchanges, constant or resetting
//! - **Rate Helpers**: Constant-notional and mark-to-market cross-currency basis swaps
//! - **Bootstrap**: Piecewise bootstrapping with repricing validation
//! - **Configuration**: TOML/JSON helper and bootstrap settings
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use xccy_core::prelude::*;
//! use xccy_curves::prelude::*;
//!
//! let today = Date::from_ymd(2024, 1, 15).unwrap();
//! let usd: Arc<dyn Curve> = Arc::new(FlatForwardCurve::new(today, 0.02));
//! let eur: Arc<dyn Curve> = Arc::new(FlatForwardCurve::new(today, 0.03));
//!
//! let usd_libor = Arc::new(
//!     IborIndex::new("USDLibor", Currency::USD, Period::months(3), 2, Arc::new(WeekendCalendar))
//!         .with_forecast_curve(Arc::clone(&usd)),
//! );
//! let euribor = Arc::new(IborIndex::euribor(Period::months(3)).with_forecast_curve(eur));
//!
//! let basis: Arc<dyn Quote> = Arc::new(SimpleQuote::new(-0.0015));
//! let helper = XccyHelperConfig::default()
//!     .build(basis, usd_libor, euribor, usd, None)
//!     .unwrap();
//!
//! let mut helpers: Vec<Box<dyn RateHelper>> = vec![Box::new(helper)];
//! let result = PiecewiseBootstrapper::new(today).bootstrap(&mut helpers).unwrap();
//! assert!(result.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]

pub mod bootstrap;
pub mod cashflows;
pub mod config;
pub mod curves;
pub mod error;
pub mod helpers;
pub mod index;
pub mod quotes;
pub mod repricing;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::PiecewiseBootstrapper;
    pub use crate::cashflows::{FloatingCoupon, Leg, LegValuation};
    pub use crate::config::{BootstrapConfig, MarkToMarketConfig, Validate, XccyHelperConfig};
    pub use crate::curves::{ComposedCurve, FlatForwardCurve, InterpolatedDiscountCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::helpers::{
        CrossCurrencyBasisSwapRateHelper, DiscountMode, DiscountResolver, HelperKind, HelperView,
        LegSide, MarkToMarketReset, NotionalReset, RateHelper,
    };
    pub use crate::index::IborIndex;
    pub use crate::quotes::{Quote, SimpleQuote};
    pub use crate::repricing::{BootstrapResult, RepricingCheck, RepricingReport};
    pub use crate::traits::Curve;
}

pub use error::{CurveError, CurveResult};
pub use helpers::{CrossCurrencyBasisSwapRateHelper, RateHelper};
pub use traits::Curve;
