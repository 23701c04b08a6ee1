//! Configuration for helpers and the bootstrapper.
//!
//! Both configurations deserialize from TOML or JSON with defaults for
//! every omitted field:
//!
//! ```toml
//! [bootstrap]
//! tolerance = 1e-12
//! max_zero_rate = 0.25
//!
//! [helper]
//! tenor = "5Y"
//! calendar = "Target"
//! convention = "ModifiedFollowing"
//!
//! [helper.mark_to_market]
//! is_fx_base_currency_leg_resettable = false
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use xccy_core::calendars::{BusinessDayConvention, CalendarId};
use xccy_core::types::Period;
use xccy_math::solvers::SolverConfig;

use crate::error::{CurveError, CurveResult};
use crate::helpers::{
    CrossCurrencyBasisSwapRateHelper, DiscountMode, MarkToMarketReset, MAX_FIXING_DAYS,
    MAX_SWAP_TENOR,
};
use crate::index::IborIndex;
use crate::quotes::Quote;
use crate::repricing::DEFAULT_TOLERANCE;
use crate::traits::Curve;

/// A single configuration validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> CurveResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let reason = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(CurveError::invalid_configuration(reason))
    }
}

fn default_tolerance() -> f64 {
    1e-12
}

fn default_max_iterations() -> u32 {
    100
}

fn default_min_zero_rate() -> f64 {
    -0.10
}

fn default_max_zero_rate() -> f64 {
    0.30
}

fn default_max_bracket_retries() -> u32 {
    3
}

fn default_repricing_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

/// Piecewise bootstrap settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Root-finding tolerance on the zero rate.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Maximum solver iterations per pillar.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Lower end of the zero rate search bracket.
    #[serde(default = "default_min_zero_rate")]
    pub min_zero_rate: f64,

    /// Upper end of the zero rate search bracket.
    #[serde(default = "default_max_zero_rate")]
    pub max_zero_rate: f64,

    /// Times a pillar's bracket may be narrowed after a numerical failure.
    #[serde(default = "default_max_bracket_retries")]
    pub max_bracket_retries: u32,

    /// Tolerance of the final repricing check.
    #[serde(default = "default_repricing_tolerance")]
    pub repricing_tolerance: f64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            min_zero_rate: default_min_zero_rate(),
            max_zero_rate: default_max_zero_rate(),
            max_bracket_retries: default_max_bracket_retries(),
            repricing_tolerance: default_repricing_tolerance(),
        }
    }
}

impl BootstrapConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> CurveResult<Self> {
        let config: Self = toml::from_str(s)
            .map_err(|e| CurveError::invalid_configuration(format!("bootstrap config: {e}")))?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses a JSON document.
    pub fn from_json_str(s: &str) -> CurveResult<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| CurveError::invalid_configuration(format!("bootstrap config: {e}")))?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the zero rate search bracket.
    #[must_use]
    pub fn with_rate_bracket(mut self, min: f64, max: f64) -> Self {
        self.min_zero_rate = min;
        self.max_zero_rate = max;
        self
    }

    /// Sets the repricing tolerance.
    #[must_use]
    pub fn with_repricing_tolerance(mut self, tolerance: f64) -> Self {
        self.repricing_tolerance = tolerance;
        self
    }

    /// Solver settings for one pillar.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }
}

fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl Validate for BootstrapConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !positive_finite(self.tolerance) {
            errors.push(ValidationError::new("tolerance", "must be positive and finite"));
        }
        if self.max_iterations == 0 {
            errors.push(ValidationError::new("max_iterations", "must be at least 1"));
        }
        if !(self.min_zero_rate.is_finite() && self.max_zero_rate.is_finite()) {
            errors.push(ValidationError::new("min_zero_rate", "rate bracket must be finite"));
        } else if self.min_zero_rate >= self.max_zero_rate {
            errors.push(ValidationError::new(
                "min_zero_rate",
                format!(
                    "empty rate bracket [{}, {}]",
                    self.min_zero_rate, self.max_zero_rate
                ),
            ));
        }
        if !positive_finite(self.repricing_tolerance) {
            errors.push(ValidationError::new(
                "repricing_tolerance",
                "must be positive and finite",
            ));
        }

        errors
    }
}

fn default_tenor() -> Period {
    Period::years(5)
}

fn default_fixing_days() -> u32 {
    2
}

fn default_convention() -> BusinessDayConvention {
    BusinessDayConvention::ModifiedFollowing
}

fn default_true() -> bool {
    true
}

/// Mark-to-market settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarkToMarketConfig {
    /// Whether the base currency leg (rather than the quote leg) resets.
    #[serde(default)]
    pub is_fx_base_currency_leg_resettable: bool,
}

/// Conventions of a cross-currency basis swap helper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XccyHelperConfig {
    /// Swap tenor, e.g. `"5Y"`.
    #[serde(default = "default_tenor")]
    pub tenor: Period,

    /// Settlement lag in business days.
    #[serde(default = "default_fixing_days")]
    pub fixing_days: u32,

    /// Settlement and schedule calendar.
    #[serde(default)]
    pub calendar: CalendarId,

    /// Schedule business day convention.
    #[serde(default = "default_convention")]
    pub convention: BusinessDayConvention,

    /// Schedule end-of-month rule.
    #[serde(default)]
    pub end_of_month: bool,

    /// Whether the FX base currency is the collateral currency.
    #[serde(default = "default_true")]
    pub is_fx_base_currency_collateral_currency: bool,

    /// Whether the basis spread is paid on the FX base currency leg.
    #[serde(default)]
    pub is_basis_on_fx_base_currency_leg: bool,

    /// How the non-collateral leg is discounted.
    #[serde(default)]
    pub discount_mode: DiscountMode,

    /// Present for mark-to-market swaps.
    #[serde(default)]
    pub mark_to_market: Option<MarkToMarketConfig>,
}

impl Default for XccyHelperConfig {
    fn default() -> Self {
        Self {
            tenor: default_tenor(),
            fixing_days: default_fixing_days(),
            calendar: CalendarId::default(),
            convention: default_convention(),
            end_of_month: false,
            is_fx_base_currency_collateral_currency: true,
            is_basis_on_fx_base_currency_leg: false,
            discount_mode: DiscountMode::default(),
            mark_to_market: None,
        }
    }
}

impl XccyHelperConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> CurveResult<Self> {
        let config: Self = toml::from_str(s)
            .map_err(|e| CurveError::invalid_configuration(format!("helper config: {e}")))?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses a JSON document.
    pub fn from_json_str(s: &str) -> CurveResult<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| CurveError::invalid_configuration(format!("helper config: {e}")))?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Sets the swap tenor.
    #[must_use]
    pub fn with_tenor(mut self, tenor: Period) -> Self {
        self.tenor = tenor;
        self
    }

    /// Builds a helper from live market data.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the configuration is invalid, a
    /// mark-to-market swap is configured without an FX spot, or the helper
    /// rejects its inputs.
    pub fn build(
        &self,
        basis: Arc<dyn Quote>,
        base_currency_index: Arc<IborIndex>,
        quote_currency_index: Arc<IborIndex>,
        collateral_curve: Arc<dyn Curve>,
        fx_spot: Option<Arc<dyn Quote>>,
    ) -> CurveResult<CrossCurrencyBasisSwapRateHelper> {
        self.validate_or_error()?;

        let helper = CrossCurrencyBasisSwapRateHelper::new(
            basis,
            self.tenor,
            self.fixing_days,
            self.calendar.to_calendar(),
            self.convention,
            self.end_of_month,
            base_currency_index,
            quote_currency_index,
            collateral_curve,
            self.is_fx_base_currency_collateral_currency,
            self.is_basis_on_fx_base_currency_leg,
        )?
        .with_discount_mode(self.discount_mode);

        match (self.mark_to_market, fx_spot) {
            (None, _) => Ok(helper),
            (Some(mtm), Some(spot)) => Ok(helper.with_notional_reset(Box::new(
                MarkToMarketReset::from_flag(spot, mtm.is_fx_base_currency_leg_resettable),
            ))),
            (Some(_), None) => Err(CurveError::invalid_configuration(
                "mark-to-market helper requires an fx spot quote",
            )),
        }
    }
}

impl Validate for XccyHelperConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if !self.tenor.is_positive() {
            errors.push(ValidationError::new(
                "tenor",
                format!("{} must be positive", self.tenor),
            ));
        } else if self.tenor > MAX_SWAP_TENOR {
            errors.push(ValidationError::new(
                "tenor",
                format!("{} exceeds {MAX_SWAP_TENOR}", self.tenor),
            ));
        }
        if self.fixing_days > MAX_FIXING_DAYS {
            errors.push(ValidationError::new(
                "fixing_days",
                format!("{} exceeds {MAX_FIXING_DAYS}", self.fixing_days),
            ));
        }
        errors
    }
}
