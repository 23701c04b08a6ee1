//! Cross-currency basis swap rate helper.
//!
//! The helper prices a floating-vs-floating swap between an FX base
//! currency leg and an FX quote currency leg, with the quoted basis spread
//! on one of them. One leg discounts on the known collateral curve, the
//! other on the curve being bootstrapped.
//!
//! The spread enters every coupon linearly, so the implied basis is a
//! closed form once both legs are valued:
//!
//! ```text
//! bps     = basis on base leg ? −bps_base : bps_quote
//! implied = s0 − (npv_quote − npv_base) / bps
//! ```
//!
//! where `s0` is the spread built into the coupons. Attaching a
//! [`NotionalReset`] turns the helper into a mark-to-market swap; the
//! resettable leg is then valued with per-period notionals whose exchanges
//! carry the MtM adjustment.

use std::fmt;
use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;
use xccy_core::calendars::{BusinessDayConvention, Calendar};
use xccy_core::schedule::{Schedule, ScheduleConfig};
use xccy_core::types::{Date, Period};

use super::discount::{DiscountMode, DiscountResolver, LegSide};
use super::reset::{MarkToMarketReset, NotionalReset};
use super::{HelperKind, HelperView, RateHelper};
use crate::cashflows::{self, value_constant_notional_leg, value_resetting_leg, Leg, LegValuation};
use crate::error::{ensure_finite, CurveError, CurveResult};
use crate::index::IborIndex;
use crate::quotes::Quote;
use crate::traits::Curve;

/// State the cached implied quote was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    epoch: u64,
    basis_version: u64,
    reset_version: u64,
}

/// Contract terms the dates and legs are generated from.
struct SwapTerms {
    basis: Arc<dyn Quote>,
    tenor: Period,
    fixing_days: u32,
    calendar: Arc<dyn Calendar>,
    convention: BusinessDayConvention,
    end_of_month: bool,
    base_index: Arc<IborIndex>,
    quote_index: Arc<IborIndex>,
    is_basis_on_fx_base_currency_leg: bool,
}

/// Everything that changes with the evaluation date.
#[derive(Debug, Clone)]
struct Dates {
    evaluation: Date,
    settlement: Date,
    maturity: Date,
    initial_exchange: Date,
    final_exchange: Date,
    base_schedule: Schedule,
    quote_schedule: Schedule,
    base_leg: Leg,
    quote_leg: Leg,
    embedded_spread: f64,
}

/// Rate helper for a cross-currency basis swap quote.
///
/// Built with [`new`](Self::new) the notionals are constant; built with
/// [`mark_to_market`](Self::mark_to_market) one leg resets to the FX forward
/// every period.
///
/// # Lifecycle
///
/// 1. Construction validates the inputs and sets dates relative to the
///    collateral curve's reference date.
/// 2. [`set_term_structure`](RateHelper::set_term_structure) binds the curve
///    under construction; it must precede every implied quote query.
/// 3. [`implied_quote`](RateHelper::implied_quote) may be called any number of
///    times; it recomputes only when the bound curve or a quote changed.
/// 4. [`initialize_dates`](RateHelper::initialize_dates) regenerates schedules
///    and coupons when the evaluation date moves.
pub struct CrossCurrencyBasisSwapRateHelper {
    terms: SwapTerms,
    resolver: DiscountResolver,
    notional_reset: Option<Box<dyn NotionalReset>>,
    dates: Dates,
    epoch: u64,
    cache: Mutex<Option<(CacheKey, f64)>>,
}

impl CrossCurrencyBasisSwapRateHelper {
    /// Creates a constant-notional helper.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the tenor is not positive, is
    /// shorter than an index tenor or longer than [`MAX_SWAP_TENOR`], the
    /// settlement lag exceeds [`MAX_FIXING_DAYS`], or no schedule can be
    /// generated.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        basis: Arc<dyn Quote>,
        tenor: Period,
        fixing_days: u32,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
        end_of_month: bool,
        base_currency_index: Arc<IborIndex>,
        quote_currency_index: Arc<IborIndex>,
        collateral_curve: Arc<dyn Curve>,
        is_fx_base_currency_collateral_currency: bool,
        is_basis_on_fx_base_currency_leg: bool,
    ) -> CurveResult<Self> {
        validate_inputs(tenor, fixing_days, &base_currency_index, &quote_currency_index)?;

        let evaluation = collateral_curve.reference_date();
        let resolver = DiscountResolver::new(
            collateral_curve,
            is_fx_base_currency_collateral_currency,
            DiscountMode::default(),
        );

        let terms = SwapTerms {
            basis,
            tenor,
            fixing_days,
            calendar,
            convention,
            end_of_month,
            base_index: base_currency_index,
            quote_index: quote_currency_index,
            is_basis_on_fx_base_currency_leg,
        };
        let dates = terms.build_dates(evaluation)?;

        Ok(Self {
            terms,
            resolver,
            notional_reset: None,
            dates,
            epoch: 0,
            cache: Mutex::new(None),
        })
    }

    /// Creates a mark-to-market helper resetting one leg to the FX forward.
    ///
    /// `fx_spot` is in units of quote currency per unit of base currency.
    #[allow(clippy::too_many_arguments)]
    pub fn mark_to_market(
        basis: Arc<dyn Quote>,
        tenor: Period,
        fixing_days: u32,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
        end_of_month: bool,
        base_currency_index: Arc<IborIndex>,
        quote_currency_index: Arc<IborIndex>,
        collateral_curve: Arc<dyn Curve>,
        is_fx_base_currency_collateral_currency: bool,
        is_basis_on_fx_base_currency_leg: bool,
        fx_spot: Arc<dyn Quote>,
        is_fx_base_currency_leg_resettable: bool,
    ) -> CurveResult<Self> {
        Ok(Self::new(
            basis,
            tenor,
            fixing_days,
            calendar,
            convention,
            end_of_month,
            base_currency_index,
            quote_currency_index,
            collateral_curve,
            is_fx_base_currency_collateral_currency,
            is_basis_on_fx_base_currency_leg,
        )?
        .with_notional_reset(Box::new(MarkToMarketReset::from_flag(
            fx_spot,
            is_fx_base_currency_leg_resettable,
        ))))
    }

    /// Attaches a notional reset strategy and marks its reset dates.
    #[must_use]
    pub fn with_notional_reset(mut self, mut reset: Box<dyn NotionalReset>) -> Self {
        let side = reset.resettable_leg();
        reset.mark_reset_dates(self.leg(side));
        self.notional_reset = Some(reset);
        self.invalidate();
        self
    }

    /// Sets how the non-collateral leg is discounted.
    ///
    /// Any bound curve is dropped and must be set again.
    #[must_use]
    pub fn with_discount_mode(mut self, mode: DiscountMode) -> Self {
        self.resolver = DiscountResolver::new(
            Arc::clone(self.resolver.collateral()),
            self.resolver.collateral_side() == LegSide::Base,
            mode,
        );
        self.invalidate();
        self
    }

    /// Builds a floating leg over a schedule.
    ///
    /// See [`cashflows::build_cross_currency_leg`].
    pub fn build_cross_currency_leg(
        schedule: &Schedule,
        index: &Arc<IborIndex>,
        notional: f64,
        basis: f64,
    ) -> CurveResult<Leg> {
        cashflows::build_cross_currency_leg(schedule, index, notional, basis)
    }

    /// Swap tenor.
    #[must_use]
    pub fn tenor(&self) -> Period {
        self.terms.tenor
    }

    /// Settlement lag in business days.
    #[must_use]
    pub fn fixing_days(&self) -> u32 {
        self.terms.fixing_days
    }

    /// FX base currency index.
    #[must_use]
    pub fn base_currency_index(&self) -> &Arc<IborIndex> {
        &self.terms.base_index
    }

    /// FX quote currency index.
    #[must_use]
    pub fn quote_currency_index(&self) -> &Arc<IborIndex> {
        &self.terms.quote_index
    }

    /// Returns true if the base leg is discounted on the collateral curve.
    #[must_use]
    pub fn is_fx_base_currency_collateral_currency(&self) -> bool {
        self.resolver.collateral_side() == LegSide::Base
    }

    /// Returns true if the basis spread is paid on the base leg.
    #[must_use]
    pub fn is_basis_on_fx_base_currency_leg(&self) -> bool {
        self.terms.is_basis_on_fx_base_currency_leg
    }

    /// The leg carrying the basis spread.
    #[must_use]
    pub fn spread_leg(&self) -> LegSide {
        if self.terms.is_basis_on_fx_base_currency_leg {
            LegSide::Base
        } else {
            LegSide::Quote
        }
    }

    /// The discount resolver.
    #[must_use]
    pub fn discount_resolver(&self) -> &DiscountResolver {
        &self.resolver
    }

    /// The notional reset strategy, if any.
    #[must_use]
    pub fn notional_reset(&self) -> Option<&dyn NotionalReset> {
        self.notional_reset.as_deref()
    }

    /// One of the two legs.
    #[must_use]
    pub fn leg(&self, side: LegSide) -> &Leg {
        match side {
            LegSide::Base => &self.dates.base_leg,
            LegSide::Quote => &self.dates.quote_leg,
        }
    }

    /// The accrual schedule of one leg.
    #[must_use]
    pub fn schedule(&self, side: LegSide) -> &Schedule {
        match side {
            LegSide::Base => &self.dates.base_schedule,
            LegSide::Quote => &self.dates.quote_schedule,
        }
    }

    /// Evaluation date the dates were generated from.
    #[must_use]
    pub fn evaluation_date(&self) -> Date {
        self.dates.evaluation
    }

    /// Swap start date.
    #[must_use]
    pub fn settlement_date(&self) -> Date {
        self.dates.settlement
    }

    /// Unadjusted swap end date.
    #[must_use]
    pub fn unadjusted_maturity(&self) -> Date {
        self.dates.maturity
    }

    /// Date of the initial notional exchange.
    #[must_use]
    pub fn initial_exchange_date(&self) -> Date {
        self.dates.initial_exchange
    }

    /// Date of the final notional exchange.
    #[must_use]
    pub fn final_exchange_date(&self) -> Date {
        self.dates.final_exchange
    }

    /// Spread built into the coupons of the spread leg.
    #[must_use]
    pub fn embedded_spread(&self) -> f64 {
        self.dates.embedded_spread
    }

    /// Calls `f` with a typed view of this helper.
    pub fn visit<R>(&self, f: impl FnOnce(HelperView<'_>) -> R) -> R {
        match self.notional_reset.as_deref() {
            None => f(HelperView::ConstantNotional(self)),
            Some(reset) => f(HelperView::MarkToMarket {
                helper: self,
                reset,
            }),
        }
    }

    /// Values both legs on the currently bound curves.
    pub fn leg_valuations(&self) -> CurveResult<(LegValuation, LegValuation)> {
        let (Some(base_curve), Some(quote_curve)) = (
            self.resolver.curve_for(LegSide::Base),
            self.resolver.curve_for(LegSide::Quote),
        ) else {
            return Err(CurveError::term_structure_not_set(self.description()));
        };

        let constant = |side: LegSide, curve: &Arc<dyn Curve>| {
            value_constant_notional_leg(
                self.leg(side),
                self.dates.initial_exchange,
                self.dates.final_exchange,
                curve.as_ref(),
            )
        };

        match self.notional_reset.as_deref() {
            None => Ok((
                constant(LegSide::Base, base_curve)?,
                constant(LegSide::Quote, quote_curve)?,
            )),
            Some(reset) => {
                let notionals =
                    reset.reset_notionals(base_curve.as_ref(), quote_curve.as_ref())?;
                let resettable = reset.resettable_leg();
                let resetting_curve = match resettable {
                    LegSide::Base => base_curve,
                    LegSide::Quote => quote_curve,
                };
                let reset_value =
                    value_resetting_leg(self.leg(resettable), &notionals, resetting_curve.as_ref())?;
                Ok(match resettable {
                    LegSide::Base => (reset_value, constant(LegSide::Quote, quote_curve)?),
                    LegSide::Quote => (constant(LegSide::Base, base_curve)?, reset_value),
                })
            }
        }
    }

    fn compute_implied_quote(&self) -> CurveResult<f64> {
        let (base, quote) = self.leg_valuations()?;

        let bps = if self.terms.is_basis_on_fx_base_currency_leg {
            -base.bps
        } else {
            quote.bps
        };
        if !bps.is_finite() || bps == 0.0 {
            return Err(CurveError::numerical_failure(format!(
                "spread annuity {bps} for {}",
                self.description()
            )));
        }

        let implied = self.dates.embedded_spread - (quote.npv() - base.npv()) / bps;
        ensure_finite(implied, || format!("implied basis for {}", self.description()))
    }

    fn cache_key(&self) -> CacheKey {
        CacheKey {
            epoch: self.epoch,
            basis_version: self.terms.basis.version(),
            reset_version: self.notional_reset.as_ref().map_or(0, |r| r.version()),
        }
    }

    fn invalidate(&mut self) {
        self.epoch += 1;
        *self.cache.get_mut() = None;
    }
}

impl SwapTerms {
    /// Settlement, maturity, schedules and legs for an evaluation date.
    fn build_dates(&self, evaluation: Date) -> CurveResult<Dates> {
        let reference = self
            .calendar
            .adjust(evaluation, BusinessDayConvention::Following);
        let lag = i32::try_from(self.fixing_days).map_err(|_| {
            CurveError::invalid_configuration(format!(
                "settlement lag of {} days",
                self.fixing_days
            ))
        })?;
        let settlement = self.calendar.advance_business_days(reference, lag);
        let maturity = settlement.add_period(&self.tenor)?;

        let schedule_for = |index: &IborIndex| {
            let config = ScheduleConfig::new(
                settlement,
                maturity,
                index.tenor(),
                Arc::clone(&self.calendar),
            )
            .with_convention(self.convention)
            .with_end_of_month(self.end_of_month);
            Schedule::generate(&config).map_err(|e| {
                CurveError::invalid_configuration(format!("{} schedule: {e}", index.name()))
            })
        };
        let base_schedule = schedule_for(&self.base_index)?;
        let quote_schedule = schedule_for(&self.quote_index)?;

        let embedded_spread = self.basis.value().filter(|v| v.is_finite()).unwrap_or(0.0);
        let (base_spread, quote_spread) = if self.is_basis_on_fx_base_currency_leg {
            (embedded_spread, 0.0)
        } else {
            (0.0, embedded_spread)
        };
        let base_leg =
            cashflows::build_cross_currency_leg(&base_schedule, &self.base_index, 1.0, base_spread)?;
        let quote_leg = cashflows::build_cross_currency_leg(
            &quote_schedule,
            &self.quote_index,
            1.0,
            quote_spread,
        )?;

        let (Some(initial_exchange), Some(final_exchange)) = (
            base_leg.start_date().min(quote_leg.start_date()),
            base_leg.maturity_date().max(quote_leg.maturity_date()),
        ) else {
            return Err(CurveError::EmptySchedule);
        };

        Ok(Dates {
            evaluation,
            settlement,
            maturity,
            initial_exchange,
            final_exchange,
            base_schedule,
            quote_schedule,
            base_leg,
            quote_leg,
            embedded_spread,
        })
    }
}

/// Longest swap tenor a helper accepts.
pub const MAX_SWAP_TENOR: Period = Period::years(100);

/// Longest settlement lag, in business days, a helper accepts.
pub const MAX_FIXING_DAYS: u32 = 30;

fn validate_inputs(
    tenor: Period,
    fixing_days: u32,
    base: &IborIndex,
    quote: &IborIndex,
) -> CurveResult<()> {
    if !tenor.is_positive() {
        return Err(CurveError::invalid_configuration(format!(
            "swap tenor {tenor} must be positive"
        )));
    }
    if !matches!(
        tenor.partial_cmp(&MAX_SWAP_TENOR),
        Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
    ) {
        return Err(CurveError::invalid_configuration(format!(
            "swap tenor {tenor} exceeds {MAX_SWAP_TENOR}"
        )));
    }
    if fixing_days > MAX_FIXING_DAYS {
        return Err(CurveError::invalid_configuration(format!(
            "settlement lag of {fixing_days} days exceeds {MAX_FIXING_DAYS}"
        )));
    }
    for index in [base, quote] {
        if !index.tenor().is_positive() {
            return Err(CurveError::invalid_configuration(format!(
                "{} has non-positive tenor",
                index.name()
            )));
        }
        match tenor.partial_cmp(&index.tenor()) {
            Some(std::cmp::Ordering::Less) => {
                return Err(CurveError::invalid_configuration(format!(
                    "swap tenor {tenor} is shorter than {} tenor {}",
                    index.name(),
                    index.tenor()
                )))
            }
            None => {
                return Err(CurveError::invalid_configuration(format!(
                    "swap tenor {tenor} is not comparable with {} tenor {}",
                    index.name(),
                    index.tenor()
                )))
            }
            _ => {}
        }
    }
    Ok(())
}

impl RateHelper for CrossCurrencyBasisSwapRateHelper {
    fn quote(&self) -> CurveResult<f64> {
        self.terms
            .basis
            .value()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CurveError::missing_quote(format!("{} basis", self.description())))
    }

    fn implied_quote(&self) -> CurveResult<f64> {
        if !self.resolver.is_bound() {
            return Err(CurveError::term_structure_not_set(self.description()));
        }

        let key = self.cache_key();
        let mut cache = self.cache.lock();
        if let Some((cached_key, value)) = *cache {
            if cached_key == key {
                return Ok(value);
            }
        }

        trace!("recomputing implied quote for {}", self.description());
        let value = self.compute_implied_quote()?;
        *cache = Some((key, value));
        Ok(value)
    }

    fn earliest_date(&self) -> Date {
        self.dates.initial_exchange
    }

    fn pillar_date(&self) -> Date {
        self.dates.final_exchange
    }

    fn maturity_date(&self) -> Date {
        self.dates.final_exchange
    }

    fn set_term_structure(&mut self, curve: Arc<dyn Curve>) -> CurveResult<()> {
        self.resolver.bind(curve)?;
        self.invalidate();
        Ok(())
    }

    fn initialize_dates(&mut self, evaluation_date: Date) -> CurveResult<()> {
        self.dates = self.terms.build_dates(evaluation_date)?;
        if let Some(reset) = self.notional_reset.as_deref_mut() {
            let leg = match reset.resettable_leg() {
                LegSide::Base => &self.dates.base_leg,
                LegSide::Quote => &self.dates.quote_leg,
            };
            reset.mark_reset_dates(leg);
        }
        self.invalidate();
        Ok(())
    }

    fn kind(&self) -> HelperKind {
        match self.notional_reset.as_deref() {
            None => HelperKind::ConstantNotional,
            Some(reset) => HelperKind::MarkToMarket {
                resettable: reset.resettable_leg(),
            },
        }
    }

    fn accept(&self, visitor: &mut dyn FnMut(HelperView<'_>)) {
        self.visit(|view| visitor(view));
    }

    fn description(&self) -> String {
        let style = if self.notional_reset.is_some() {
            "MtM"
        } else {
            "constant notional"
        };
        format!(
            "{} {}/{} {} xccy basis",
            self.terms.tenor,
            self.terms.base_index.name(),
            self.terms.quote_index.name(),
            style
        )
    }
}

impl fmt::Debug for CrossCurrencyBasisSwapRateHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossCurrencyBasisSwapRateHelper")
            .field("description", &self.description())
            .field("basis", &self.terms.basis.value())
            .field("settlement", &self.dates.settlement)
            .field("pillar", &self.dates.final_exchange)
            .field("spread_leg", &self.spread_leg())
            .field("resolver", &self.resolver)
            .field("notional_reset", &self.notional_reset)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatForwardCurve;
    use crate::quotes::SimpleQuote;
    use approx::assert_abs_diff_eq;
    use xccy_core::calendars::WeekendCalendar;
    use xccy_core::types::Currency;

    fn today() -> Date {
        Date::from_ymd(2024, 1, 15).unwrap()
    }

    fn flat(rate: f64) -> Arc<dyn Curve> {
        Arc::new(FlatForwardCurve::new(today(), rate))
    }

    fn index(family: &str, currency: Currency, tenor: Period, rate: f64) -> Arc<IborIndex> {
        Arc::new(
            IborIndex::new(family, currency, tenor, 2, Arc::new(WeekendCalendar))
                .with_forecast_curve(flat(rate)),
        )
    }

    fn helper(basis: f64, tenor: Period) -> CurveResult<CrossCurrencyBasisSwapRateHelper> {
        CrossCurrencyBasisSwapRateHelper::new(
            Arc::new(SimpleQuote::new(basis)),
            tenor,
            2,
            Arc::new(WeekendCalendar),
            BusinessDayConvention::ModifiedFollowing,
            false,
            index("USDLibor", Currency::USD, Period::months(3), 0.02),
            index("Euribor", Currency::EUR, Period::months(3), 0.03),
            flat(0.02),
            true,
            false,
        )
    }

    #[test]
    fn test_construction_sets_dates() {
        let helper = helper(-0.0015, Period::years(2)).unwrap();

        // Monday + 2 business days
        assert_eq!(helper.settlement_date(), Date::from_ymd(2024, 1, 17).unwrap());
        assert_eq!(helper.earliest_date(), helper.settlement_date());
        assert_eq!(helper.pillar_date(), Date::from_ymd(2026, 1, 19).unwrap());
        assert_eq!(helper.leg(LegSide::Base).len(), 8);
        assert!(!helper.leg(LegSide::Base).carries_spread());
        assert!(helper.leg(LegSide::Quote).carries_spread());
        assert_eq!(helper.kind(), HelperKind::ConstantNotional);
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            helper(0.0, Period::years(0)),
            Err(CurveError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            helper(0.0, Period::months(1)),
            Err(CurveError::InvalidConfiguration { .. })
        ));

        assert!(matches!(
            helper(0.0, "200000000Y".parse().unwrap()),
            Err(CurveError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            helper(0.0, Period::days(2_000_000_000)),
            Err(CurveError::InvalidConfiguration { .. })
        ));
        assert!(helper(0.0, MAX_SWAP_TENOR).is_ok());

        let slow_settlement = CrossCurrencyBasisSwapRateHelper::new(
            Arc::new(SimpleQuote::new(0.0)),
            Period::years(5),
            u32::MAX,
            Arc::new(WeekendCalendar),
            BusinessDayConvention::ModifiedFollowing,
            false,
            index("USDLibor", Currency::USD, Period::months(3), 0.02),
            index("Euribor", Currency::EUR, Period::months(3), 0.03),
            flat(0.02),
            true,
            false,
        );
        assert!(matches!(
            slow_settlement,
            Err(CurveError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_same_index_on_both_legs_implies_zero() {
        let libor = index("USDLibor", Currency::USD, Period::months(3), 0.025);
        let collateral = flat(0.02);
        let mut helper = CrossCurrencyBasisSwapRateHelper::new(
            Arc::new(SimpleQuote::new(0.0)),
            Period::years(5),
            2,
            Arc::new(WeekendCalendar),
            BusinessDayConvention::ModifiedFollowing,
            false,
            Arc::clone(&libor),
            libor,
            Arc::clone(&collateral),
            true,
            false,
        )
        .unwrap();

        helper.set_term_structure(collateral).unwrap();
        assert_abs_diff_eq!(helper.implied_quote().unwrap(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_unbound_curve() {
        let helper = helper(-0.0015, Period::years(5)).unwrap();
        assert!(matches!(
            helper.implied_quote(),
            Err(CurveError::TermStructureNotSet { .. })
        ));
    }

    #[test]
    fn test_cache_follows_quote_and_curve() {
        let basis = Arc::new(SimpleQuote::new(-0.0015));
        let mut helper = CrossCurrencyBasisSwapRateHelper::new(
            basis.clone(),
            Period::years(5),
            2,
            Arc::new(WeekendCalendar),
            BusinessDayConvention::ModifiedFollowing,
            false,
            index("USDLibor", Currency::USD, Period::months(3), 0.02),
            index("Euribor", Currency::EUR, Period::months(3), 0.03),
            flat(0.02),
            true,
            false,
        )
        .unwrap();

        helper.set_term_structure(flat(0.03)).unwrap();
        let first = helper.implied_quote().unwrap();
        assert_eq!(helper.implied_quote().unwrap(), first);

        // The implied basis does not depend on the embedded spread
        basis.set_value(0.0040);
        assert_abs_diff_eq!(helper.implied_quote().unwrap(), first, epsilon = 1e-12);

        helper.set_term_structure(flat(0.031)).unwrap();
        assert!((helper.implied_quote().unwrap() - first).abs() > 1e-6);
    }

    #[test]
    fn test_visitor_sees_kind() {
        let helper = helper(0.0, Period::years(1)).unwrap();
        let mut seen = None;
        helper.accept(&mut |view| {
            seen = Some(matches!(view, HelperView::ConstantNotional(_)));
        });
        assert_eq!(seen, Some(true));

        let spot: Arc<dyn Quote> = Arc::new(SimpleQuote::new(1.1));
        let mtm = helper.with_notional_reset(Box::new(MarkToMarketReset::new(spot, LegSide::Quote)));
        let reset_dates = mtm.visit(|view| match view {
            HelperView::MarkToMarket { reset, .. } => reset.reset_dates().len(),
            HelperView::ConstantNotional(_) => 0,
        });
        assert_eq!(reset_dates, 4);
        assert_eq!(
            mtm.kind(),
            HelperKind::MarkToMarket {
                resettable: LegSide::Quote
            }
        );
    }
}
