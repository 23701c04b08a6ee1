//! Per-leg discount curve resolution.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::curves::ComposedCurve;
use crate::error::CurveResult;
use crate::traits::Curve;

/// One of the two legs of a cross-currency swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegSide {
    /// The FX base currency leg.
    Base,
    /// The FX quote currency leg.
    Quote,
}

impl LegSide {
    /// The other leg.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            LegSide::Base => LegSide::Quote,
            LegSide::Quote => LegSide::Base,
        }
    }
}

impl fmt::Display for LegSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegSide::Base => write!(f, "base"),
            LegSide::Quote => write!(f, "quote"),
        }
    }
}

/// How the non-collateral leg is discounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DiscountMode {
    /// Discount directly on the curve under construction.
    #[default]
    Direct,
    /// Discount on the collateral curve times the curve under construction,
    /// which then holds only the basis.
    Composed,
}

/// Chooses the discount curve of each leg.
///
/// The collateral leg always discounts on the collateral curve. The other
/// leg discounts on the curve under construction, which is unset until the
/// bootstrap driver binds it.
#[derive(Clone)]
pub struct DiscountResolver {
    collateral: Arc<dyn Curve>,
    collateral_side: LegSide,
    mode: DiscountMode,
    solved: Option<Arc<dyn Curve>>,
}

impl DiscountResolver {
    /// Creates an unbound resolver.
    #[must_use]
    pub fn new(
        collateral: Arc<dyn Curve>,
        is_fx_base_currency_collateral_currency: bool,
        mode: DiscountMode,
    ) -> Self {
        let collateral_side = if is_fx_base_currency_collateral_currency {
            LegSide::Base
        } else {
            LegSide::Quote
        };
        Self {
            collateral,
            collateral_side,
            mode,
            solved: None,
        }
    }

    /// Binds the curve under construction, deriving the composed curve if needed.
    pub fn bind(&mut self, curve: Arc<dyn Curve>) -> CurveResult<()> {
        let solved: Arc<dyn Curve> = match self.mode {
            DiscountMode::Direct => curve,
            DiscountMode::Composed => {
                Arc::new(ComposedCurve::new(Arc::clone(&self.collateral), curve)?)
            }
        };
        self.solved = Some(solved);
        Ok(())
    }

    /// Returns true once a curve has been bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.solved.is_some()
    }

    /// The discount curve of a leg, or `None` if it needs the unbound curve.
    #[must_use]
    pub fn curve_for(&self, side: LegSide) -> Option<&Arc<dyn Curve>> {
        if side == self.collateral_side {
            Some(&self.collateral)
        } else {
            self.solved.as_ref()
        }
    }

    /// The collateral curve.
    #[must_use]
    pub fn collateral(&self) -> &Arc<dyn Curve> {
        &self.collateral
    }

    /// The leg discounted on the collateral curve.
    #[must_use]
    pub fn collateral_side(&self) -> LegSide {
        self.collateral_side
    }

    /// The discounting mode of the non-collateral leg.
    #[must_use]
    pub fn mode(&self) -> DiscountMode {
        self.mode
    }
}

impl fmt::Debug for DiscountResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountResolver")
            .field("collateral_side", &self.collateral_side)
            .field("mode", &self.mode)
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatForwardCurve;
    use approx::assert_relative_eq;
    use xccy_core::Date;

    fn today() -> Date {
        Date::from_ymd(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_direct_mode() {
        let collateral: Arc<dyn Curve> = Arc::new(FlatForwardCurve::new(today(), 0.02));
        let mut resolver = DiscountResolver::new(collateral, true, DiscountMode::Direct);

        assert_eq!(resolver.collateral_side(), LegSide::Base);
        assert!(resolver.curve_for(LegSide::Base).is_some());
        assert!(resolver.curve_for(LegSide::Quote).is_none());

        resolver
            .bind(Arc::new(FlatForwardCurve::new(today(), 0.035)))
            .unwrap();
        let quote = resolver.curve_for(LegSide::Quote).unwrap();
        assert_relative_eq!(quote.zero_rate(2.0).unwrap(), 0.035, epsilon = 1e-14);
    }

    #[test]
    fn test_composed_mode() {
        let collateral: Arc<dyn Curve> = Arc::new(FlatForwardCurve::new(today(), 0.02));
        let mut resolver = DiscountResolver::new(collateral, false, DiscountMode::Composed);
        assert_eq!(resolver.collateral_side(), LegSide::Quote);

        resolver
            .bind(Arc::new(FlatForwardCurve::new(today(), 0.005)))
            .unwrap();
        let base = resolver.curve_for(LegSide::Base).unwrap();
        assert_relative_eq!(base.zero_rate(2.0).unwrap(), 0.025, epsilon = 1e-14);
    }
}
