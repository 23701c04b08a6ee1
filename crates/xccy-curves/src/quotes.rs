//! Market observables read by the rate helpers.
//!
//! A [`Quote`] exposes its current value plus a version counter. Helpers
//! never subscribe to quotes; they remember the version they last priced
//! with and recompute when it differs.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// A market observable (basis spread, FX spot).
pub trait Quote: Send + Sync + fmt::Debug {
    /// Returns the current value, or `None` if the quote is unset.
    fn value(&self) -> Option<f64>;

    /// Returns a counter that increases whenever the value changes.
    fn version(&self) -> u64;

    /// Returns true if the quote holds a finite value.
    fn is_valid(&self) -> bool {
        self.value().is_some_and(f64::is_finite)
    }
}

/// A thread-safe quote owned and updated by the market data layer.
///
/// # Example
///
/// ```rust
/// use xccy_curves::quotes::{Quote, SimpleQuote};
///
/// let basis = SimpleQuote::new(-0.0015);
/// let v0 = basis.version();
/// basis.set_value(-0.0020);
/// assert_eq!(basis.value(), Some(-0.0020));
/// assert!(basis.version() > v0);
/// ```
pub struct SimpleQuote {
    value: RwLock<Option<f64>>,
    version: AtomicU64,
}

impl SimpleQuote {
    /// Creates a quote holding a value.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value: RwLock::new(Some(value)),
            version: AtomicU64::new(0),
        }
    }

    /// Creates a quote without a value.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            value: RwLock::new(None),
            version: AtomicU64::new(0),
        }
    }

    /// Sets the value and marks dependents stale.
    pub fn set_value(&self, value: f64) {
        *self.value.write() = Some(value);
        self.version.fetch_add(1, Ordering::AcqRel);
    }

    /// Clears the value and marks dependents stale.
    pub fn reset(&self) {
        *self.value.write() = None;
        self.version.fetch_add(1, Ordering::AcqRel);
    }
}

impl Quote for SimpleQuote {
    fn value(&self) -> Option<f64> {
        *self.value.read()
    }

    fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

impl fmt::Debug for SimpleQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleQuote")
            .field("value", &self.value())
            .field("version", &self.version())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioning() {
        let quote = SimpleQuote::new(1.10);
        assert!(quote.is_valid());
        assert_eq!(quote.version(), 0);

        quote.set_value(1.12);
        assert_eq!(quote.version(), 1);
        assert_eq!(quote.value(), Some(1.12));

        quote.reset();
        assert_eq!(quote.version(), 2);
        assert_eq!(quote.value(), None);
        assert!(!quote.is_valid());
    }

    #[test]
    fn test_non_finite_is_invalid() {
        let quote = SimpleQuote::empty();
        assert!(!quote.is_valid());
        quote.set_value(f64::NAN);
        assert!(!quote.is_valid());
    }
}
