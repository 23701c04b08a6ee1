//! Domain types shared across the workspace.
//!
//! - [`Date`]: Calendar date
//! - [`Period`]: Tenor such as `3M` or `5Y`
//! - [`Currency`]: ISO currency codes

mod currency;
mod date;
mod period;

pub use currency::Currency;
pub use date::Date;
pub use period::{Period, TimeUnit};
