//! # Xccy Core
//!
//! Date arithmetic and market conventions for the Xccy curve library.
//!
//! This crate provides the building blocks the cross-currency rate helpers consume:
//!
//! - **Types**: `Date`, `Period`, `Currency`
//! - **Calendars**: business day calendars and adjustment conventions
//! - **Day Counts**: ACT/360 and ACT/365F year fractions
//! - **Schedules**: backward-generated accrual schedules with end-of-month handling
//!
//! ## Example
//!
//! ```rust
//! use xccy_core::prelude::*;
//!
//! let trade = Date::from_ymd(2024, 3, 15).unwrap();
//! let maturity = trade.add_period(&"5Y".parse::<Period>().unwrap()).unwrap();
//! assert_eq!(maturity, Date::from_ymd(2029, 3, 15).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::similar_names)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, TargetCalendar, WeekendCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::schedule::{Schedule, ScheduleConfig};
    pub use crate::types::{Currency, Date, Period, TimeUnit};
}

pub use types::Date;
