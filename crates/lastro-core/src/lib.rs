//! # Lastro Core
//!
//! Core date arithmetic for the Lastro cashflow and valuation engine.
//!
//! This crate provides the leaf building blocks used throughout Lastro:
//!
//! - **Types**: the [`Date`] newtype with calendar month stepping
//! - **Day Count Conventions**: 30/360 (Excel `DAYS360`) and business-day/252
//! - **Business Day Calendars**: the ANBIMA national calendar
//! - **Rates**: effective annual/monthly rate conversion
//!
//! Everything here is pure and stateless.
//!
//! ## Example
//!
//! ```rust
//! use lastro_core::prelude::*;
//!
//! let issue = Date::from_ymd(2024, 5, 29).unwrap();
//! let maturity = issue.add_months(24).unwrap();
//! assert_eq!(issue.months_between(&maturity), 24);
//!
//! let days = Thirty360US.day_count(issue, maturity);
//! assert_eq!(days, 720);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod rates;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{AnbimaCalendar, Calendar, WeekendCalendar};
    pub use crate::daycounts::{BusinessDays252, DayCount, Thirty360E, Thirty360US};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::rates::{annual_to_monthly_effective, monthly_to_annual_effective};
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::Date;
