//! # Lastro Cashflows
//!
//! Amortization schedules for securitized receivables certificates.
//!
//! - [`CashflowInput`]: validated issuance terms, built with
//!   [`CashflowInput::builder`] or mapped from a stored [`SecurityRecord`]
//! - [`generate`]: the period-by-period schedule under the Integral (SAC or
//!   Bullet) and Price tables, with optional staged capital calls
//! - [`ScheduleSummary`]: totals and the realized annual IRR
//! - [`DisplayRow`]: decimal rows rounded for presentation
//!
//! ## Example
//!
//! ```rust
//! use lastro_cashflows::prelude::*;
//! use lastro_core::Date;
//!
//! let input = CashflowInput::builder()
//!     .principal(1_000_000.0)
//!     .issue_date(Date::from_ymd(2024, 5, 29).unwrap())
//!     .term_months(24)
//!     .nominal_annual_rate(0.09)
//!     .interest_table(InterestTable::Integral)
//!     .principal_method(PrincipalMethod::Sac)
//!     .build()
//!     .unwrap();
//!
//! let schedule = generate(&input).unwrap();
//! assert_eq!(schedule.rows.len(), 25);
//! assert!(schedule.rows[24].closing_balance.abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::unreadable_literal)]

pub mod display;
pub mod error;
pub mod input;
pub mod record;
pub mod schedule;
pub mod summary;
pub mod terms;

pub use display::{DisplayRow, DEFAULT_DISPLAY_DECIMALS};
pub use error::{CashflowError, CashflowResult};
pub use input::{Capitalization, CashflowInput, CashflowInputBuilder};
pub use record::{MonthsField, SecurityRecord, DEFAULT_FACE_VALUE};
pub use schedule::{generate, AccrualState, Schedule, ScheduleRow};
pub use summary::ScheduleSummary;
pub use terms::{Indexation, InterestTable, PrincipalMethod};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::display::DisplayRow;
    pub use crate::error::{CashflowError, CashflowResult};
    pub use crate::input::{Capitalization, CashflowInput, CashflowInputBuilder};
    pub use crate::record::SecurityRecord;
    pub use crate::schedule::{generate, Schedule, ScheduleRow};
    pub use crate::summary::ScheduleSummary;
    pub use crate::terms::{Indexation, InterestTable, PrincipalMethod};
}
