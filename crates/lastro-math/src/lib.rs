//! # Lastro Math
//!
//! Numerical building blocks for the Lastro valuation engine.
//!
//! This crate provides:
//!
//! - **Solvers**: Newton-Raphson root finding with an analytic derivative
//! - **Interpolation**: log-linear interpolation with optional extrapolation
//!
//! Both are pure functions over immutable inputs. Failure to find a root is
//! reported through [`MathError`] so the caller can turn it into a tagged
//! "undefined" outcome.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Interpolator, LogLinearInterpolator};
    pub use crate::solvers::{newton_raphson, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
