//! Root-finding algorithms.
//!
//! [`newton_raphson`] is the only solver the engine needs: every rate it
//! solves for (XIRR, the monthly IRR of a schedule) has a cheap analytic
//! derivative.
//!
//! # Example
//!
//! ```rust
//! use lastro_math::solvers::{newton_raphson, SolverConfig};
//!
//! // -1000 today, 1100 in one year
//! let f = |r: f64| -1000.0 + 1100.0 / (1.0 + r);
//! let df = |r: f64| -1100.0 / (1.0 + r).powi(2);
//!
//! let result = newton_raphson(f, df, 0.15, &SolverConfig::default()).unwrap();
//! assert!((result.root - 0.10).abs() < 1e-8);
//! ```

mod newton;

pub use newton::newton_raphson;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance for convergence, applied to `|f(x)|` and to the step size.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}
