//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// Converges as soon as `|f(x)| < tolerance` or the step between successive
/// estimates falls below `tolerance`. An exactly zero derivative, a
/// non-finite iterate, or running out of iterations are all failures.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use lastro_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-8);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        if !fx.is_finite() {
            return Err(MathError::NonFinite { iteration });
        }

        if fx.abs() < config.tolerance {
            log::debug!("newton converged on residual after {iteration} iterations: x = {x}");
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);
        if dfx == 0.0 {
            return Err(MathError::ZeroDerivative { x });
        }

        let next = x - fx / dfx;
        if !next.is_finite() {
            return Err(MathError::NonFinite { iteration });
        }

        if (next - x).abs() < config.tolerance {
            log::debug!(
                "newton converged on step after {} iterations: x = {next}",
                iteration + 1
            );
            return Ok(SolverResult {
                root: next,
                iterations: iteration + 1,
                residual: f(next),
            });
        }

        x = next;
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}
