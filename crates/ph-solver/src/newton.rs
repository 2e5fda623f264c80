//! Newton solver with backtracking and a lower-bound constraint.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};

/// Newton solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance for residual norm
    pub rel_tol: f64,
    /// Smallest admissible value of every unknown
    pub lower_bound: Option<f64>,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
    /// Relative step for the forward difference derivative in [`newton_scalar`]
    pub fd_epsilon: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: 1e-10,
            rel_tol: 1e-12,
            lower_bound: None,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
            fd_epsilon: 1e-7,
        }
    }
}

impl NewtonConfig {
    fn within_bounds(&self, x: &DVector<f64>) -> bool {
        match self.lower_bound {
            Some(lb) => x.iter().all(|&v| v >= lb),
            None => true,
        }
    }
}

/// Newton iteration result.
#[derive(Clone, Debug)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

/// Newton solver with line search and a lower-bound constraint.
///
/// Trial points outside the bound, or where the residual is not finite, are
/// rejected by the line search rather than evaluated further.
pub fn newton_solve<F, J>(
    x0: DVector<f64>,
    residual_fn: F,
    jacobian_fn: J,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    J: Fn(&DVector<f64>) -> SolverResult<DMatrix<f64>>,
{
    if !config.within_bounds(&x0) {
        return Err(SolverError::Numeric {
            what: "Initial guess violates lower bound".to_string(),
        });
    }

    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();
    let r0_norm = r_norm;

    for iter in 0..config.max_iterations {
        // Check convergence
        if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
                converged: true,
            });
        }

        // Compute Jacobian
        let jac = jacobian_fn(&x)?;

        // Solve J * dx = -r
        let dx = jac
            .lu()
            .solve(&(-r.clone()))
            .ok_or_else(|| SolverError::Numeric {
                what: "Jacobian solve failed".to_string(),
            })?;

        // Backtrack until the step is admissible and reduces the residual
        let mut alpha = 1.0;
        let mut accepted = None;
        for _ in 0..=config.max_line_search_iters {
            let x_new = &x + alpha * &dx;
            if config.within_bounds(&x_new) {
                match residual_fn(&x_new) {
                    Ok(r_new) => {
                        let r_new_norm = r_new.norm();
                        if r_new_norm < r_norm {
                            accepted = Some((x_new, r_new, r_new_norm));
                            break;
                        }
                    }
                    Err(SolverError::NonFinite { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
            alpha *= config.line_search_beta;
        }

        let Some((x_new, r_new, r_new_norm)) = accepted else {
            return Err(SolverError::ConvergenceFailed {
                what: format!(
                    "Line search stagnated at iteration {}, residual = {:e}",
                    iter, r_norm
                ),
            });
        };

        // Update solution
        x = x_new;
        r = r_new;
        r_norm = r_new_norm;
    }

    if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
        return Ok(NewtonResult {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
            converged: true,
        });
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "Maximum iterations {} reached, residual = {:e}",
            config.max_iterations, r_norm
        ),
    })
}

/// One-sided slope of `f` at `x`. The step is always taken upward so a
/// lower-bounded unknown never leaves its domain.
fn forward_slope<F>(f: &F, x: f64, fx: f64, rel_step: f64) -> SolverResult<f64>
where
    F: Fn(f64) -> f64,
{
    let h = rel_step * x.abs().max(1.0);
    let slope = (f(x + h) - fx) / h;
    if slope.is_finite() {
        Ok(slope)
    } else {
        Err(SolverError::NonFinite { x: x + h })
    }
}

/// Scalar Newton iteration seeded at `seed`, with a forward difference derivative.
pub fn newton_scalar<F>(f: F, seed: f64, config: &NewtonConfig) -> SolverResult<NewtonResult>
where
    F: Fn(f64) -> f64,
{
    let residual_fn = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
        let fx = f(x[0]);
        if fx.is_finite() {
            Ok(DVector::from_element(1, fx))
        } else {
            Err(SolverError::NonFinite { x: x[0] })
        }
    };

    let jacobian_fn = |x: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
        let slope = forward_slope(&f, x[0], f(x[0]), config.fd_epsilon)?;
        Ok(DMatrix::from_element(1, 1, slope))
    };

    newton_solve(
        DVector::from_element(1, seed),
        residual_fn,
        jacobian_fn,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_quadratic() {
        // Solve x^2 - 4 = 0, x > 0
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] - 4.0))
        };
        let jacobian = |x: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::from_element(1, 1, 2.0 * x[0]))
        };

        let x0 = DVector::from_element(1, 3.0);
        let config = NewtonConfig::default();
        let result = newton_solve(x0, residual, jacobian, &config).unwrap();

        assert!(result.converged);
        assert!((result.x[0] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn forward_slope_of_power_law() {
        // d/dx x^0.6 = 0.6 x^-0.4
        let f = |x: f64| x.powf(0.6);
        let slope = forward_slope(&f, 2.0, f(2.0), 1e-7).unwrap();
        assert!((slope - 0.6 * 2.0_f64.powf(-0.4)).abs() < 1e-5);
    }

    #[test]
    fn forward_slope_scales_step_with_magnitude() {
        let f = |x: f64| 3.0 * x;
        let slope = forward_slope(&f, 1.0e6, f(1.0e6), 1e-7).unwrap();
        assert!((slope - 3.0).abs() < 1e-6);
    }

    #[test]
    fn forward_slope_reports_non_finite() {
        let f = |x: f64| if x > 1.0 { f64::NAN } else { x };
        let err = forward_slope(&f, 1.0, 1.0, 1e-7).unwrap_err();
        assert!(matches!(err, SolverError::NonFinite { .. }));
    }

    #[test]
    fn scalar_power_law_from_far_seed() {
        // 0.0055 x^2.5 - 50 = 0, root well outside a (0, 10) bracket
        let config = NewtonConfig {
            lower_bound: Some(0.0),
            ..NewtonConfig::default()
        };
        let result = newton_scalar(|x| 0.0055 * x.powf(2.5) - 50.0, 5.0, &config).unwrap();
        let expected = (50.0_f64 / 0.0055).powf(0.4);
        assert!((result.x[0] - expected).abs() < 1e-8);
    }

    #[test]
    fn lower_bound_is_respected() {
        // sqrt is undefined below zero; the line search must stay feasible
        let config = NewtonConfig {
            lower_bound: Some(0.0),
            ..NewtonConfig::default()
        };
        let result = newton_scalar(|x| x.sqrt() - 0.1, 4.0, &config).unwrap();
        assert!((result.x[0] - 0.01).abs() < 1e-9);
    }

    #[test]
    fn infeasible_seed_is_rejected() {
        let config = NewtonConfig {
            lower_bound: Some(0.0),
            ..NewtonConfig::default()
        };
        let err = newton_scalar(|x| x - 1.0, -1.0, &config).unwrap_err();
        assert!(matches!(err, SolverError::Numeric { .. }));
    }

    #[test]
    fn rootless_function_fails() {
        let err = newton_scalar(|x| x * x + 1.0, 3.0, &NewtonConfig::default()).unwrap_err();
        assert!(matches!(err, SolverError::ConvergenceFailed { .. } | SolverError::Numeric { .. }));
    }
}
