//! Brent's bracketed root finder.
//!
//! Combines bisection, secant and inverse quadratic interpolation. Requires a
//! sign change over the bracket and never leaves it.

use crate::error::{SolverError, SolverResult};

/// Brent solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct BrentConfig {
    /// Absolute tolerance on the root location
    pub xtol: f64,
    /// Maximum iterations
    pub max_iterations: usize,
}

impl Default for BrentConfig {
    fn default() -> Self {
        Self {
            xtol: 1e-12,
            max_iterations: 100,
        }
    }
}

/// Brent iteration result.
#[derive(Clone, Copy, Debug)]
pub struct BrentResult {
    /// Root location
    pub root: f64,
    /// Function value at the root
    pub residual: f64,
    /// Number of iterations
    pub iterations: usize,
}

fn eval<F: FnMut(f64) -> f64>(f: &mut F, x: f64) -> SolverResult<f64> {
    let fx = f(x);
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(SolverError::NonFinite { x })
    }
}

/// Find a root of `f` on `[lo, hi]`.
///
/// Fails with [`SolverError::NoSignChange`] when `f(lo)` and `f(hi)` share a
/// sign, and with [`SolverError::NonFinite`] as soon as `f` returns NaN or an
/// infinity.
pub fn brent<F>(mut f: F, lo: f64, hi: f64, config: &BrentConfig) -> SolverResult<BrentResult>
where
    F: FnMut(f64) -> f64,
{
    if !lo.is_finite() || !hi.is_finite() || lo >= hi {
        return Err(SolverError::InvalidBracket { lo, hi });
    }

    let mut a = lo;
    let mut b = hi;
    let mut fa = eval(&mut f, a)?;
    let mut fb = eval(&mut f, b)?;

    if fa == 0.0 {
        return Ok(BrentResult {
            root: a,
            residual: 0.0,
            iterations: 0,
        });
    }
    if fb == 0.0 {
        return Ok(BrentResult {
            root: b,
            residual: 0.0,
            iterations: 0,
        });
    }
    if fa.signum() == fb.signum() {
        return Err(SolverError::NoSignChange {
            lo,
            hi,
            f_lo: fa,
            f_hi: fb,
        });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iter in 1..=config.max_iterations {
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.xtol;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(BrentResult {
                root: b,
                residual: fb,
                iterations: iter,
            });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            // Interpolation step
            let s = fb / fa;
            let (p, q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let qa = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * qa * (qa - r) - (b - a) * (r - 1.0)),
                    (qa - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };

            let min1 = 3.0 * xm * q - (tol * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            // Bisection step
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(xm) };
        fb = eval(&mut f, b)?;
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "Brent reached {} iterations, bracket [{}, {}]",
            config.max_iterations, lo, hi
        ),
    })
}
