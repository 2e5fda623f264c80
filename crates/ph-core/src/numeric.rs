use crate::PhError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Relative difference `|a - b| / |b|`, falling back to the absolute difference near zero.
pub fn relative_error(actual: Real, expected: Real) -> Real {
    let diff = (actual - expected).abs();
    if expected.abs() < 1e-12 {
        diff
    } else {
        diff / expected.abs()
    }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PhError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PhError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, PhError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(PhError::OutOfRange {
            what,
            value: v,
            expected: "> 0",
        })
    }
}

/// Finite and strictly inside `(lo, hi)`.
pub fn ensure_open_range(
    v: Real,
    lo: Real,
    hi: Real,
    what: &'static str,
    expected: &'static str,
) -> Result<Real, PhError> {
    let v = ensure_finite(v, what)?;
    if v > lo && v < hi {
        Ok(v)
    } else {
        Err(PhError::OutOfRange {
            what,
            value: v,
            expected,
        })
    }
}

/// `n` evenly spaced points over `[lo, hi]` with an exact endpoint.
pub fn linspace(lo: Real, hi: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let delta = (hi - lo) / (n - 1) as Real;
            let mut points: Vec<Real> = (0..n).map(|i| lo + i as Real * delta).collect();
            points[n - 1] = hi;
            points
        }
    }
}
