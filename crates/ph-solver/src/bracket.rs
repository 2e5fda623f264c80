//! Bracketed solve with an observable fallback.

use crate::brent::{BrentConfig, brent};
use crate::error::SolverError;
use crate::newton::{NewtonConfig, newton_scalar};

/// Settings shared by the bracketed stage and its Newton fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct RootConfig {
    pub brent: BrentConfig,
    pub newton: NewtonConfig,
}

/// How a root was obtained.
#[derive(Clone, Debug, PartialEq)]
pub enum RootOutcome {
    /// Brent converged inside the bracket.
    Converged { x: f64, iterations: usize },
    /// The bracket failed; Newton from the fallback seed produced `x`.
    FallbackUsed {
        x: f64,
        residual: f64,
        bracket_error: SolverError,
    },
    /// Both the bracket and the fallback failed.
    Failed {
        bracket_error: SolverError,
        fallback_error: SolverError,
    },
}

impl RootOutcome {
    /// Root location, if any path produced one.
    pub fn root(&self) -> Option<f64> {
        match self {
            Self::Converged { x, .. } | Self::FallbackUsed { x, .. } => Some(*x),
            Self::Failed { .. } => None,
        }
    }

    pub fn used_fallback(&self) -> bool {
        matches!(self, Self::FallbackUsed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Solve `f(x) = 0` on `(lo, hi)`, falling back to Newton from `fallback_seed`
/// when the bracket cannot be used (no sign change, non-finite endpoint, or
/// exhausted iterations).
pub fn solve_bracketed<F>(
    f: F,
    lo: f64,
    hi: f64,
    fallback_seed: f64,
    config: &RootConfig,
) -> RootOutcome
where
    F: Fn(f64) -> f64,
{
    let bracket_error = match brent(&f, lo, hi, &config.brent) {
        Ok(result) => {
            return RootOutcome::Converged {
                x: result.root,
                iterations: result.iterations,
            };
        }
        Err(e) => e,
    };

    tracing::debug!(
        lo,
        hi,
        fallback_seed,
        error = %bracket_error,
        "bracket unusable, trying Newton fallback"
    );

    match newton_scalar(&f, fallback_seed, &config.newton) {
        Ok(result) => RootOutcome::FallbackUsed {
            x: result.x[0],
            residual: result.residual_norm,
            bracket_error,
        },
        Err(fallback_error) => RootOutcome::Failed {
            bracket_error,
            fallback_error,
        },
    }
}
