//! Error types for root-finding operations.

use ph_core::error::PhError;
use thiserror::Error;

/// Errors that can occur while locating a root.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("No sign change on [{lo}, {hi}]: f(lo)={f_lo:.6e}, f(hi)={f_hi:.6e}")]
    NoSignChange {
        lo: f64,
        hi: f64,
        f_lo: f64,
        f_hi: f64,
    },

    #[error("Invalid bracket: [{lo}, {hi}]")]
    InvalidBracket { lo: f64, hi: f64 },

    #[error("Non-finite function value at x={x}")]
    NonFinite { x: f64 },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for PhError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::NoSignChange { .. } | SolverError::InvalidBracket { .. } => {
                PhError::InvalidArg { what: "bracket" }
            }
            SolverError::NonFinite { x } => PhError::NonFinite {
                what: "root function",
                value: x,
            },
            SolverError::ConvergenceFailed { .. } => PhError::InvalidArg {
                what: "convergence",
            },
            SolverError::Numeric { .. } => PhError::InvalidArg { what: "numeric" },
        }
    }
}
