//! Error types for equilibrium calculations.

use ph_core::error::PhError;
use std::fmt;
use thiserror::Error;

/// Nested solve stage that produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStage {
    LiftCoefficient,
    WettedLength,
    Trim,
}

impl fmt::Display for SolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LiftCoefficient => write!(f, "lift coefficient"),
            Self::WettedLength => write!(f, "wetted length"),
            Self::Trim => write!(f, "trim"),
        }
    }
}

/// Errors encountered while building hull parameters or solving equilibrium.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HullError {
    #[error("Degenerate input: velocity {velocity} m/s must exceed {min} m/s")]
    DegenerateInput { velocity: f64, min: f64 },

    #[error("Invalid trim {trim_deg} deg: must exceed {min} deg")]
    InvalidTrim { trim_deg: f64, min: f64 },

    #[error(
        "No equilibrium at {velocity} m/s: best trim {best_trim_deg} deg leaves moment {residual_moment:.3e} N*m (limit {limit:.3e})"
    )]
    NoEquilibriumFound {
        velocity: f64,
        best_trim_deg: f64,
        residual_moment: f64,
        limit: f64,
    },

    #[error("Root finding failed for {stage} at {velocity} m/s: {reason}")]
    RootFinding {
        stage: SolveStage,
        velocity: f64,
        reason: String,
    },

    #[error("Non-finite {what} at {velocity} m/s, trim {trim_deg} deg")]
    NonFinite {
        what: &'static str,
        velocity: f64,
        trim_deg: f64,
    },

    #[error("Missing hull parameter: {what}")]
    MissingParameter { what: &'static str },

    #[error("Invalid hull parameter: {0}")]
    InvalidParameter(#[from] PhError),
}

impl HullError {
    /// Short machine-friendly label, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DegenerateInput { .. } => "degenerate_input",
            Self::InvalidTrim { .. } => "invalid_trim",
            Self::NoEquilibriumFound { .. } => "no_equilibrium",
            Self::RootFinding { .. } => "root_finding",
            Self::NonFinite { .. } => "non_finite",
            Self::MissingParameter { .. } => "missing_parameter",
            Self::InvalidParameter(_) => "invalid_parameter",
        }
    }
}

pub type HullResult<T> = Result<T, HullError>;
