//! Scalar root finding for the planing equilibrium stages.
//!
//! Every stage of the equilibrium cascade is a one-dimensional root on a
//! bounded, physically plausible interval. The primary method is Brent's
//! bracketed solver; when the bracket has no sign change a damped Newton
//! iteration seeded by the caller takes over, and [`solve_bracketed`] reports
//! which path produced the answer.

pub mod bracket;
pub mod brent;
pub mod error;
pub mod grid;
pub mod newton;

pub use bracket::{RootConfig, RootOutcome, solve_bracketed};
pub use brent::{BrentConfig, BrentResult, brent};
pub use error::{SolverError, SolverResult};
pub use grid::{GridPoint, grid_search};
pub use newton::{NewtonConfig, NewtonResult, newton_scalar, newton_solve};
