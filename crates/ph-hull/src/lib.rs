//! Calm-water planing hull equilibrium by the Savitsky method.
//!
//! Given hull geometry, mass distribution and a forward speed, the solver
//! finds the trim at which the pitching moment about the centre of gravity
//! vanishes, then derives resistance components, sinkage and whisker-spray
//! geometry at that trim.
//!
//! The cascade at a trial trim `τ`:
//! 1. invert the deadrise lift correction for the flat-plate coefficient `CL0`
//!    (independent of trim, solved once per speed),
//! 2. solve the wetted length-beam ratio `λ`,
//! 3. friction, hydrodynamic resistance, centre of pressure and the moment.
//!
//! The equilibrium trim is the root of step 3 on the validated trim range.

pub mod config;
pub mod equilibrium;
pub mod error;
pub mod friction;
pub mod lift;
pub mod params;
pub mod result;
pub mod spray;
pub mod trim;
pub mod wake;

pub use config::SolverConfig;
pub use equilibrium::EquilibriumSolver;
pub use error::{HullError, HullResult, SolveStage};
pub use params::{HullParameters, HullParametersBuilder};
pub use result::{Convergence, EquilibriumResult, FallbackUsage};
pub use spray::SprayGeometry;
pub use trim::{HydroState, TrimState};
pub use wake::WakeProfile;
