//! Controlled execution of the equilibrium solver over a list of speeds.
//!
//! A [`SweepController`] solves each velocity of a [`SweepRequest`] in order on
//! one worker thread, appends results to a shared [`SweepState`], publishes
//! [`SweepEvent`]s as they happen, and accepts pause/resume/stop between
//! velocities.

pub mod controller;
pub mod error;
pub mod event;
pub mod request;
pub mod schedule;
pub mod solver;
pub mod state;

pub use controller::{FailurePolicy, SweepController, SweepHandle, SweepOptions};
pub use error::{SweepError, SweepResult};
pub use event::{SweepEvent, SweepReport, SweepSummary};
pub use request::SweepRequest;
pub use schedule::{MAX_SCHEDULE_POINTS, SpeedSchedule};
pub use solver::PointSolver;
pub use state::{PointFailure, SolvedPoint, SweepCommand, SweepState, SweepStatus};
