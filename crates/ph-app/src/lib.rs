//! Shared application service layer for the planing hull tools.
//!
//! Front ends go through this crate for project loading, compilation of a
//! project into solver inputs, sweep execution with progress reporting and
//! cached run lookup.

pub mod compile;
pub mod error;
pub mod export;
pub mod progress;
pub mod project_service;
pub mod run_service;

pub use compile::{CompiledRun, build_hull_parameters, build_solver_config, compile_project};
pub use error::{AppError, AppResult};
pub use export::{export_csv, export_wake_profiles};
pub use progress::{RunProgressEvent, RunStage, SweepProgress};
pub use project_service::{ProjectSummary, load_project, save_project, summarize, validate_project};
pub use run_service::{
    LoadedRun, RunOptions, RunRequest, RunResponse, RunTimingSummary, ensure_run,
    ensure_run_controlled, ensure_run_with_progress, list_runs, load_run, solve_point,
};
