//! ph-results: run cache, result tables and wake-profile export.

pub mod export;
pub mod hash;
pub mod store;
pub mod types;

pub use export::{results_csv, velocity_dir_name, wake_profile_dat, write_csv, write_wake_profiles};
pub use hash::compute_run_id;
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
