//! Error types for the ph-app service layer.

/// Application error type wrapping the backend crates' errors behind one
/// interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Project compilation failed: {0}")]
    Compile(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Sweep error: {0}")]
    Sweep(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ph-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ph_project::ProjectError> for AppError {
    fn from(err: ph_project::ProjectError) -> Self {
        match err {
            ph_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<ph_project::ValidationError> for AppError {
    fn from(err: ph_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ph_hull::HullError> for AppError {
    fn from(err: ph_hull::HullError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<ph_sweep::SweepError> for AppError {
    fn from(err: ph_sweep::SweepError) -> Self {
        AppError::Sweep(err.to_string())
    }
}

impl From<ph_results::ResultsError> for AppError {
    fn from(err: ph_results::ResultsError) -> Self {
        match err {
            ph_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
