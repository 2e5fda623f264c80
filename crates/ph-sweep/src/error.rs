use crate::state::{SweepCommand, SweepStatus};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("Invalid velocity {value} at position {index}: {reason}")]
    InvalidVelocity {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    #[error("Cannot parse speed list item '{item}'")]
    Parse { item: String },

    #[error("Invalid speed schedule: {0}")]
    InvalidSchedule(String),

    #[error("Cannot {command} a sweep that is {from}")]
    InvalidTransition {
        from: SweepStatus,
        command: SweepCommand,
    },

    #[error("Sweep worker panicked")]
    WorkerPanicked,
}

pub type SweepResult<T> = Result<T, SweepError>;
