//! Sweep lifecycle and the shared, append-only result log.

use crate::error::{SweepError, SweepResult};
use ph_hull::{EquilibriumResult, HullError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lifecycle of a sweep.
///
/// `Idle -> Running -> {Paused <-> Running} -> {Completed | Stopped | Failed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepStatus {
    Idle,
    Running,
    Paused,
    Completed,
    Stopped,
    Failed,
}

/// Control actions on a sweep. Pause, resume and stop travel to the worker
/// over its command channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepCommand {
    Start,
    Pause,
    Resume,
    Stop,
}

impl SweepStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Stopped | Self::Failed)
    }

    /// Status after `command`, or the rejected transition.
    pub fn apply(self, command: SweepCommand) -> SweepResult<Self> {
        use SweepCommand as C;
        match (self, command) {
            (Self::Idle, C::Start) => Ok(Self::Running),
            (Self::Running, C::Pause) => Ok(Self::Paused),
            (Self::Paused, C::Resume) => Ok(Self::Running),
            (Self::Running | Self::Paused, C::Stop) => Ok(Self::Stopped),
            (from, command) => Err(SweepError::InvalidTransition { from, command }),
        }
    }
}

impl fmt::Display for SweepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl fmt::Display for SweepCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Stop => "stop",
        };
        f.write_str(s)
    }
}

/// A solved velocity and its position in the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedPoint {
    pub index: usize,
    pub result: EquilibriumResult,
}

/// A velocity that produced no result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFailure {
    pub index: usize,
    pub velocity: f64,
    /// Short error label, e.g. `degenerate_input`
    pub kind: String,
    pub message: String,
}

impl PointFailure {
    pub fn new(index: usize, velocity: f64, error: &HullError) -> Self {
        Self {
            index,
            velocity,
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct Log {
    results: Vec<SolvedPoint>,
    failures: Vec<PointFailure>,
    cursor: usize,
}

/// Results of one sweep, appended by the worker and readable from any thread.
///
/// Entries are never modified or removed once pushed, so an index observed by
/// a reader stays valid for the life of the sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepState {
    log: Arc<RwLock<Log>>,
}

impl SweepState {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Log> {
        self.log.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Log> {
        self.log.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn push_result(&self, point: SolvedPoint) {
        let mut log = self.write();
        log.cursor = point.index + 1;
        log.results.push(point);
    }

    pub(crate) fn push_failure(&self, failure: PointFailure) {
        let mut log = self.write();
        log.cursor = failure.index + 1;
        log.failures.push(failure);
    }

    /// Index of the next velocity to be solved.
    pub fn cursor(&self) -> usize {
        self.read().cursor
    }

    pub fn len(&self) -> usize {
        self.read().results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().results.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.read().failures.len()
    }

    pub fn result(&self, i: usize) -> Option<SolvedPoint> {
        self.read().results.get(i).cloned()
    }

    /// Snapshot of the solved points, in request order.
    pub fn results(&self) -> Vec<SolvedPoint> {
        self.read().results.clone()
    }

    pub fn failures(&self) -> Vec<PointFailure> {
        self.read().failures.clone()
    }

    /// Points published after the first `from`.
    pub fn results_since(&self, from: usize) -> Vec<SolvedPoint> {
        let log = self.read();
        log.results.get(from..).map(<[_]>::to_vec).unwrap_or_default()
    }

    pub(crate) fn low_confidence_count(&self) -> usize {
        self.read()
            .results
            .iter()
            .filter(|p| !p.result.is_converged())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_transitions() {
        use SweepCommand::*;
        use SweepStatus::*;
        assert_eq!(Idle.apply(Start), Ok(Running));
        assert_eq!(Running.apply(Pause), Ok(Paused));
        assert_eq!(Paused.apply(Resume), Ok(Running));
        assert_eq!(Running.apply(Stop), Ok(Stopped));
        assert_eq!(Paused.apply(Stop), Ok(Stopped));
    }

    #[test]
    fn illegal_transitions() {
        use SweepCommand::*;
        use SweepStatus::*;
        for (from, command) in [
            (Idle, Pause),
            (Idle, Resume),
            (Idle, Stop),
            (Running, Resume),
            (Running, Start),
            (Paused, Pause),
            (Completed, Pause),
            (Stopped, Resume),
            (Failed, Stop),
        ] {
            assert_eq!(
                from.apply(command),
                Err(SweepError::InvalidTransition { from, command })
            );
        }
    }

    #[test]
    fn terminal_states() {
        assert!(SweepStatus::Completed.is_terminal());
        assert!(SweepStatus::Stopped.is_terminal());
        assert!(SweepStatus::Failed.is_terminal());
        assert!(!SweepStatus::Paused.is_terminal());
    }

    #[test]
    fn failure_advances_cursor() {
        let state = SweepState::new();
        let err = HullError::DegenerateInput {
            velocity: 0.0,
            min: 0.1,
        };
        state.push_failure(PointFailure::new(0, 0.0, &err));
        assert_eq!(state.cursor(), 1);
        assert!(state.is_empty());
        assert_eq!(state.failures()[0].kind, "degenerate_input");
        assert!(state.results_since(5).is_empty());
    }
}
