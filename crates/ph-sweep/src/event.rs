use crate::state::{PointFailure, SolvedPoint, SweepStatus};
use ph_hull::{EquilibriumResult, HullError};
use serde::{Deserialize, Serialize};

/// Counts at the end of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SweepSummary {
    pub total: usize,
    pub solved: usize,
    pub failed: usize,
    /// Solved points that came from the trim grid fallback
    pub low_confidence: usize,
    /// First velocity index not processed
    pub next_index: usize,
}

/// Notifications published by the sweep worker, in order.
///
/// Exactly one of `Finished`, `Stopped` or `Failed` ends every stream.
#[derive(Debug, Clone)]
pub enum SweepEvent {
    Started {
        total: usize,
    },
    PointSolved {
        index: usize,
        velocity: f64,
        result: EquilibriumResult,
    },
    PointFailed {
        index: usize,
        velocity: f64,
        error: HullError,
    },
    Paused {
        next_index: usize,
    },
    Resumed {
        next_index: usize,
    },
    Finished(SweepSummary),
    Stopped(SweepSummary),
    Failed {
        message: String,
        summary: SweepSummary,
    },
}

impl SweepEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Finished(_) | Self::Stopped(_) | Self::Failed { .. }
        )
    }
}

/// Final outcome returned by [`SweepController::join`](crate::SweepController::join).
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub status: SweepStatus,
    pub summary: SweepSummary,
    /// Solved points in request order
    pub results: Vec<SolvedPoint>,
    /// Failed points in request order
    pub failures: Vec<PointFailure>,
    /// Present when the sweep ended in `Failed`
    pub failure_message: Option<String>,
}

impl SweepReport {
    /// Results without their indices, in request order.
    pub fn equilibria(&self) -> impl Iterator<Item = &EquilibriumResult> {
        self.results.iter().map(|p| &p.result)
    }
}
