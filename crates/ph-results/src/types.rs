//! Result data types.

use ph_sweep::{SweepStatus, SweepSummary};
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub project_name: String,
    pub timestamp: String,
    pub solver_version: String,
    pub status: SweepStatus,
    pub summary: SweepSummary,
}

impl RunManifest {
    /// Manifest stamped with the current UTC time.
    pub fn new(
        run_id: RunId,
        project_name: &str,
        solver_version: &str,
        status: SweepStatus,
        summary: SweepSummary,
    ) -> Self {
        Self {
            run_id,
            project_name: project_name.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            solver_version: solver_version.to_string(),
            status,
            summary,
        }
    }

    /// Only completed sweeps are reused from the cache.
    pub fn is_reusable(&self) -> bool {
        self.status == SweepStatus::Completed
    }
}
