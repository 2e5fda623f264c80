//! CSV and wake-profile export of solved points.

use ph_hull::{EquilibriumResult, HullParameters, WakeProfile};
use ph_sweep::SolvedPoint;
use std::path::{Path, PathBuf};

use crate::error::AppResult;

/// Results table in request order; the thrust offset column comes from `params`.
pub fn export_csv(path: &Path, params: &HullParameters, points: &[SolvedPoint]) -> AppResult<()> {
    let results: Vec<EquilibriumResult> = points.iter().map(|p| p.result.clone()).collect();
    ph_results::write_csv(path, &results, params.thrust_offset())?;
    Ok(())
}

/// One wake-profile file per solved velocity under `dir`.
pub fn export_wake_profiles(
    dir: &Path,
    params: &HullParameters,
    points: &[SolvedPoint],
) -> AppResult<Vec<PathBuf>> {
    let profiles: Vec<(f64, WakeProfile)> = points
        .iter()
        .map(|p| (p.result.velocity_mps, WakeProfile::for_result(params, &p.result)))
        .collect();
    let written =
        ph_results::write_wake_profiles(dir, profiles.iter().map(|(v, profile)| (*v, profile)))?;
    Ok(written)
}
