//! CSV result tables and wake-profile `.dat` files.

use crate::ResultsResult;
use ph_hull::{EquilibriumResult, WakeProfile};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "V (m/s),Fn,R (N),Rs (N),Ra (N),Rt (N),Trim (deg),Sinkage (m),\
Lk (m),Lc (m),X (m),Y (m),Z (m),Lambda,a (m),c (m),d (m),f (m),Cv";

pub const WAKE_HEADER: &str = "# X/B  Centerline_Wake_Profile/B  Quarterbeam_Wake_Profile/B";

/// One row per result, in the given order. `thrust_offset_m` fills the `f` column.
pub fn results_csv(results: &[EquilibriumResult], thrust_offset_m: f64) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for r in results {
        let row = [
            r.velocity_mps,
            r.froude_length,
            r.resistance_hydro_n,
            r.resistance_spray_n,
            r.resistance_air_n,
            r.resistance_total_n,
            r.trim_deg,
            r.sinkage_m,
            r.keel_wetted_length_m,
            r.chine_wetted_length_m,
            r.spray_x_m,
            r.spray_y_m,
            r.spray_z_m,
            r.lambda,
            r.drag_arm_m,
            r.lift_arm_m,
            r.transom_draft_m,
            thrust_offset_m,
            r.froude_beam,
        ];
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }
    csv
}

pub fn write_csv(
    path: &Path,
    results: &[EquilibriumResult],
    thrust_offset_m: f64,
) -> ResultsResult<()> {
    fs::write(path, results_csv(results, thrust_offset_m))?;
    Ok(())
}

/// Directory name for a velocity: 3 decimals with `.` replaced by `P`.
pub fn velocity_dir_name(velocity: f64) -> String {
    format!("{velocity:.3}").replace('.', "P")
}

pub fn wake_profile_dat(profile: &WakeProfile) -> String {
    let mut dat = String::from(WAKE_HEADER);
    dat.push('\n');
    for (x, centerline, quarter_beam) in profile.rows() {
        let _ = writeln!(dat, "{x:.6} {centerline:.6} {quarter_beam:.6}");
    }
    dat
}

/// Write `<dir>/<V>/<V>_WakeProfile.dat` for each `(velocity, profile)` pair
/// and return the written paths.
pub fn write_wake_profiles<'a, I>(dir: &Path, profiles: I) -> ResultsResult<Vec<PathBuf>>
where
    I: IntoIterator<Item = (f64, &'a WakeProfile)>,
{
    let mut written = Vec::new();
    for (velocity, profile) in profiles {
        let name = velocity_dir_name(velocity);
        let folder = dir.join(&name);
        fs::create_dir_all(&folder)?;
        let path = folder.join(format!("{name}_WakeProfile.dat"));
        fs::write(&path, wake_profile_dat(profile))?;
        written.push(path);
    }
    Ok(written)
}
