//! Service-level sweep runs against a project file in a scratch directory.

use std::path::PathBuf;

use ph_app::{
    AppError, RunOptions, RunProgressEvent, RunRequest, RunStage, ensure_run,
    ensure_run_controlled, ensure_run_with_progress, export_csv, export_wake_profiles, list_runs,
    load_run, save_project, solve_point,
};
use ph_project::Project;
use ph_sweep::{SweepHandle, SweepStatus};

fn scratch_project(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("ph_app_tests").join(name);
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("reference.yaml");
    save_project(&path, &Project::reference()).unwrap();
    path
}

fn request(path: &PathBuf, use_cache: bool) -> RunRequest<'_> {
    RunRequest {
        project_path: path,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    }
}

#[test]
fn sweep_reports_progress_and_is_cached() {
    let path = scratch_project("cached");

    let mut events: Vec<RunProgressEvent> = Vec::new();
    let first = ensure_run_with_progress(&request(&path, true), Some(&mut |e| events.push(e)))
        .expect("sweep should run");

    assert!(!first.loaded_from_cache);
    assert_eq!(first.manifest.status, SweepStatus::Completed);
    assert_eq!(first.results.len(), 5);
    assert!(first.failures.is_empty());

    assert!(events.iter().any(|e| e.stage == RunStage::CompilingProject));
    let last_sweep = events
        .iter()
        .filter_map(|e| e.sweep.as_ref())
        .last()
        .expect("sweep progress");
    assert_eq!(last_sweep.completed, 5);
    assert!((last_sweep.fraction_complete - 1.0).abs() < 1e-12);
    let done = events.last().unwrap();
    assert_eq!(done.stage, RunStage::Completed);
    assert_eq!(done.status, Some(SweepStatus::Completed));

    let second = ensure_run(&request(&path, true)).unwrap();
    assert!(second.loaded_from_cache);
    assert_eq!(second.run_id, first.run_id);
    assert_eq!(second.results.len(), 5);

    let runs = list_runs(&path).unwrap();
    assert_eq!(runs.len(), 1);
    let loaded = load_run(&path, &first.run_id).unwrap();
    assert_eq!(loaded.manifest.summary.solved, 5);
}

#[test]
fn stopped_sweep_is_saved_but_not_reused() {
    let path = scratch_project("stopped");

    let mut stop_accepted = false;
    let mut on_start = |handle: SweepHandle| stop_accepted = handle.stop().is_ok();
    let response = ensure_run_controlled(&request(&path, true), Some(&mut on_start), None).unwrap();

    if stop_accepted {
        assert_eq!(response.manifest.status, SweepStatus::Stopped);
        assert!(!response.manifest.is_reusable());
        let again = ensure_run(&request(&path, true)).unwrap();
        assert!(!again.loaded_from_cache);
        assert_eq!(again.manifest.status, SweepStatus::Completed);
    } else {
        assert_eq!(response.manifest.status, SweepStatus::Completed);
    }
}

#[test]
fn missing_run_is_reported() {
    let path = scratch_project("missing");
    assert!(matches!(
        load_run(&path, "does-not-exist"),
        Err(AppError::RunNotFound(_))
    ));
}

#[test]
fn single_speed_solve_and_export() {
    let path = scratch_project("export");
    let project = Project::reference();

    let (result, wake) = solve_point(&project, 5.2267).unwrap();
    assert!((result.trim_deg - 3.533884).abs() < 0.05);
    assert_eq!(wake.len(), 61);

    let response = ensure_run(&request(&path, false)).unwrap();
    let dir = path.parent().unwrap();
    let params = ph_app::build_hull_parameters(&project).unwrap();

    let csv_path = dir.join("results.csv");
    export_csv(&csv_path, &params, &response.results).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 6);

    let written = export_wake_profiles(&dir.join("wake"), &params, &response.results).unwrap();
    assert_eq!(written.len(), 5);
    assert!(written[0].ends_with("5P227/5P227_WakeProfile.dat"));
}

#[test]
fn degenerate_speed_is_a_solver_error() {
    let err = solve_point(&Project::reference(), 0.05).unwrap_err();
    assert!(matches!(err, AppError::Solver(_)));
}
