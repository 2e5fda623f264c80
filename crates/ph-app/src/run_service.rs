//! Sweep execution and run caching service.

use std::path::Path;
use std::time::Instant;

use ph_hull::{EquilibriumResult, WakeProfile};
use ph_project::Project;
use ph_results::{RunManifest, RunStore};
use ph_sweep::{PointFailure, SolvedPoint, SweepController, SweepEvent, SweepHandle, SweepReport};

use crate::compile::{self, CompiledRun};
use crate::error::AppResult;
use crate::progress::{RunProgressEvent, RunStage, SweepProgress};
use crate::project_service;

type ProgressCallback<'a> = Option<&'a mut dyn FnMut(RunProgressEvent)>;

/// Options for running sweeps.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: "0.1.0".to_string(),
        }
    }
}

/// Request to execute a sweep for a project file.
pub struct RunRequest<'a> {
    pub project_path: &'a Path,
    pub options: RunOptions,
}

#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub sweep_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub results: Vec<SolvedPoint>,
    pub failures: Vec<PointFailure>,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

/// A stored run read back from the project's run store.
#[derive(Debug, Clone)]
pub struct LoadedRun {
    pub manifest: RunManifest,
    pub results: Vec<SolvedPoint>,
    pub failures: Vec<PointFailure>,
}

fn emit_progress(progress_cb: &mut ProgressCallback<'_>, event: RunProgressEvent) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(event);
    }
}

fn emit_stage(
    progress_cb: &mut ProgressCallback<'_>,
    stage: RunStage,
    started: Instant,
    message: &str,
) {
    emit_progress(
        progress_cb,
        RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            Some(message.to_string()),
        ),
    );
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Execute or load a run and stream progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    progress_cb: ProgressCallback<'_>,
) -> AppResult<RunResponse> {
    ensure_run_controlled(request, None, progress_cb)
}

/// Like [`ensure_run_with_progress`], and hands the sweep's control handle to
/// `on_start` once the worker is running. `on_start` is not called when the
/// run comes from the cache.
pub fn ensure_run_controlled(
    request: &RunRequest,
    on_start: Option<&mut dyn FnMut(SweepHandle)>,
    mut progress_cb: ProgressCallback<'_>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();
    let solver_version = &request.options.solver_version;

    emit_stage(&mut progress_cb, RunStage::LoadingProject, started, "Loading project");
    let project = project_service::load_project(request.project_path)?;

    emit_stage(&mut progress_cb, RunStage::CheckingCache, started, "Checking run cache");
    let run_id = ph_results::compute_run_id(&project, solver_version);
    let store = RunStore::for_project(request.project_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        let load_started = Instant::now();
        let manifest = store.load_manifest(&run_id)?;
        if manifest.is_reusable() {
            emit_stage(
                &mut progress_cb,
                RunStage::LoadingCachedResult,
                started,
                "Loading cached run",
            );
            let results = store.load_results(&run_id)?;
            let failures = store.load_failures(&run_id)?;
            timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
            timing.total_time_s = started.elapsed().as_secs_f64();
            tracing::info!(run_id = %run_id, "loaded cached run");

            let mut done = RunProgressEvent::stage(
                RunStage::Completed,
                timing.total_time_s,
                Some("Loaded cached run".to_string()),
            );
            done.status = Some(manifest.status);
            emit_progress(&mut progress_cb, done);

            return Ok(RunResponse {
                run_id,
                manifest,
                results,
                failures,
                loaded_from_cache: true,
                timing,
            });
        }
        tracing::info!(run_id = %run_id, status = %manifest.status, "cached run is incomplete; solving again");
    }

    emit_stage(&mut progress_cb, RunStage::CompilingProject, started, "Compiling project");
    let compile_started = Instant::now();
    let compiled = compile::compile_project(&project)?;
    timing.compile_time_s = compile_started.elapsed().as_secs_f64();

    let sweep_started = Instant::now();
    let report = execute_sweep(&compiled, on_start, &mut progress_cb, started)?;
    timing.sweep_time_s = sweep_started.elapsed().as_secs_f64();

    emit_stage(&mut progress_cb, RunStage::SavingResults, started, "Saving results");
    let save_started = Instant::now();
    let manifest = RunManifest::new(
        run_id.clone(),
        &project.name,
        solver_version,
        report.status,
        report.summary,
    );
    store.save_run(&manifest, &report.results, &report.failures)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();
    tracing::info!(run_id = %run_id, status = %report.status, "run saved");

    let mut done = RunProgressEvent::stage(
        RunStage::Completed,
        timing.total_time_s,
        Some(format!("Sweep {}", report.status)),
    );
    done.status = Some(report.status);
    emit_progress(&mut progress_cb, done);

    Ok(RunResponse {
        run_id,
        manifest,
        results: report.results,
        failures: report.failures,
        loaded_from_cache: false,
        timing,
    })
}

/// Run the compiled sweep to its end, forwarding worker events as progress.
fn execute_sweep(
    compiled: &CompiledRun,
    on_start: Option<&mut dyn FnMut(SweepHandle)>,
    progress_cb: &mut ProgressCallback<'_>,
    started: Instant,
) -> AppResult<SweepReport> {
    let mut controller = SweepController::with_options(compiled.solver(), compiled.options);
    controller.start(compiled.request.clone())?;
    if let Some(cb) = on_start {
        cb(controller.handle());
    }

    let mut progress = SweepProgress {
        total: compiled.request.len(),
        ..SweepProgress::default()
    };

    // The stream ends with one terminal event, or disconnects if the worker died.
    while let Ok(event) = controller.events().recv() {
        let (stage, message) = match &event {
            SweepEvent::Started { total } => {
                (RunStage::Sweeping, format!("Solving {total} speeds"))
            }
            SweepEvent::PointSolved {
                velocity, result, ..
            } => {
                progress.completed += 1;
                progress.velocity_mps = Some(*velocity);
                progress.trim_deg = Some(result.trim_deg);
                (RunStage::Sweeping, format!("Solved V = {velocity:.3} m/s"))
            }
            SweepEvent::PointFailed {
                velocity, error, ..
            } => {
                progress.completed += 1;
                progress.failed += 1;
                progress.velocity_mps = Some(*velocity);
                progress.trim_deg = None;
                (RunStage::Sweeping, format!("V = {velocity:.3} m/s failed: {error}"))
            }
            SweepEvent::Paused { next_index } => {
                (RunStage::Paused, format!("Paused before speed {next_index}"))
            }
            SweepEvent::Resumed { next_index } => {
                (RunStage::Sweeping, format!("Resumed at speed {next_index}"))
            }
            SweepEvent::Finished(_) | SweepEvent::Stopped(_) | SweepEvent::Failed { .. } => break,
        };
        if progress.total > 0 {
            progress.fraction_complete = progress.completed as f64 / progress.total as f64;
        }
        emit_progress(
            progress_cb,
            RunProgressEvent {
                stage,
                elapsed_wall_s: started.elapsed().as_secs_f64(),
                message: Some(message),
                sweep: Some(progress.clone()),
                status: None,
            },
        );
    }

    Ok(controller.join()?)
}

/// Solve a single speed for the project's hull and solver settings.
pub fn solve_point(project: &Project, velocity: f64) -> AppResult<(EquilibriumResult, WakeProfile)> {
    let params = compile::build_hull_parameters(project)?;
    let config = compile::build_solver_config(project.solver.as_ref());
    let solver = ph_hull::EquilibriumSolver::with_config(params, config);
    let result = solver.solve(velocity)?;
    let wake = solver.wake_profile(&result);
    Ok((result, wake))
}

/// Stored runs for a project, newest first.
pub fn list_runs(project_path: &Path) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_project(project_path)?;
    Ok(store.list_runs()?)
}

pub fn load_run(project_path: &Path, run_id: &str) -> AppResult<LoadedRun> {
    let store = RunStore::for_project(project_path)?;
    Ok(LoadedRun {
        manifest: store.load_manifest(run_id)?,
        results: store.load_results(run_id)?,
        failures: store.load_failures(run_id)?,
    })
}
