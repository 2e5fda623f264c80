use clap::{Parser, Subcommand};
use ph_app::{
    AppResult, RunOptions, RunProgressEvent, RunRequest, RunStage, export, project_service,
    run_service,
};
use ph_hull::{Convergence, EquilibriumResult};
use ph_sweep::SweepHandle;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "ph-cli")]
#[command(about = "Planing hull equilibrium and resistance by the Savitsky method", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a project file
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Solve the equilibrium at one speed
    Solve {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Forward speed in m/s
        #[arg(long)]
        speed: f64,
    },
    /// Solve every speed of the project's schedule
    Sweep {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
        /// Write the results table to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write wake profiles under this directory
        #[arg(long)]
        wake_dir: Option<PathBuf>,
        /// Read p (pause), r (resume) and s (stop) lines from stdin
        #[arg(long)]
        interactive: bool,
    },
    /// List cached runs for a project
    Runs {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Run ID to display
        run_id: String,
        /// Write the results table to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write wake profiles under this directory
        #[arg(long)]
        wake_dir: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {e}");
    }

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Solve {
            project_path,
            speed,
        } => cmd_solve(&project_path, speed),
        Commands::Sweep {
            project_path,
            no_cache,
            csv,
            wake_dir,
            interactive,
        } => cmd_sweep(
            &project_path,
            !no_cache,
            csv.as_deref(),
            wake_dir.as_deref(),
            interactive,
        ),
        Commands::Runs { project_path } => cmd_runs(&project_path),
        Commands::ShowRun {
            project_path,
            run_id,
            csv,
            wake_dir,
        } => cmd_show_run(&project_path, &run_id, csv.as_deref(), wake_dir.as_deref()),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    let summary = project_service::summarize(&project)?;
    println!("✓ Project is valid");
    println!("  Name:     {} (version {})", summary.name, summary.version);
    println!(
        "  Hull:     L = {:.3} m, B = {:.3} m, deadrise = {:.1} deg",
        summary.length_m, summary.beam_m, summary.deadrise_deg
    );
    println!(
        "  Speeds:   {} ({} points)",
        summary.schedule, summary.speed_count
    );
    Ok(())
}

fn cmd_solve(project_path: &Path, speed: f64) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let (result, _wake) = run_service::solve_point(&project, speed)?;
    print_result(&result);
    Ok(())
}

fn cmd_sweep(
    project_path: &Path,
    use_cache: bool,
    csv: Option<&Path>,
    wake_dir: Option<&Path>,
    interactive: bool,
) -> AppResult<()> {
    println!("Running speed sweep: {}", project_path.display());
    if interactive {
        println!("  Enter p to pause, r to resume, s to stop");
    }

    let request = RunRequest {
        project_path,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_stage = RunStage::LoadingProject;
    let mut on_progress = |event: RunProgressEvent| {
        let emit_now = event.stage != last_stage
            || event.sweep.is_some()
            || last_emit.elapsed().as_millis() >= 100;
        if emit_now {
            render_cli_progress(&event);
            last_stage = event.stage;
            last_emit = Instant::now();
        }
    };
    let mut on_start = |handle: SweepHandle| {
        if interactive {
            spawn_stdin_control(handle);
        }
    };
    let response =
        run_service::ensure_run_controlled(&request, Some(&mut on_start), Some(&mut on_progress))?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!(
            "✓ Sweep {}: {}",
            response.manifest.status, response.run_id
        );
    }
    print_timing_summary(&response.timing);
    print_table(&response.results);
    for failure in &response.failures {
        println!(
            "  ✗ V = {:.3} m/s [{}]: {}",
            failure.velocity, failure.kind, failure.message
        );
    }

    export_outputs(project_path, &response.results, csv, wake_dir)
}

/// Forward p/r/s lines from stdin to the running sweep.
fn spawn_stdin_control(handle: SweepHandle) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let outcome = match line.trim() {
                "p" => handle.pause(),
                "r" => handle.resume(),
                "s" => handle.stop(),
                "" => continue,
                other => {
                    eprintln!("\nUnknown command '{other}' (use p, r or s)");
                    continue;
                }
            };
            if let Err(e) = outcome {
                eprintln!("\n{e}");
            }
            if handle.status().is_terminal() {
                break;
            }
        }
    });
}

fn cmd_runs(project_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(project_path)?;

    if runs.is_empty() {
        println!("No cached runs found");
    } else {
        println!("Cached runs:");
        for run in runs {
            println!(
                "  {} - {} [{}] {}/{} solved",
                run.run_id, run.timestamp, run.status, run.summary.solved, run.summary.total
            );
        }
    }
    Ok(())
}

fn cmd_show_run(
    project_path: &Path,
    run_id: &str,
    csv: Option<&Path>,
    wake_dir: Option<&Path>,
) -> AppResult<()> {
    let run = run_service::load_run(project_path, run_id)?;
    let manifest = &run.manifest;

    println!("Run: {}", manifest.run_id);
    println!("  Project:        {}", manifest.project_name);
    println!("  Timestamp:      {}", manifest.timestamp);
    println!("  Solver version: {}", manifest.solver_version);
    println!("  Status:         {}", manifest.status);
    println!(
        "  Points:         {} solved, {} failed, {} low confidence, of {}",
        manifest.summary.solved,
        manifest.summary.failed,
        manifest.summary.low_confidence,
        manifest.summary.total
    );
    print_table(&run.results);

    export_outputs(project_path, &run.results, csv, wake_dir)
}

fn export_outputs(
    project_path: &Path,
    results: &[ph_sweep::SolvedPoint],
    csv: Option<&Path>,
    wake_dir: Option<&Path>,
) -> AppResult<()> {
    if csv.is_none() && wake_dir.is_none() {
        return Ok(());
    }
    let project = project_service::load_project(project_path)?;
    let params = ph_app::build_hull_parameters(&project)?;

    if let Some(path) = csv {
        export::export_csv(path, &params, results)?;
        println!("✓ Wrote {}", path.display());
    }
    if let Some(dir) = wake_dir {
        let written = export::export_wake_profiles(dir, &params, results)?;
        println!("✓ Wrote {} wake profiles under {}", written.len(), dir.display());
    }
    Ok(())
}

fn print_result(r: &EquilibriumResult) {
    println!("Equilibrium at V = {:.4} m/s", r.velocity_mps);
    println!("  Trim:          {:.4} deg", r.trim_deg);
    println!("  Sinkage:       {:.4} m", r.sinkage_m);
    println!("  Lambda:        {:.4}", r.lambda);
    println!(
        "  Wetted length: keel {:.4} m, chine {:.4} m",
        r.keel_wetted_length_m, r.chine_wetted_length_m
    );
    println!("  Resistance:    {:.2} N total", r.resistance_total_n);
    println!(
        "    hydro {:.2} N, spray {:.2} N, air {:.2} N",
        r.resistance_hydro_n, r.resistance_spray_n, r.resistance_air_n
    );
    println!(
        "  Spray:         X {:.4} m, Y {:.4} m, Z {:.4} m",
        r.spray_x_m, r.spray_y_m, r.spray_z_m
    );
    println!(
        "  Froude:        Fn {:.4}, Cv {:.4}",
        r.froude_length, r.froude_beam
    );
    match r.convergence {
        Convergence::Converged { iterations } => {
            println!("  Converged in {iterations} iterations");
        }
        Convergence::LowConfidence { residual_moment } => {
            println!("  Low confidence: residual moment {residual_moment:.3e} N·m");
        }
    }
    if r.fallbacks.any() {
        println!(
            "  Fallbacks: lift coefficient {}, wetted length {}",
            r.fallbacks.lift_coefficient, r.fallbacks.wetted_length
        );
    }
}

fn print_table(results: &[ph_sweep::SolvedPoint]) {
    if results.is_empty() {
        return;
    }
    println!(
        "\n  {:>8} {:>8} {:>10} {:>9} {:>8}",
        "V (m/s)", "Trim", "Rt (N)", "Sink (m)", "Lambda"
    );
    for point in results {
        let r = &point.result;
        let flag = if r.is_converged() { "" } else { "  *" };
        println!(
            "  {:>8.3} {:>8.3} {:>10.1} {:>9.4} {:>8.3}{}",
            r.velocity_mps, r.trim_deg, r.resistance_total_n, r.sinkage_m, r.lambda, flag
        );
    }
    if results.iter().any(|p| !p.result.is_converged()) {
        println!("  * low confidence (trim grid fallback)");
    }
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (&event.stage, &event.sweep) {
        (RunStage::Sweeping | RunStage::Paused, Some(s)) => {
            let width = 28usize;
            let filled = ((s.fraction_complete * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            let mut line = format!(
                "\r[{}] {:>3}/{:<3} phase={}",
                bar,
                s.completed,
                s.total,
                event.stage.label()
            );
            if let Some(v) = s.velocity_mps {
                line.push_str(&format!("  V={v:.3}"));
            }
            if let Some(trim) = s.trim_deg {
                line.push_str(&format!("  trim={trim:.3}"));
            }
            if s.failed > 0 {
                line.push_str(&format!("  failed={}", s.failed));
            }
            line.push_str(&format!("  elapsed={:.1}s", event.elapsed_wall_s));
            print!("{line}");
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {msg}"));
            }
            print!("{line}");
        }
    }
    let _ = io::stdout().flush();
}

fn print_timing_summary(timing: &ph_app::RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    println!("\nTiming summary:");
    println!(
        "  Compile: {:.3}s ({:.1}%)",
        timing.compile_time_s,
        100.0 * timing.compile_time_s / total
    );
    println!(
        "  Sweep:   {:.3}s ({:.1}%)",
        timing.sweep_time_s,
        100.0 * timing.sweep_time_s / total
    );
    println!(
        "  Save:    {:.3}s ({:.1}%)",
        timing.save_time_s,
        100.0 * timing.save_time_s / total
    );
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    }
    println!("  Total:   {:.3}s", timing.total_time_s);
}
