//! Pause/resume/stop control over a sequential velocity sweep.
//!
//! The controller owns one worker thread. Control actions are validated
//! against [`SweepStatus`] on the caller's side and then delivered to the
//! worker over a command channel; the worker only looks at commands between
//! velocities, so a solve in progress is never interrupted. While paused the
//! worker blocks on the channel, and `resume`/`stop` wake it by sending.

use crate::error::{SweepError, SweepResult};
use crate::event::{SweepEvent, SweepReport, SweepSummary};
use crate::request::SweepRequest;
use crate::solver::PointSolver;
use crate::state::{PointFailure, SolvedPoint, SweepCommand, SweepState, SweepStatus};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

/// What to do when a velocity fails to solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Record the failure and move on to the next velocity
    #[default]
    Continue,
    /// End the sweep as `Failed` at the first failure
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepOptions {
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn lock(status: &Mutex<SweepStatus>) -> MutexGuard<'_, SweepStatus> {
    status.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable control surface for a sweep, usable from any thread.
#[derive(Debug, Clone)]
pub struct SweepHandle {
    status: Arc<Mutex<SweepStatus>>,
    commands: Sender<SweepCommand>,
}

impl SweepHandle {
    pub fn status(&self) -> SweepStatus {
        *lock(&self.status)
    }

    /// Valid only while running. The worker stops before its next velocity.
    pub fn pause(&self) -> SweepResult<()> {
        self.send(SweepCommand::Pause)
    }

    /// Valid only while paused. Solving continues at the next unsolved velocity.
    pub fn resume(&self) -> SweepResult<()> {
        self.send(SweepCommand::Resume)
    }

    /// Valid while running or paused; wakes a paused worker.
    pub fn stop(&self) -> SweepResult<()> {
        self.send(SweepCommand::Stop)
    }

    fn send(&self, command: SweepCommand) -> SweepResult<()> {
        let mut status = lock(&self.status);
        let next = status.apply(command)?;
        // A non-terminal status means the worker still holds the receiver.
        let _ = self.commands.send(command);
        *status = next;
        Ok(())
    }
}

/// Runs an [`EquilibriumSolver`](ph_hull::EquilibriumSolver) (or any
/// [`PointSolver`]) over a [`SweepRequest`] on a dedicated worker thread.
pub struct SweepController {
    solver: Arc<dyn PointSolver>,
    options: SweepOptions,
    handle: SweepHandle,
    state: SweepState,
    total: usize,
    command_rx: Option<Receiver<SweepCommand>>,
    event_tx: Option<Sender<SweepEvent>>,
    events: Receiver<SweepEvent>,
    worker: Option<JoinHandle<Option<String>>>,
}

impl SweepController {
    pub fn new<S: PointSolver + 'static>(solver: S) -> Self {
        Self::with_options(solver, SweepOptions::default())
    }

    pub fn with_options<S: PointSolver + 'static>(solver: S, options: SweepOptions) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, events) = mpsc::channel();
        Self {
            solver: Arc::new(solver),
            options,
            handle: SweepHandle {
                status: Arc::new(Mutex::new(SweepStatus::Idle)),
                commands: command_tx,
            },
            state: SweepState::new(),
            total: 0,
            command_rx: Some(command_rx),
            event_tx: Some(event_tx),
            events,
            worker: None,
        }
    }

    pub fn options(&self) -> SweepOptions {
        self.options
    }

    pub fn status(&self) -> SweepStatus {
        self.handle.status()
    }

    pub fn handle(&self) -> SweepHandle {
        self.handle.clone()
    }

    /// Shared view of the results published so far.
    pub fn state(&self) -> &SweepState {
        &self.state
    }

    /// Event stream; ends after the terminal event once the worker exits.
    pub fn events(&self) -> &Receiver<SweepEvent> {
        &self.events
    }

    /// Begin solving `request` in order. Valid only once, from `Idle`.
    pub fn start(&mut self, request: SweepRequest) -> SweepResult<()> {
        let mut status = lock(&self.handle.status);
        let next = status.apply(SweepCommand::Start)?;
        let (Some(commands), Some(events)) = (self.command_rx.take(), self.event_tx.take()) else {
            return Err(SweepError::InvalidTransition {
                from: *status,
                command: SweepCommand::Start,
            });
        };

        self.total = request.len();
        let worker = Worker {
            solver: Arc::clone(&self.solver),
            options: self.options,
            state: self.state.clone(),
            status: Arc::clone(&self.handle.status),
            commands,
            events,
            velocities: request.velocities().to_vec(),
        };
        *status = next;
        drop(status);

        self.worker = Some(thread::spawn(move || worker.run()));
        Ok(())
    }

    pub fn pause(&self) -> SweepResult<()> {
        self.handle.pause()
    }

    pub fn resume(&self) -> SweepResult<()> {
        self.handle.resume()
    }

    pub fn stop(&self) -> SweepResult<()> {
        self.handle.stop()
    }

    /// Wait for the worker to exit and collect the outcome.
    ///
    /// A controller that was never started reports `Idle` with no results.
    pub fn join(&mut self) -> SweepResult<SweepReport> {
        let failure_message = match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| SweepError::WorkerPanicked)?,
            None => None,
        };
        Ok(SweepReport {
            status: self.status(),
            summary: summarize(&self.state, self.total),
            results: self.state.results(),
            failures: self.state.failures(),
            failure_message,
        })
    }
}

fn summarize(state: &SweepState, total: usize) -> SweepSummary {
    SweepSummary {
        total,
        solved: state.len(),
        failed: state.failure_count(),
        low_confidence: state.low_confidence_count(),
        next_index: state.cursor(),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("solver panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("solver panicked: {s}")
    } else {
        "solver panicked".to_string()
    }
}

struct Worker {
    solver: Arc<dyn PointSolver>,
    options: SweepOptions,
    state: SweepState,
    status: Arc<Mutex<SweepStatus>>,
    commands: Receiver<SweepCommand>,
    events: Sender<SweepEvent>,
    velocities: Vec<f64>,
}

impl Worker {
    fn emit(&self, event: SweepEvent) {
        // Nobody listening is fine; results still land in the state.
        let _ = self.events.send(event);
    }

    fn run(self) -> Option<String> {
        let total = self.velocities.len();
        tracing::info!(total, "sweep started");
        self.emit(SweepEvent::Started { total });

        let mut halted = false;
        let mut failure = None;
        for (index, &velocity) in self.velocities.iter().enumerate() {
            if !self.checkpoint(index) {
                halted = true;
                break;
            }

            let solver = &self.solver;
            match panic::catch_unwind(AssertUnwindSafe(|| solver.solve_point(velocity))) {
                Ok(Ok(result)) => {
                    self.state.push_result(SolvedPoint {
                        index,
                        result: result.clone(),
                    });
                    self.emit(SweepEvent::PointSolved {
                        index,
                        velocity,
                        result,
                    });
                }
                Ok(Err(error)) => {
                    tracing::warn!(index, velocity, error = %error, "sweep point failed");
                    self.state
                        .push_failure(PointFailure::new(index, velocity, &error));
                    let abort = self.options.failure_policy == FailurePolicy::Abort;
                    if abort {
                        failure = Some(format!("velocity {velocity} m/s failed: {error}"));
                    }
                    self.emit(SweepEvent::PointFailed {
                        index,
                        velocity,
                        error,
                    });
                    if abort {
                        break;
                    }
                }
                Err(payload) => {
                    let message = panic_message(payload);
                    tracing::warn!(index, velocity, %message, "sweep point panicked");
                    failure = Some(message);
                    break;
                }
            }
        }

        self.finish(halted, failure)
    }

    /// Drain pending commands before solving `next_index`. Returns `false`
    /// when the sweep must stop.
    fn checkpoint(&self, next_index: usize) -> bool {
        loop {
            match self.commands.try_recv() {
                Ok(SweepCommand::Stop) => return false,
                Ok(SweepCommand::Pause) => {
                    if !self.wait_while_paused(next_index) {
                        return false;
                    }
                }
                Ok(SweepCommand::Resume | SweepCommand::Start) => {}
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return true,
            }
        }
    }

    fn wait_while_paused(&self, next_index: usize) -> bool {
        // Handles send and update the status under one lock, so a Stopped
        // status here means a Stop is already queued behind this Pause.
        if *lock(&self.status) == SweepStatus::Stopped {
            return false;
        }
        tracing::info!(next_index, "sweep paused");
        self.emit(SweepEvent::Paused { next_index });
        loop {
            match self.commands.recv() {
                Ok(SweepCommand::Resume) => {
                    tracing::info!(next_index, "sweep resumed");
                    self.emit(SweepEvent::Resumed { next_index });
                    return true;
                }
                // Every handle dropped while paused: nobody can resume.
                Ok(SweepCommand::Stop) | Err(_) => return false,
                Ok(SweepCommand::Pause | SweepCommand::Start) => {}
            }
        }
    }

    fn finish(self, halted: bool, failure: Option<String>) -> Option<String> {
        let summary = summarize(&self.state, self.velocities.len());
        let final_status = {
            let mut status = lock(&self.status);
            let final_status = if halted || *status == SweepStatus::Stopped {
                SweepStatus::Stopped
            } else if failure.is_some() {
                SweepStatus::Failed
            } else {
                SweepStatus::Completed
            };
            *status = final_status;
            final_status
        };

        tracing::info!(
            status = %final_status,
            solved = summary.solved,
            failed = summary.failed,
            "sweep ended"
        );
        let event = match (final_status, &failure) {
            (SweepStatus::Failed, Some(message)) => SweepEvent::Failed {
                message: message.clone(),
                summary,
            },
            (SweepStatus::Stopped, _) => SweepEvent::Stopped(summary),
            _ => SweepEvent::Finished(summary),
        };
        self.emit(event);
        if final_status == SweepStatus::Failed {
            failure
        } else {
            None
        }
    }
}
