//! Sweep lifecycle tests. A gated solver blocks inside each solve until the
//! test releases it, so pause and stop land at known velocities.

use ph_hull::{EquilibriumResult, EquilibriumSolver, HullParameters, HullResult};
use ph_sweep::{
    FailurePolicy, PointSolver, SweepCommand, SweepController, SweepError, SweepEvent,
    SweepOptions, SweepRequest, SweepStatus,
};
use proptest::prelude::*;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const SPEEDS: [f64; 6] = [5.2267, 7.8844, 10.5421, 13.1112, 15.7688, 9.0];
const TIMEOUT: Duration = Duration::from_secs(10);

fn reference_solver() -> EquilibriumSolver {
    EquilibriumSolver::new(HullParameters::reference_planing_hull())
}

struct GatedSolver {
    inner: EquilibriumSolver,
    entered: Mutex<Sender<f64>>,
    permits: Mutex<Receiver<()>>,
}

impl PointSolver for GatedSolver {
    fn solve_point(&self, velocity: f64) -> HullResult<EquilibriumResult> {
        self.entered.lock().unwrap().send(velocity).unwrap();
        self.permits.lock().unwrap().recv().unwrap();
        self.inner.solve(velocity)
    }
}

/// Returns the solver, the "solve entered" stream and the permit sender.
fn gated() -> (GatedSolver, Receiver<f64>, Sender<()>) {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (permit_tx, permit_rx) = mpsc::channel();
    let solver = GatedSolver {
        inner: reference_solver(),
        entered: Mutex::new(entered_tx),
        permits: Mutex::new(permit_rx),
    };
    (solver, entered_rx, permit_tx)
}

struct PanickingSolver;

impl PointSolver for PanickingSolver {
    fn solve_point(&self, _velocity: f64) -> HullResult<EquilibriumResult> {
        panic!("boom")
    }
}

fn request() -> SweepRequest {
    SweepRequest::new(SPEEDS.to_vec()).unwrap()
}

fn wait_for(events: &Receiver<SweepEvent>, pred: impl Fn(&SweepEvent) -> bool) -> Vec<SweepEvent> {
    let mut seen = Vec::new();
    loop {
        let event = events.recv_timeout(TIMEOUT).expect("sweep event");
        let done = pred(&event);
        seen.push(event);
        if done {
            return seen;
        }
    }
}

fn release(entered: &Receiver<f64>, permits: &Sender<()>, expected: f64) {
    assert_eq!(entered.recv_timeout(TIMEOUT).unwrap(), expected);
    permits.send(()).unwrap();
}

fn uncontended() -> Vec<EquilibriumResult> {
    let mut controller = SweepController::new(reference_solver());
    controller.start(request()).unwrap();
    let report = controller.join().unwrap();
    assert_eq!(report.status, SweepStatus::Completed);
    report.equilibria().cloned().collect()
}

#[test]
fn pause_then_resume_matches_uncontended_run() {
    let baseline = uncontended();
    let (solver, entered, permits) = gated();
    let mut controller = SweepController::new(solver);
    controller.start(request()).unwrap();

    let k = 2;
    for (i, &v) in SPEEDS.iter().enumerate().take(k) {
        assert_eq!(entered.recv_timeout(TIMEOUT).unwrap(), v);
        if i == k - 1 {
            controller.pause().unwrap();
        }
        permits.send(()).unwrap();
    }

    let mut events = wait_for(controller.events(), |e| {
        matches!(e, SweepEvent::Paused { .. })
    });
    assert!(matches!(events.last(), Some(SweepEvent::Paused { next_index: 2 })));
    assert_eq!(controller.status(), SweepStatus::Paused);
    assert_eq!(controller.state().len(), k);
    assert_eq!(controller.state().cursor(), k);
    // blocked between velocities
    assert!(entered.recv_timeout(Duration::from_millis(100)).is_err());

    controller.resume().unwrap();
    for &v in &SPEEDS[k..] {
        release(&entered, &permits, v);
    }

    let report = controller.join().unwrap();
    assert_eq!(report.status, SweepStatus::Completed);
    let resumed: Vec<EquilibriumResult> = report.equilibria().cloned().collect();
    assert_eq!(resumed, baseline);
    let indices: Vec<usize> = report.results.iter().map(|p| p.index).collect();
    assert_eq!(indices, (0..SPEEDS.len()).collect::<Vec<_>>());

    events.extend(controller.events().try_iter());
    assert!(matches!(events[0], SweepEvent::Started { total: 6 }));
    let resumed_at = events
        .iter()
        .position(|e| matches!(e, SweepEvent::Resumed { next_index: 2 }))
        .unwrap();
    let solved_after = events[resumed_at..]
        .iter()
        .filter(|e| matches!(e, SweepEvent::PointSolved { .. }))
        .count();
    assert_eq!(solved_after, SPEEDS.len() - k);
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    assert!(matches!(events.last(), Some(SweepEvent::Finished(s)) if s.solved == 6));
}

#[test]
fn stop_while_paused_keeps_exact_prefix() {
    let (solver, entered, permits) = gated();
    let mut controller = SweepController::new(solver);
    controller.start(request()).unwrap();

    let k = 3;
    for (i, &v) in SPEEDS.iter().enumerate().take(k) {
        assert_eq!(entered.recv_timeout(TIMEOUT).unwrap(), v);
        if i == k - 1 {
            controller.pause().unwrap();
        }
        permits.send(()).unwrap();
    }
    wait_for(controller.events(), |e| matches!(e, SweepEvent::Paused { .. }));

    // stop from another thread, well after the pause took effect
    let handle = controller.handle();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(150));
        handle.stop().unwrap();
    })
    .join()
    .unwrap();

    let report = controller.join().unwrap();
    assert_eq!(report.status, SweepStatus::Stopped);
    assert_eq!(report.results.len(), k);
    assert_eq!(report.summary.next_index, k);
    let velocities: Vec<f64> = report.equilibria().map(|r| r.velocity_mps).collect();
    assert_eq!(velocities, SPEEDS[..k].to_vec());
    assert!(entered.try_recv().is_err());

    let rest: Vec<SweepEvent> = controller.events().try_iter().collect();
    assert_eq!(rest.iter().filter(|e| e.is_terminal()).count(), 1);
    assert!(matches!(rest.last(), Some(SweepEvent::Stopped(s)) if s.solved == k));
}

#[test]
fn stop_while_running_finishes_in_flight_solve_only() {
    let (solver, entered, permits) = gated();
    let mut controller = SweepController::new(solver);
    controller.start(request()).unwrap();

    release(&entered, &permits, SPEEDS[0]);
    assert_eq!(entered.recv_timeout(TIMEOUT).unwrap(), SPEEDS[1]);
    controller.stop().unwrap();
    assert_eq!(controller.status(), SweepStatus::Stopped);
    permits.send(()).unwrap();

    let report = controller.join().unwrap();
    assert_eq!(report.status, SweepStatus::Stopped);
    assert_eq!(report.results.len(), 2);
    assert!(entered.try_recv().is_err());
}

#[test]
fn pause_then_stop_during_solve_never_reports_paused() {
    let (solver, entered, permits) = gated();
    let mut controller = SweepController::new(solver);
    controller.start(request()).unwrap();

    release(&entered, &permits, SPEEDS[0]);
    assert_eq!(entered.recv_timeout(TIMEOUT).unwrap(), SPEEDS[1]);
    controller.pause().unwrap();
    controller.stop().unwrap();
    assert_eq!(controller.status(), SweepStatus::Stopped);
    permits.send(()).unwrap();

    let report = controller.join().unwrap();
    assert_eq!(report.status, SweepStatus::Stopped);
    assert_eq!(report.results.len(), 2);
    assert!(entered.try_recv().is_err());

    let events: Vec<SweepEvent> = controller.events().try_iter().collect();
    assert!(!events.iter().any(|e| matches!(e, SweepEvent::Paused { .. })));
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    assert!(matches!(events.last(), Some(SweepEvent::Stopped(s)) if s.solved == 2));
}

#[test]
fn failed_points_do_not_shift_order() {
    let request = SweepRequest::new(vec![5.2267, 0.05, 7.8844, 0.0]).unwrap();
    let mut controller = SweepController::new(reference_solver());
    controller.start(request).unwrap();
    let report = controller.join().unwrap();

    assert_eq!(report.status, SweepStatus::Completed);
    let solved: Vec<usize> = report.results.iter().map(|p| p.index).collect();
    assert_eq!(solved, vec![0, 2]);
    let failed: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
    assert_eq!(failed, vec![1, 3]);
    assert!(report.failures.iter().all(|f| f.kind == "degenerate_input"));

    let events: Vec<SweepEvent> = controller.events().try_iter().collect();
    let order: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            SweepEvent::PointSolved { index, .. } | SweepEvent::PointFailed { index, .. } => {
                Some(*index)
            }
            _ => None,
        })
        .collect();
    assert_eq!(order, vec![0, 1, 2, 3]);
    assert!(matches!(events.last(), Some(SweepEvent::Finished(s)) if s.failed == 2));
}

#[test]
fn abort_policy_fails_the_sweep() {
    let options = SweepOptions {
        failure_policy: FailurePolicy::Abort,
    };
    let request = SweepRequest::new(vec![5.2267, 0.05, 7.8844]).unwrap();
    let mut controller = SweepController::with_options(reference_solver(), options);
    controller.start(request).unwrap();
    let report = controller.join().unwrap();

    assert_eq!(report.status, SweepStatus::Failed);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.summary.next_index, 2);
    assert!(report.failure_message.is_some());
    let events: Vec<SweepEvent> = controller.events().try_iter().collect();
    assert!(matches!(events.last(), Some(SweepEvent::Failed { .. })));
}

#[test]
fn solver_panic_fails_the_sweep() {
    let mut controller = SweepController::new(PanickingSolver);
    controller.start(request()).unwrap();
    let report = controller.join().unwrap();
    assert_eq!(report.status, SweepStatus::Failed);
    assert!(report.failure_message.unwrap().contains("boom"));
    assert!(report.results.is_empty());
}

#[test]
fn rejects_illegal_commands() {
    let (solver, entered, permits) = gated();
    let mut controller = SweepController::new(solver);
    assert_eq!(
        controller.pause(),
        Err(SweepError::InvalidTransition {
            from: SweepStatus::Idle,
            command: SweepCommand::Pause,
        })
    );

    controller.start(request()).unwrap();
    assert!(matches!(
        controller.start(request()),
        Err(SweepError::InvalidTransition {
            command: SweepCommand::Start,
            ..
        })
    ));
    assert_eq!(
        controller.resume(),
        Err(SweepError::InvalidTransition {
            from: SweepStatus::Running,
            command: SweepCommand::Resume,
        })
    );

    for &v in &SPEEDS {
        release(&entered, &permits, v);
    }
    controller.join().unwrap();
    assert_eq!(controller.status(), SweepStatus::Completed);
    assert!(controller.pause().is_err());
    assert!(controller.stop().is_err());
}

#[test]
fn empty_request_finishes_immediately() {
    let mut controller = SweepController::new(reference_solver());
    controller.start(SweepRequest::new(Vec::new()).unwrap()).unwrap();
    let report = controller.join().unwrap();
    assert_eq!(report.status, SweepStatus::Completed);
    assert_eq!(report.summary.total, 0);
}

fn speed() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(0.05), 4.0f64..16.0]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn results_follow_request_order(speeds in prop::collection::vec(speed(), 0..6)) {
        let mut controller = SweepController::new(reference_solver());
        controller.start(SweepRequest::new(speeds.clone()).unwrap()).unwrap();
        let report = controller.join().unwrap();

        let expected: Vec<usize> = speeds
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0.1)
            .map(|(i, _)| i)
            .collect();
        let solved: Vec<usize> = report.results.iter().map(|p| p.index).collect();
        prop_assert_eq!(solved, expected);
        for point in &report.results {
            prop_assert_eq!(point.result.velocity_mps, speeds[point.index]);
        }
        prop_assert_eq!(report.results.len() + report.failures.len(), speeds.len());
    }
}
