// src/batch/orchestrator.rs

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::batch::descriptor::{TaskDescriptor, TaskOperation};
use crate::batch::outcome::{TaskOutcome, TaskStatus};
use crate::errors::TaskError;
use crate::proc;

/// Lifecycle of one batch run.
///
/// Transitions only move forward: `Running` until an interrupt lands,
/// `Interrupted` marks unstarted work as cancelled, `Draining` while
/// in-flight workers are killed and reaped, `Closed` once every outcome is
/// recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchState {
    Running,
    Interrupted,
    Draining,
    Closed,
}

/// Everything `run_batch` hands back to its caller.
#[derive(Debug)]
pub struct BatchReport {
    /// One outcome per submitted descriptor, in submission order.
    pub outcomes: Vec<TaskOutcome>,
    /// True when the batch was unwound by an operator interrupt; the caller
    /// is expected to propagate `Interrupted` upward.
    pub interrupted: bool,
}

/// Runs a batch of independent tasks on a bounded pool of workers.
///
/// Each worker is a Tokio task whose heavy lifting happens in its own OS
/// child process, so a stalled or crashed external utility cannot take down
/// the orchestrator or its sibling tasks. The pool (semaphore plus worker
/// handles) is created inside [`run_batch`](Self::run_batch) and fully torn
/// down before it returns; no pool state outlives its batch.
pub struct Orchestrator {
    max_workers: usize,
    interrupt: CancellationToken,
}

impl Orchestrator {
    /// Create an orchestrator bound to an interrupt token.
    ///
    /// Cancelling the token (typically from a Ctrl-C handler) prevents
    /// unstarted tasks from being dispatched and forcibly terminates
    /// in-flight external processes.
    pub fn new(max_workers: usize, interrupt: CancellationToken) -> Self {
        Self {
            max_workers: max_workers.max(1),
            interrupt,
        }
    }

    /// Run every descriptor to an outcome and return the outcomes in
    /// submission order, regardless of completion order.
    ///
    /// Invariant: exactly one outcome exists per submitted descriptor, on
    /// the interrupted path included: unresolved tasks yield `Cancelled`
    /// outcomes, never silence.
    pub async fn run_batch(&self, descriptors: Vec<TaskDescriptor>) -> BatchReport {
        let cancel = self.interrupt.child_token();
        let semaphore = Arc::new(Semaphore::new(self.max_workers));

        info!(
            tasks = descriptors.len(),
            max_workers = self.max_workers,
            "starting batch"
        );

        let mut handles = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let semaphore = semaphore.clone();
            let cancel = cancel.clone();
            let name = descriptor.name.clone();
            let handle = tokio::spawn(run_worker(descriptor, semaphore, cancel));
            handles.push((name, handle));
        }

        let mut state = BatchState::Running;
        let mut outcomes = Vec::with_capacity(handles.len());

        // Awaiting in submission order is what makes reporting deterministic:
        // workers resolve out of order, but we read them back in order here.
        for (name, handle) in handles {
            if state == BatchState::Running && cancel.is_cancelled() {
                state = BatchState::Interrupted;
                info!(?state, "interrupt received; cancelling unstarted tasks");
                state = BatchState::Draining;
                debug!(?state, "terminating in-flight workers");
            }

            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    // A worker panic must not lose the descriptor's outcome.
                    error!(task = %name, error = %err, "worker terminated unexpectedly");
                    outcomes.push(TaskOutcome {
                        name: name.clone(),
                        status: TaskStatus::Failed(-1),
                        stdout: String::new(),
                        stderr: err.to_string(),
                        narrative: vec![format!("[{name}] Worker terminated unexpectedly")],
                    });
                }
            }
        }

        state = BatchState::Closed;
        debug!(?state, outcomes = outcomes.len(), "batch closed");

        BatchReport {
            outcomes,
            interrupted: cancel.is_cancelled(),
        }
    }
}

/// One worker: wait for pool capacity, then execute the task's operation.
///
/// Tasks that have not begun executing when the interrupt lands resolve to a
/// synthetic `Cancelled` outcome without ever being dispatched.
async fn run_worker(
    descriptor: TaskDescriptor,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
) -> TaskOutcome {
    let permit = tokio::select! {
        _ = cancel.cancelled() => {
            debug!(task = %descriptor.name, "cancelled while queued");
            return TaskOutcome::cancelled(descriptor.name.clone());
        }
        permit = semaphore.acquire() => permit,
    };

    let Ok(_permit) = permit else {
        return TaskOutcome::cancelled(descriptor.name.clone());
    };

    // A permit may be granted in the same poll as the interrupt; re-check so
    // no task starts after the operator asked to stop.
    if cancel.is_cancelled() {
        return TaskOutcome::cancelled(descriptor.name.clone());
    }

    match descriptor.operation {
        TaskOperation::Command { argv } => {
            run_command_task(&descriptor.name, &argv, &cancel).await
        }
        TaskOperation::RankMirrors { job } => job.run(&descriptor.name, &cancel).await,
    }
}

/// Execute an external-command task, folding the process result into an
/// outcome with a narrative trail.
async fn run_command_task(
    name: &str,
    argv: &[String],
    cancel: &CancellationToken,
) -> TaskOutcome {
    let mut narrative = vec![format!("[{name}] Starting: {}", argv.join(" "))];

    match proc::run(argv, true, cancel).await {
        Ok(output) => {
            let status = match output.code {
                Some(0) => {
                    narrative.push(format!("[{name}] Completed successfully"));
                    TaskStatus::Success
                }
                Some(code) => {
                    narrative.push(format!("[{name}] Failed with exit code {code}"));
                    TaskStatus::Failed(code)
                }
                None => {
                    narrative.push(format!("[{name}] Terminated by signal"));
                    TaskStatus::Failed(-1)
                }
            };

            TaskOutcome {
                name: name.to_string(),
                status,
                stdout: output.stdout,
                stderr: output.stderr,
                narrative,
            }
        }

        Err(TaskError::Cancelled) => TaskOutcome::cancelled(name),

        Err(err) => {
            narrative.push(format!("[{name}] ERROR: {err}"));
            TaskOutcome {
                name: name.to_string(),
                status: TaskStatus::Failed(1),
                stdout: String::new(),
                stderr: err.to_string(),
                narrative,
            }
        }
    }
}
