// src/batch/outcome.rs

/// Final status of a task within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// The operation ran to completion with a zero exit.
    Success,
    /// The operation ran and failed; payload is the exit code (task-level
    /// faults without a process exit code use 1).
    Failed(i32),
    /// The task never ran, or its process was terminated by an interrupt.
    Cancelled,
}

/// Immutable result of executing (or cancelling) one task.
///
/// The narrative log is the ordered, human-readable trail a task accumulates
/// about its own progress. It is rendered only after the whole batch
/// completes, which keeps concurrent tasks' lines from interleaving on the
/// operator's terminal without any locking.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub name: String,
    pub status: TaskStatus,
    pub stdout: String,
    pub stderr: String,
    pub narrative: Vec<String>,
}

impl TaskOutcome {
    /// Synthetic outcome for a task that never produced output.
    pub fn cancelled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TaskStatus::Cancelled,
            stdout: String::new(),
            stderr: String::new(),
            narrative: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TaskStatus::Success
    }
}
