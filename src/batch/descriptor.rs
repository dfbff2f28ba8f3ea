// src/batch/descriptor.rs

use crate::mirror::MirrorJob;

/// Immutable unit-of-work specification submitted to the orchestrator.
///
/// Names must be unique within a batch; the reporter keys outcomes by name
/// and in submission order.
#[derive(Debug, Clone)]
pub struct TaskDescriptor {
    pub name: String,
    pub operation: TaskOperation,
}

/// The operation a task performs.
#[derive(Debug, Clone)]
pub enum TaskOperation {
    /// Run one external command, capturing its output.
    Command { argv: Vec<String> },

    /// Fetch, parse, and rank a mirror list.
    RankMirrors { job: MirrorJob },
}

impl TaskDescriptor {
    /// Describe an external-command task.
    pub fn command(name: impl Into<String>, argv: Vec<String>) -> Self {
        Self {
            name: name.into(),
            operation: TaskOperation::Command { argv },
        }
    }

    /// Describe a mirror ranking task.
    pub fn rank_mirrors(name: impl Into<String>, job: MirrorJob) -> Self {
        Self {
            name: name.into(),
            operation: TaskOperation::RankMirrors { job },
        }
    }
}
