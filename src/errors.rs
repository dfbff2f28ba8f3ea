// src/errors.rs

//! Crate-wide error types.
//!
//! `anyhow` carries propagation through the step glue; failures that need
//! matching (missing tools, network faults, cancellation) get a typed
//! taxonomy here.

use std::path::PathBuf;

use thiserror::Error;

pub use anyhow::{Error, Result};

/// Failure modes of a single task or process invocation.
///
/// A `TaskError` never crosses the task boundary as a panic or an aborted
/// batch; it is folded into the task's own outcome and reported there.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A required external tool could not be found on the search path.
    #[error("{tool} is not installed")]
    NotFound { tool: String },

    /// The mirror-list fetch failed (DNS, connect, timeout, HTTP status).
    #[error("network request failed: {message}")]
    Network { message: String },

    /// An external utility ran but exited non-zero.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    ToolFailure {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// Reading or writing a list artifact failed.
    #[error("{}: {}", path.display(), source)]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The task was stopped before or during execution by an interrupt.
    #[error("task cancelled")]
    Cancelled,
}

/// Batch-level marker raised when the operator interrupts the run.
///
/// Propagates through `anyhow` up to `main`, which maps it to exit code 130.
#[derive(Debug, Error)]
#[error("interrupted by operator")]
pub struct Interrupted;
