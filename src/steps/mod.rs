// src/steps/mod.rs

//! Interactive maintenance steps.
//!
//! Each step is a linear "ask, then shell out" sequence built on the process
//! runner. Steps are isolated: a tool failing inside one step is reported
//! and the run moves on; only an operator interrupt unwinds everything.

pub mod aur;
pub mod disk;
pub mod finish;
pub mod firmware;
pub mod flatpak;
pub mod journal;
pub mod mirrorlist;
pub mod packages;
pub mod shell;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::ConfigFile;
use crate::errors::{Interrupted, TaskError};
use crate::proc::{self, CommandOutput};

/// Shared state handed to every step.
pub struct StepContext {
    pub config: ConfigFile,
    pub interrupt: CancellationToken,
}

/// Step names accepted by `--only`, in execution order, with the tool that
/// gates each one.
pub const STEPS: &[(&str, &str)] = &[
    ("mirrors", "pacman"),
    ("firmware", "fwupdmgr"),
    ("packages", "pacman"),
    ("aur", "yay"),
    ("flatpak", "flatpak"),
    ("shell", "zinit"),
    ("journal", "journalctl"),
];

/// Run an external command on behalf of a step.
///
/// - An operator interrupt becomes the batch-level `Interrupted` error so
///   the whole run unwinds to exit code 130.
/// - Any other runner fault (tool vanished mid-run, spawn error) is folded
///   into a failed `CommandOutput` so the step can report it and continue,
///   matching the "one tool failing never aborts the run" policy.
pub(crate) async fn run_step_command(
    ctx: &StepContext,
    argv: &[&str],
    capture: bool,
) -> Result<CommandOutput> {
    let argv: Vec<String> = argv.iter().map(|s| s.to_string()).collect();

    match proc::run(&argv, capture, &ctx.interrupt).await {
        Ok(output) => Ok(output),
        Err(TaskError::Cancelled) => Err(Interrupted.into()),
        Err(err) => {
            warn!(cmd = %argv.join(" "), error = %err, "command execution failed");
            Ok(CommandOutput {
                code: Some(1),
                stdout: String::new(),
                stderr: err.to_string(),
            })
        }
    }
}
