// src/proc/runner.rs

use std::io;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::TaskError;

/// Classified result of one external command invocation.
///
/// A non-zero exit is data, not an error; the caller decides whether it is
/// fatal. `code` is `None` when the child was terminated by a signal.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// True when the child exited normally with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code with signal termination folded to -1.
    pub fn code_or_signal(&self) -> i32 {
        self.code.unwrap_or(-1)
    }
}

/// Run one external command to completion.
///
/// - `capture = true`: stdout and stderr are piped and returned fully
///   buffered as text.
/// - `capture = false`: both streams are inherited from the caller (visible
///   to the operator in real time) and returned empty.
///
/// The call blocks the invoking worker until the child exits. If `cancel`
/// fires first, the child is killed and `TaskError::Cancelled` is returned.
///
/// Failure mapping:
/// - empty `argv` or executable missing from the search path → `NotFound`
/// - any other spawn/wait fault → `ToolFailure` with the OS error text
pub async fn run(
    argv: &[String],
    capture: bool,
    cancel: &CancellationToken,
) -> Result<CommandOutput, TaskError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(TaskError::NotFound {
            tool: "(empty command)".to_string(),
        });
    };

    debug!(cmd = %argv.join(" "), capture, "running external command");

    let mut cmd = Command::new(program);
    cmd.args(args);

    if capture {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    }
    cmd.kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|err| spawn_error(program, err))?;

    // Drain both pipes concurrently so neither fills its OS buffer while we
    // wait on the other.
    let stdout_task = tokio::spawn(slurp(child.stdout.take()));
    let stderr_task = tokio::spawn(slurp(child.stderr.take()));

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(|err| TaskError::ToolFailure {
                tool: program.clone(),
                exit_code: -1,
                message: format!("waiting for process: {err}"),
            })?;

            let stdout = stdout_task.await.unwrap_or_default();
            let stderr = stderr_task.await.unwrap_or_default();

            info!(
                cmd = %program,
                exit_code = status.code().unwrap_or(-1),
                success = status.success(),
                "external command exited"
            );

            Ok(CommandOutput {
                code: status.code(),
                stdout,
                stderr,
            })
        }

        _ = cancel.cancelled() => {
            info!(cmd = %program, "interrupt received; killing child process");
            if let Err(err) = child.start_kill() {
                warn!(cmd = %program, error = %err, "failed to kill child process");
            }
            // Reap the child so it does not linger as a zombie.
            let _ = child.wait().await;
            Err(TaskError::Cancelled)
        }
    }
}

fn spawn_error(program: &str, err: io::Error) -> TaskError {
    if err.kind() == io::ErrorKind::NotFound {
        TaskError::NotFound {
            tool: program.to_string(),
        }
    } else {
        TaskError::ToolFailure {
            tool: program.to_string(),
            exit_code: -1,
            message: format!("spawning process: {err}"),
        }
    }
}

/// Read a child pipe to the end; missing pipes (inherit mode) yield "".
async fn slurp<R: AsyncRead + Unpin>(pipe: Option<R>) -> String {
    let mut buf = String::new();
    if let Some(mut reader) = pipe {
        let _ = reader.read_to_string(&mut buf).await;
    }
    buf
}
