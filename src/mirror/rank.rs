// src/mirror/rank.rs

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::batch::outcome::{TaskOutcome, TaskStatus};
use crate::config::model::MirrorSection;
use crate::errors::TaskError;
use crate::mirror::list::{count_active_servers, extract_servers, write_list};
use crate::proc;

const USER_AGENT: &str = concat!("upkeep-mirror-ranker/", env!("CARGO_PKG_VERSION"));

/// Parameters for one fetch → parse → rank → persist job.
///
/// Artifact paths belong to the job, so two jobs running concurrently never
/// share mutable filesystem state as long as their paths differ.
#[derive(Debug, Clone)]
pub struct MirrorJob {
    pub url: String,
    pub fetch_timeout: Duration,
    pub probe_timeout: Duration,
    pub result_count: usize,
    pub rank_tool: String,
    /// The extracted "original list" artifact.
    pub source_path: PathBuf,
    /// The ranked candidate artifact.
    pub ranked_path: PathBuf,
}

impl MirrorJob {
    /// Build a job from the `[mirror]` config section.
    pub fn from_config(mirror: &MirrorSection) -> Self {
        Self {
            url: mirror.url.clone(),
            fetch_timeout: Duration::from_secs(mirror.fetch_timeout_secs),
            probe_timeout: Duration::from_secs(mirror.probe_timeout_secs),
            result_count: mirror.result_count,
            rank_tool: mirror.rank_tool.clone(),
            source_path: mirror.list_dir.join("mirrorlist.orig"),
            ranked_path: mirror.list_dir.join("mirrorlist.pacnew"),
        }
    }

    /// Run the whole pipeline, folding every failure into the task's own
    /// outcome. Nothing raises past the task boundary.
    pub async fn run(&self, name: &str, cancel: &CancellationToken) -> TaskOutcome {
        let mut narrative = Vec::new();

        match self.run_inner(name, cancel, &mut narrative).await {
            Ok(ranked) => TaskOutcome {
                name: name.to_string(),
                status: TaskStatus::Success,
                stdout: ranked,
                stderr: String::new(),
                narrative,
            },
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

    async fn run_inner(
        &self,
        name: &str,
        cancel: &CancellationToken,
        narrative: &mut Vec<String>,
    ) -> Result<String, TaskError> {
        // A failed previous run must not leak into this one.
        self.clean_stale_artifacts()?;

        narrative.push(format!("[{name}] Downloading mirror list..."));
        let raw = self.fetch(cancel).await?;

        let servers = extract_servers(&raw);
        write_list(&self.source_path, &(servers.join("\n") + "\n")).map_err(|err| {
            artifact_error(&self.source_path, err)
        })?;
        narrative.push(format!("[{name}] Downloaded {} mirror URLs", servers.len()));

        // Fail fast rather than attempt a degraded ranking.
        if !proc::command_exists(&self.rank_tool) {
            return Err(TaskError::NotFound {
                tool: self.rank_tool.clone(),
            });
        }

        narrative.push(format!(
            "[{name}] Running {} -n {}...",
            self.rank_tool, self.result_count
        ));

        let argv = vec![
            self.rank_tool.clone(),
            "-m".to_string(),
            self.probe_timeout.as_secs().to_string(),
            "-w".to_string(),
            "-p".to_string(),
            "-n".to_string(),
            self.result_count.to_string(),
            self.source_path.display().to_string(),
        ];

        let output = proc::run(&argv, true, cancel).await?;
        if !output.success() {
            return Err(TaskError::ToolFailure {
                tool: self.rank_tool.clone(),
                exit_code: output.code_or_signal(),
                message: output.stderr.trim().to_string(),
            });
        }

        write_list(&self.ranked_path, &output.stdout)
            .map_err(|err| artifact_error(&self.ranked_path, err))?;

        // An empty ranked result is still a success; the count line surfaces it.
        let ranked = count_active_servers(&output.stdout);
        narrative.push(format!("[{name}] Completed. Ranked {ranked} mirrors."));

        Ok(output.stdout)
    }

    /// Remove artifacts left behind by a previous run. Idempotent.
    fn clean_stale_artifacts(&self) -> Result<(), TaskError> {
        for path in [&self.source_path, &self.ranked_path] {
            match fs::remove_file(path) {
                Ok(()) => debug!(path = %path.display(), "removed stale artifact"),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(artifact_error(path, err)),
            }
        }
        Ok(())
    }

    /// Fetch the raw mirror list, bounded by the configured hard timeout.
    async fn fetch(&self, cancel: &CancellationToken) -> Result<String, TaskError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.fetch_timeout)
            .build()
            .map_err(network_error)?;

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(TaskError::Cancelled),
            res = client.get(&self.url).send() => res.map_err(network_error)?,
        };

        let response = response.error_for_status().map_err(network_error)?;

        let body = tokio::select! {
            _ = cancel.cancelled() => return Err(TaskError::Cancelled),
            body = response.text() => body.map_err(network_error)?,
        };

        Ok(body)
    }
}

fn network_error(err: reqwest::Error) -> TaskError {
    TaskError::Network {
        message: err.to_string(),
    }
}

fn artifact_error(path: &std::path::Path, source: io::Error) -> TaskError {
    TaskError::Artifact {
        path: path.to_path_buf(),
        source,
    }
}
