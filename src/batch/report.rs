// src/batch/report.rs

use std::fmt::Write as _;

use crate::batch::outcome::{TaskOutcome, TaskStatus};

/// Render batch outcomes for the operator, in submission order.
///
/// Pure formatting: per outcome, a banner with the task name, the narrative
/// log, captured primary output when the task succeeded, stderr when
/// non-empty, and an explicit failure line when the status is not `Success`.
pub fn render(outcomes: &[TaskOutcome]) -> String {
    let mut out = String::new();

    for outcome in outcomes {
        let rule = "=".repeat(60);
        let _ = writeln!(out, "\n{rule}");
        let _ = writeln!(out, " Task: {}", outcome.name);
        let _ = writeln!(out, "{rule}");

        for line in &outcome.narrative {
            let _ = writeln!(out, "{line}");
        }

        if outcome.is_success() && !outcome.stdout.trim().is_empty() {
            let _ = writeln!(out, "\nOutput:");
            let _ = writeln!(out, "{}", outcome.stdout.trim_end());
        }

        if !outcome.stderr.trim().is_empty() {
            let _ = writeln!(out, "\nErrors/Warnings:");
            let _ = writeln!(out, "{}", outcome.stderr.trim_end());
        }

        match outcome.status {
            TaskStatus::Success => {}
            TaskStatus::Failed(code) => {
                let _ = writeln!(out, "\n{} failed with exit code {}", outcome.name, code);
            }
            TaskStatus::Cancelled => {
                let _ = writeln!(out, "\n{} was cancelled", outcome.name);
            }
        }
    }

    out
}
