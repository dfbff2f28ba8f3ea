// src/steps/packages.rs

//! System package maintenance via `pacman`.

use std::fs;

use anyhow::Result;
use tracing::warn;

use crate::console;
use crate::steps::{run_step_command, StepContext};

const INTEGRITY_LOG: &str = "/tmp/pacman_integrity.log";
const MISSING_REPORT: &str = "/tmp/missing_files_report.txt";

pub async fn run(ctx: &StepContext) -> Result<()> {
    console::header("Pacman package manager");

    console::subheading("Updating package database");
    run_step_command(ctx, &["pacman", "-Syy"], false).await?;

    console::subheading("Checking database integrity");
    let check = run_step_command(ctx, &["pacman", "-Dk"], true).await?;

    if let Err(err) = fs::write(INTEGRITY_LOG, &check.stdout) {
        warn!(path = INTEGRITY_LOG, error = %err, "could not save integrity log");
    }
    print!("{}", check.stdout);

    let lowered = check.stdout.to_lowercase();
    if lowered.contains("missing") || lowered.contains("not found") {
        recover_database(ctx).await?;
        return Ok(());
    }

    println!("Passed integrity check");

    console::subheading("Upgrading packages");
    run_step_command(ctx, &["pacman", "-Suv", "--color", "auto"], false).await?;

    Ok(())
}

/// Walk the operator through the usual recovery moves after a failed
/// integrity check: stale lock removal, missing-files report, `--needed`
/// reinstall.
async fn recover_database(ctx: &StepContext) -> Result<()> {
    console::error_line(&format!(
        "Database integrity check failed. Review {INTEGRITY_LOG}"
    ));

    let running = run_step_command(ctx, &["pgrep", "-a", "pacman"], true).await?;

    if console::ask_yes_no(&ctx.interrupt, "Check database lock", true).await? {
        if running.stdout.trim().is_empty() {
            println!("Removing database lock");
            run_step_command(ctx, &["rm", "-f", "/var/lib/pacman/db.lck"], false).await?;
        } else {
            console::error_line(&format!(
                "Pacman process is running: {}",
                running.stdout.trim()
            ));
            return Ok(());
        }
    }

    if console::ask_yes_no(
        &ctx.interrupt,
        "Check missing or broken database/packages",
        true,
    )
    .await?
    {
        println!("Generating missing files report...");
        let qk = run_step_command(ctx, &["pacman", "-Qk"], true).await?;

        let missing: Vec<&str> = qk
            .stdout
            .lines()
            .filter(|line| {
                line.contains("missing files")
                    && line.split_whitespace().nth(3).is_some_and(|n| n != "0")
            })
            .collect();

        if missing.is_empty() {
            println!("No missing files found.");
        } else {
            console::error_line("Missing files detected:");
            let joined = missing.join("\n");
            if let Err(err) = fs::write(MISSING_REPORT, &joined) {
                warn!(path = MISSING_REPORT, error = %err, "could not save missing-files report");
            }
            println!("{joined}");
        }
    }

    if console::ask_yes_no(&ctx.interrupt, "Try fixing missing dependencies", true).await? {
        run_step_command(ctx, &["pacman", "-Syu", "--needed"], false).await?;
    }

    Ok(())
}
