// src/steps/journal.rs

//! Log and coredump cleanup: journal vacuum, logrotate, active-log
//! truncation, coredump directories.

use anyhow::Result;

use crate::console;
use crate::proc::command_exists;
use crate::steps::{run_step_command, StepContext};

/// Directories probed for coredump/temporary debris.
const DUMP_DIRS: &[&str] = &[
    "/var/lib/systemd/coredump",
    "/var/crash",
    "/var/dumps",
    "/var/tmp",
    "/tmp",
];

pub async fn run(ctx: &StepContext) -> Result<()> {
    console::header("Cleaning logs");

    let before = log_space(ctx).await?;

    if console::ask_yes_no(&ctx.interrupt, "Vacuum journalctl down?", false).await? {
        println!("Shrinking journal size and rotating logs");

        run_step_command(ctx, &["journalctl", "--sync"], false).await?;
        run_step_command(ctx, &["journalctl", "--flush"], false).await?;
        run_step_command(ctx, &["journalctl", "--rotate"], false).await?;
        run_step_command(ctx, &["journalctl", "--vacuum-size=10M"], false).await?;

        if command_exists("logrotate") {
            println!("Forcing logrotate");
            run_step_command(ctx, &["logrotate", "-f", "/etc/logrotate.conf"], false).await?;
        }
    } else {
        println!("Skipping journalctl vacuum");
    }

    if console::ask_yes_no(
        &ctx.interrupt,
        "Shorten ACTIVE log files? (Highly invasive)",
        false,
    )
    .await?
    {
        truncate_active_logs(ctx).await?;
    } else {
        println!("Skipping truncation of current log files");
    }

    if console::ask_yes_no(&ctx.interrupt, "Clear coredumps?", false).await? {
        clear_coredumps(ctx).await?;
    } else {
        println!("Skipping coredump removal");
    }

    let after = log_space(ctx).await?;
    println!("Log space: {before} -> {after}");

    Ok(())
}

/// Human-readable size of `/var/log`, or "?" when `du` is unhappy.
async fn log_space(ctx: &StepContext) -> Result<String> {
    let du = run_step_command(ctx, &["du", "-sh", "/var/log"], true).await?;
    Ok(du
        .stdout
        .split_whitespace()
        .next()
        .unwrap_or("?")
        .to_string())
}

async fn truncate_active_logs(ctx: &StepContext) -> Result<()> {
    println!("Stopping log daemons");
    run_step_command(ctx, &["systemctl", "stop", "rsyslog"], false).await?;
    run_step_command(ctx, &["systemctl", "stop", "systemd-journald"], false).await?;

    println!("Emptying current log files");
    run_step_command(
        ctx,
        &[
            "find", "/var/log", "-maxdepth", "2", "-type", "f", "-name", "*.log", "-exec",
            "truncate", "-s", "0", "{}", "+",
        ],
        false,
    )
    .await?;

    println!("Restarting log daemons");
    run_step_command(ctx, &["systemctl", "start", "rsyslog"], false).await?;
    run_step_command(ctx, &["systemctl", "start", "systemd-journald"], false).await?;

    println!("Removing rotated log files");
    run_step_command(
        ctx,
        &["find", "/var/log", "-type", "f", "-name", "*.log.*", "-delete"],
        false,
    )
    .await?;

    Ok(())
}

async fn clear_coredumps(ctx: &StepContext) -> Result<()> {
    println!("Cleaning coredump files...");

    let init_system = if command_exists("systemctl") {
        "systemd"
    } else if command_exists("sv") {
        "runit"
    } else {
        "unknown"
    };

    let coredump_service_active = if init_system == "systemd" {
        let units =
            run_step_command(ctx, &["systemctl", "list-units", "--type=service"], true).await?;
        units.stdout.contains("systemd-coredump")
    } else {
        false
    };

    if coredump_service_active {
        run_step_command(ctx, &["systemctl", "stop", "systemd-coredump.service"], false).await?;
    }

    for dir in DUMP_DIRS.iter().copied() {
        if !std::path::Path::new(dir).is_dir() {
            continue;
        }

        println!("Contents of {dir}:");
        run_step_command(ctx, &["ls", "-lah", dir], false).await?;

        let question = format!("Delete all contents of {dir}?");
        if console::ask_yes_no(&ctx.interrupt, &question, false).await? {
            run_step_command(
                ctx,
                &["find", dir, "-mindepth", "1", "-maxdepth", "1", "-delete"],
                false,
            )
            .await?;
            println!("Cleaned {dir}");
        } else {
            println!("Skipped {dir}");
        }
    }

    if coredump_service_active {
        run_step_command(ctx, &["systemctl", "start", "systemd-coredump.service"], false).await?;
    }

    println!("Coredump cleanup complete (init system: {init_system})");
    Ok(())
}
