// src/lib.rs

pub mod batch;
pub mod cli;
pub mod config;
pub mod console;
pub mod errors;
pub mod logging;
pub mod mirror;
pub mod proc;
pub mod steps;

use std::path::Path;

use anyhow::{anyhow, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::loader::load_or_default;
use crate::config::model::ConfigFile;
use crate::proc::command_exists;
use crate::steps::{StepContext, STEPS};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - Ctrl-C handling (one interrupt token fanned out to prompts and batches)
/// - the maintenance step sequence
pub async fn run(args: CliArgs) -> Result<()> {
    let config = load_or_default(Path::new(&args.config))?;

    if args.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    if let Some(ref name) = args.only {
        if !STEPS.iter().any(|(step, _)| *step == name.as_str()) {
            let known: Vec<&str> = STEPS.iter().map(|(step, _)| *step).collect();
            return Err(anyhow!(
                "unknown step '{name}' (expected one of: {})",
                known.join(", ")
            ));
        }
    }

    // Ctrl-C → cancel everything hanging off this token: queued batch tasks
    // are never dispatched, in-flight children are killed, prompts unwind.
    let interrupt = CancellationToken::new();
    {
        let token = interrupt.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {err}");
                return;
            }
            token.cancel();
        });
    }

    let ctx = StepContext { config, interrupt };

    console::header("Starting full system maintenance");
    steps::disk::show("Initial disk space");

    run_steps(&ctx, args.only.as_deref()).await
}

/// Run the step sequence, honoring `--only`, per-step config flags, and
/// tool gating.
async fn run_steps(ctx: &StepContext, only: Option<&str>) -> Result<()> {
    let selected = |name: &str| only.is_none_or(|o| o == name);
    let gated = |name: &str, tool: &str| {
        if command_exists(tool) {
            true
        } else {
            println!("{tool} not found, skipping {name} step");
            false
        }
    };

    let flags = &ctx.config.steps;

    if selected("mirrors") && flags.mirrors && gated("mirrors", "pacman") {
        steps::mirrorlist::run(ctx).await?;
    }
    if selected("firmware") && flags.firmware && gated("firmware", "fwupdmgr") {
        steps::firmware::run(ctx).await?;
    }
    if selected("packages") && flags.packages && gated("packages", "pacman") {
        steps::packages::run(ctx).await?;
    }
    if selected("aur") && flags.aur && gated("aur", "yay") {
        steps::aur::run(ctx).await?;
    }
    if selected("flatpak") && flags.flatpak && gated("flatpak", "flatpak") {
        steps::flatpak::run(ctx).await?;
    }
    if selected("shell") && flags.shell && gated("shell", "zinit") {
        steps::shell::run(ctx).await?;
    }
    if selected("journal") && flags.journal && gated("journal", "journalctl") {
        steps::journal::run(ctx).await?;
    }

    // The summary/reboot offer belongs to full runs only.
    if only.is_none() {
        steps::finish::run(ctx).await?;
    }

    Ok(())
}

/// Simple dry-run output: print the resolved config and the step plan.
fn print_dry_run(config: &ConfigFile) {
    println!("upkeep dry-run");
    println!("  mirror.url = {}", config.mirror.url);
    println!("  mirror.fetch_timeout_secs = {}", config.mirror.fetch_timeout_secs);
    println!("  mirror.probe_timeout_secs = {}", config.mirror.probe_timeout_secs);
    println!("  mirror.result_count = {}", config.mirror.result_count);
    println!("  mirror.list_dir = {}", config.mirror.list_dir.display());
    println!("  mirror.max_workers = {}", config.mirror.max_workers);
    println!("  mirror.rank_tool = {}", config.mirror.rank_tool);
    println!("  mirror.helper_tool = {}", config.mirror.helper_tool);
    println!();

    println!("steps:");
    for (name, tool) in STEPS {
        let enabled = match *name {
            "mirrors" => config.steps.mirrors,
            "firmware" => config.steps.firmware,
            "packages" => config.steps.packages,
            "aur" => config.steps.aur,
            "flatpak" => config.steps.flatpak,
            "shell" => config.steps.shell,
            "journal" => config.steps.journal,
            _ => true,
        };
        let available = command_exists(tool);
        println!("  - {name} (enabled: {enabled}, {tool} present: {available})");
    }

    debug!("dry-run complete (no execution)");
}
