// src/steps/mirrorlist.rs

//! Mirrorlist management: the one step with real concurrency.
//!
//! Assembles a batch of ranking tasks, hands it to the orchestrator, renders
//! the collected outcomes, then installs any produced `.pacnew` files.

use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::batch::{render, Orchestrator, TaskDescriptor};
use crate::console;
use crate::errors::Interrupted;
use crate::mirror::MirrorJob;
use crate::proc::command_exists;
use crate::steps::StepContext;

/// Files under the list directory that may receive `.pacnew` updates.
const MANAGED_LISTS: &[&str] = &["mirrorlist", "endeavouros-mirrorlist", "hosts"];

pub async fn run(ctx: &StepContext) -> Result<()> {
    console::header("Mirrorlist management");

    if !console::ask_yes_no(&ctx.interrupt, "Rerank the mirrors?", false).await? {
        println!("Mirrorlist ranking skipped.");
        return Ok(());
    }

    let mirror = &ctx.config.mirror;

    if console::ask_yes_no(&ctx.interrupt, "Revert mirrorlists from .bak files", false).await? {
        revert_backups(&mirror.list_dir);
    }

    // Assemble the batch: the main ranking job always, the distribution
    // helper only when it is installed.
    let mut descriptors = vec![TaskDescriptor::rank_mirrors(
        "arch-mirrors",
        MirrorJob::from_config(mirror),
    )];

    if command_exists(&mirror.helper_tool) {
        descriptors.push(TaskDescriptor::command(
            "endeavouros-mirrors",
            vec![mirror.helper_tool.clone(), "--hook-rank".to_string()],
        ));
    } else {
        println!(
            "{} not found, skipping distribution mirror ranking",
            mirror.helper_tool
        );
    }

    println!(
        "Starting {} mirror ranking task(s) in parallel...",
        descriptors.len()
    );

    let orchestrator = Orchestrator::new(mirror.max_workers, ctx.interrupt.clone());
    let report = orchestrator.run_batch(descriptors).await;

    console::header("Mirrorlist ranking results");
    print!("{}", render(&report.outcomes));

    if report.interrupted {
        return Err(Interrupted.into());
    }

    apply_pacnew_files(ctx).await?;

    println!("All mirrorlist operations completed.");
    Ok(())
}

/// Restore `<name>.bak` files in `dir` back over `<name>`, with 0644 perms.
///
/// Shared with the firmware step, which keeps its remote lists in a
/// different directory.
pub(crate) fn revert_backups(dir: &Path) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            console::error_line(&format!("Directory {} not readable: {err}", dir.display()));
            return;
        }
    };

    let mut reverted = 0usize;
    for entry in entries.flatten() {
        let bak = entry.path();
        if bak.extension().and_then(|e| e.to_str()) != Some("bak") {
            continue;
        }

        let original = bak.with_extension("");
        match fs::rename(&bak, &original) {
            Ok(()) => {
                if let Err(err) = restore_list_permissions(&original) {
                    console::error_line(&format!(
                        "Failed to set permissions for {}: {err}",
                        original.display()
                    ));
                    continue;
                }
                println!("Reverted: {}", bak.display());
                reverted += 1;
            }
            Err(err) => {
                console::error_line(&format!("Failed to revert {}: {err}", bak.display()));
            }
        }
    }

    if reverted == 0 {
        println!("No .bak files found to revert in {}", dir.display());
    } else {
        println!("Reverted {reverted} .bak file(s).");
    }
}

fn restore_list_permissions(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o644))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Install produced `.pacnew` files over their targets, backing up the
/// previous file to `.bak` first.
async fn apply_pacnew_files(ctx: &StepContext) -> Result<()> {
    console::header("Applying .pacnew files");

    let dir = &ctx.config.mirror.list_dir;

    for name in MANAGED_LISTS {
        let target = dir.join(name);
        let pacnew = dir.join(format!("{name}.pacnew"));
        let bak = dir.join(format!("{name}.bak"));

        if pacnew.is_file() {
            println!("Installing {} -> {}", pacnew.display(), target.display());

            if target.is_file() {
                if let Err(err) = fs::rename(&target, &bak) {
                    console::error_line(&format!(
                        "Failed to back up {}: {err}",
                        target.display()
                    ));
                    continue;
                }
            }

            match fs::rename(&pacnew, &target) {
                Ok(()) => {
                    if let Err(err) = restore_list_permissions(&target) {
                        warn!(path = %target.display(), error = %err, "chmod failed");
                    }
                    println!("Updated {}", target.display());
                }
                Err(err) => {
                    console::error_line(&format!(
                        "Failed to install {}: {err}",
                        pacnew.display()
                    ));
                }
            }
        }

        if bak.is_file() {
            let question = format!("Remove old backup {}?", bak.display());
            if console::ask_yes_no(&ctx.interrupt, &question, false).await? {
                match fs::remove_file(&bak) {
                    Ok(()) => info!(path = %bak.display(), "removed old backup"),
                    Err(err) => console::error_line(&format!(
                        "Failed to remove {}: {err}",
                        bak.display()
                    )),
                }
            }
        }
    }

    Ok(())
}
