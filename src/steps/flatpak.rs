// src/steps/flatpak.rs

//! Flatpak maintenance: update, prune, optional repair.

use anyhow::Result;

use crate::console;
use crate::steps::{run_step_command, StepContext};

pub async fn run(ctx: &StepContext) -> Result<()> {
    console::header("Flatpak package manager");

    console::subheading("Updating flatpak packages");
    run_step_command(ctx, &["flatpak", "update"], false).await?;

    if console::ask_yes_no(&ctx.interrupt, "Remove unused flatpak packages?", true).await? {
        println!("Uninstalling unused flatpaks...");
        run_step_command(ctx, &["flatpak", "uninstall", "--unused"], false).await?;
    } else {
        println!("Skipping unused flatpak removal.");
    }

    console::subheading("Checking flatpak installation");
    if console::ask_yes_no(&ctx.interrupt, "Check flatpak checksums?", false).await? {
        println!("Checking flatpaks...");
        run_step_command(ctx, &["flatpak", "repair"], false).await?;
    } else {
        println!("Skipping flatpaks check.");
    }

    Ok(())
}
