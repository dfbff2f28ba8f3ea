// src/steps/aur.rs

//! AUR package maintenance via `yay`, plus cache cleanup.

use anyhow::Result;

use crate::console;
use crate::steps::{disk, run_step_command, StepContext};

pub async fn run(ctx: &StepContext) -> Result<()> {
    console::header("AUR package manager (yay)");

    console::subheading("Upgrading AUR packages");
    run_step_command(ctx, &["yay", "-Sua"], false).await?;

    console::subheading("Cleaning up package caches");

    if console::ask_yes_no(&ctx.interrupt, "Remove orphaned packages?", true).await? {
        let orphans = run_step_command(ctx, &["pacman", "-Qdtq"], true).await?;
        let names: Vec<&str> = orphans
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if names.is_empty() {
            println!("No orphaned packages found.");
        } else {
            println!("Removing orphaned packages:");
            println!("{}", names.join("\n"));

            let mut argv = vec!["pacman", "-Rns"];
            argv.extend(&names);
            run_step_command(ctx, &argv, false).await?;
            run_step_command(ctx, &["yay", "-Yc"], false).await?;

            println!("Note: /home files and configuration caches remain unaffected.");
        }
    } else {
        println!("Skipping removal of orphaned packages.");
    }

    disk::show("Before cache cleanup");
    run_step_command(ctx, &["paccache", "-r", "-ufv"], false).await?;
    run_step_command(ctx, &["yay", "-Scc"], false).await?;
    disk::show("After cache cleanup");

    Ok(())
}
