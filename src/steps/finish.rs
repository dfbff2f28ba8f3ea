// src/steps/finish.rs

//! Final summary and the reboot offer.

use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;

use crate::console;
use crate::errors::Interrupted;
use crate::proc::command_exists;
use crate::steps::{disk, run_step_command, StepContext};

const REBOOT_DELAY: Duration = Duration::from_secs(10);

pub async fn run(ctx: &StepContext) -> Result<()> {
    console::header("Maintenance summary");
    disk::show("Final disk space");
    println!("System maintenance complete!");

    console::header("Reboot system");

    if !command_exists("reboot") {
        console::error_line("reboot command not found");
        return Ok(());
    }

    if console::ask_yes_no(&ctx.interrupt, "Reboot now?", false).await? {
        println!("Rebooting system in {} seconds...", REBOOT_DELAY.as_secs());

        tokio::select! {
            _ = ctx.interrupt.cancelled() => return Err(Interrupted.into()),
            _ = sleep(REBOOT_DELAY) => {}
        }

        run_step_command(ctx, &["reboot"], false).await?;
    }

    Ok(())
}
