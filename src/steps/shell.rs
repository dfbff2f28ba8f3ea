// src/steps/shell.rs

//! Zsh plugin manager maintenance via `zinit`.

use anyhow::Result;

use crate::console;
use crate::steps::{run_step_command, StepContext};

pub async fn run(ctx: &StepContext) -> Result<()> {
    console::header("Update zsh shell");

    if !console::ask_yes_no(&ctx.interrupt, "Update Zinit", false).await? {
        println!("Zinit update skipped.");
        return Ok(());
    }

    run_step_command(ctx, &["zinit", "self-update"], false).await?;

    if console::ask_yes_no(&ctx.interrupt, "Update zinit plugins", true).await? {
        run_step_command(ctx, &["zinit", "update", "--all"], false).await?;
    }

    run_step_command(ctx, &["zinit", "zstatus"], false).await?;

    Ok(())
}
