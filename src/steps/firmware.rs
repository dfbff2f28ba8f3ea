// src/steps/firmware.rs

//! Firmware maintenance via `fwupdmgr`.

use std::path::Path;

use anyhow::Result;

use crate::console;
use crate::steps::{mirrorlist, run_step_command, StepContext};

pub async fn run(ctx: &StepContext) -> Result<()> {
    console::header("Firmware update (fwupdmgr)");

    if !console::ask_yes_no(&ctx.interrupt, "Update firmware with fwupdmgr", false).await? {
        println!("Firmware update skipped.");
        return Ok(());
    }

    if console::ask_yes_no(
        &ctx.interrupt,
        "Revert firmware mirrorlists from .bak files",
        false,
    )
    .await?
    {
        mirrorlist::revert_backups(Path::new("/etc/fwupd/remotes.d"));
    }

    console::subheading("Refreshing firmware databases");
    let refresh = run_step_command(ctx, &["fwupdmgr", "refresh", "--force"], true).await?;
    if !refresh.stdout.is_empty() {
        print!("{}", refresh.stdout);
    }
    if !refresh.success() {
        console::error_line("fwupdmgr refresh failed");
        if !refresh.stderr.is_empty() {
            eprint!("{}", refresh.stderr);
        }
        return Ok(());
    }

    console::subheading("Syncing firmware metadata");
    let sync = run_step_command(ctx, &["fwupdmgr", "sync", "--force"], true).await?;
    if !sync.stdout.is_empty() {
        print!("{}", sync.stdout);
    }
    if !sync.success() {
        console::error_line("fwupdmgr sync failed");
        if !sync.stderr.is_empty() {
            eprint!("{}", sync.stderr);
        }
        return Ok(());
    }

    console::subheading("Updating firmware devices");
    run_step_command(ctx, &["fwupdmgr", "update"], false).await?;

    Ok(())
}
