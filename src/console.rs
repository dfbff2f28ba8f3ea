// src/console.rs

//! Operator-facing console helpers: section banners and yes/no prompts.
//!
//! All of the interactive conversation goes through stdout/stdin here; the
//! `tracing` layer is reserved for diagnostics. Prompts race against the
//! interrupt token so a Ctrl-C at a question unwinds the whole run instead
//! of hanging on a read.

use std::io::Write as _;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::errors::Interrupted;

/// Print a section header banner.
pub fn header(title: &str) {
    println!("\n========== \t {title} \t ==========\n");
}

/// Print a subsection heading.
pub fn subheading(title: &str) {
    println!("\n----- \t {title} \t -----\n");
}

/// Print an operator-facing error line.
pub fn error_line(message: &str) {
    eprintln!("++=++ [ERROR] {message}");
}

/// Ask a yes/no question with a default answer.
///
/// - Empty input (or EOF, for non-interactive runs) returns the default.
/// - Anything other than yes/no re-asks.
/// - An operator interrupt while waiting returns `Interrupted`.
pub async fn ask_yes_no(
    interrupt: &CancellationToken,
    question: &str,
    default: bool,
) -> Result<bool> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let marker = if default { "Y" } else { "N" };

    loop {
        print!("++=++ {question} ({marker}): ");
        std::io::stdout().flush().context("flushing prompt")?;

        let line = tokio::select! {
            _ = interrupt.cancelled() => return Err(Interrupted.into()),
            line = lines.next_line() => line.context("reading operator input")?,
        };

        let Some(line) = line else {
            // stdin closed; fall back to the default answer.
            println!();
            return Ok(default);
        };

        match line.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => error_line("Invalid input. Please enter yes or no."),
        }
    }
}
