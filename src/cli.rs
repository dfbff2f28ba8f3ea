// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `upkeep`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "upkeep",
    version,
    about = "Interactive maintenance orchestrator for rolling-release systems.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Upkeep.toml` in the current working directory. A missing
    /// file is not an error; built-in defaults are used instead.
    #[arg(long, value_name = "PATH", default_value = "Upkeep.toml")]
    pub config: String,

    /// Run only the named maintenance step.
    ///
    /// One of: mirrors, firmware, packages, aur, flatpak, shell, journal.
    #[arg(long, value_name = "NAME")]
    pub only: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `UPKEEP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print resolved config and the step plan, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
