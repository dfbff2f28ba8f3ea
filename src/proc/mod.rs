// src/proc/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running external commands, using
//! `tokio::process::Command`, and classifying their results for the callers.
//!
//! - [`runner`] owns the single-command runner with capture/inherit modes
//!   and interrupt-driven termination.
//! - [`lookup`] answers "is this tool on the search path?" for step gating
//!   and dependency preconditions.

pub mod lookup;
pub mod runner;

pub use lookup::command_exists;
pub use runner::{run, CommandOutput};
