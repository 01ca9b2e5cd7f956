//! Command-line front end for skillsync.
//!
//! `run` parses arguments, installs logging and dispatches to the `sync`,
//! `validate` and `install` handlers. Every handler resolves its exit status
//! itself: fatal identity errors and validation discrepancies exit with 1.

#![deny(unsafe_code)]

pub mod cli;
mod commands;
pub mod config;

use crate::cli::{Cli, Commands};
use crate::commands::{handle_install_command, handle_sync_command, handle_validate_command};
use crate::config::RepoConfig;
use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SKILLSYNC_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Entry point of the `skillsync` binary.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging();

    let config = RepoConfig::resolve(&cli.repo)?;
    let today = skillsync_metadata::today_utc();

    match cli.command {
        Commands::Sync {
            dry_run,
            global,
            format,
        } => handle_sync_command(&config, today, dry_run, global, format),
        Commands::Validate { format } => handle_validate_command(&config, format),
        Commands::Install { skip_validation } => handle_install_command(&config, skip_validation),
    }
}
