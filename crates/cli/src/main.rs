//! Command-line interface for the `skillsync` application.
//!
//! This crate's binary delegates everything to [`skillsync::run`].

use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    skillsync::run()
}
