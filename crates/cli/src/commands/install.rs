use crate::config::{home_dir, RepoConfig};
use anyhow::{Context, Result};
use skillsync_metadata::extract_identity;
use skillsync_sync::{install, InstallPlan};
use std::process::{Command, ExitCode};

/// Handle the `install` command.
pub(crate) fn handle_install_command(config: &RepoConfig, skip_validation: bool) -> Result<ExitCode> {
    if skip_validation {
        tracing::warn!("Skipping adapter validation.");
    } else if !run_validation(config)? {
        return Ok(ExitCode::FAILURE);
    }

    let identity = match extract_identity(&config.source) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::error!("Error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let plan = InstallPlan::standard(&config.root, &home_dir()?, &identity.name);
    let report = install(&plan)?;
    tracing::info!("{}", report.format_summary());
    Ok(ExitCode::SUCCESS)
}

/// Runs `skillsync validate` for the same repository in a child process.
///
/// Blocks until the child exits. Returns whether validation passed.
fn run_validation(config: &RepoConfig) -> Result<bool> {
    let exe = std::env::current_exe().context("locating skillsync executable")?;
    let mut command = Command::new(exe);
    command
        .arg("--root")
        .arg(&config.root)
        .arg("--source")
        .arg(&config.source);
    match config.secondary() {
        Some(secondary) => command.arg("--secondary").arg(secondary),
        None => command.arg("--no-secondary"),
    };
    if let Some(registry) = &config.registry_path {
        command.arg("--registry").arg(registry);
    }
    command.arg("validate");

    tracing::info!("Validating adapters before install");
    let output = command.output().context("running validation")?;
    if output.status.success() {
        return Ok(true);
    }

    tracing::error!("Validation failed. Aborting installation.");
    let stderr = String::from_utf8_lossy(&output.stderr);
    for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
        tracing::error!("{line}");
    }
    Ok(false)
}
