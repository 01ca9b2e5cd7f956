use crate::cli::OutputFormat;
use crate::config::{home_dir, RepoConfig};
use anyhow::Result;
use skillsync_sync::{SyncOrchestrator, SyncParams, SyncSources};
use std::process::ExitCode;
use time::Date;

/// Handle the `sync` command.
pub(crate) fn handle_sync_command(
    config: &RepoConfig,
    today: Date,
    dry_run: bool,
    global: bool,
    format: OutputFormat,
) -> Result<ExitCode> {
    let sources = match SyncSources::load(&config.source, config.secondary()) {
        Ok(sources) => sources,
        Err(err) => {
            tracing::error!("Error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut registry = config.registry.clone();
    if global {
        registry = registry.with_global_targets(&home_dir()?, &sources.primary.identity.name);
    }

    let orchestrator = SyncOrchestrator::new(&config.root, registry);
    let report = orchestrator.sync(&sources, today, &SyncParams { dry_run });

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            for line in report.format_summary().lines() {
                tracing::info!("{line}");
            }
        }
    }

    if report.failed() > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
