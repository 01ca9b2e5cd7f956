use crate::cli::OutputFormat;
use crate::config::RepoConfig;
use anyhow::Result;
use skillsync_metadata::source_file_name;
use std::process::ExitCode;

/// Handle the `validate` command.
pub(crate) fn handle_validate_command(config: &RepoConfig, format: OutputFormat) -> Result<ExitCode> {
    let (identity, report) = match skillsync_sync::validate(
        &config.root,
        &config.registry,
        &config.source,
        config.secondary(),
    ) {
        Ok(result) => result,
        Err(err) => {
            tracing::error!("Error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            for message in report.messages() {
                tracing::error!("{message}");
            }
        }
    }

    if !report.is_ok() {
        tracing::error!(
            "{} discrepancies across {} adapters",
            report.discrepancies.len(),
            report.checked
        );
        return Ok(ExitCode::FAILURE);
    }

    tracing::info!(
        "Adapter metadata validated against {} ({} {}).",
        source_file_name(&config.source),
        identity.name,
        identity.version
    );
    Ok(ExitCode::SUCCESS)
}
