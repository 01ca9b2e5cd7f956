//! Sync orchestrator that walks the registry and projects metadata into each adapter.

use crate::projector::{field_update, full_resync, MetadataBlock};
use crate::registry::{AdapterRegistry, AdapterTarget, ProjectionMode, TrackedIdentity};
use crate::report::{SyncReport, TargetOutcome, TargetReport};
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use skillsync_metadata::{format_date, CanonicalDocument, MetadataError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use time::Date;

/// Parameters for a sync operation.
///
/// ```
/// use skillsync_sync::SyncParams;
///
/// let params = SyncParams { dry_run: true };
/// assert!(params.dry_run);
/// assert!(!SyncParams::default().dry_run);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncParams {
    /// Compute every projection but write nothing.
    pub dry_run: bool,
}

/// Canonical documents feeding a run.
#[derive(Debug, Clone)]
pub struct SyncSources {
    pub primary: CanonicalDocument,
    pub secondary: Option<CanonicalDocument>,
}

impl SyncSources {
    /// Loads the primary and optional secondary documents.
    ///
    /// Any failure here is fatal for the run.
    pub fn load(
        primary: &Path,
        secondary: Option<&Path>,
    ) -> std::result::Result<Self, MetadataError> {
        let primary = CanonicalDocument::load(primary)?;
        let secondary = secondary.map(CanonicalDocument::load).transpose()?;
        Ok(Self { primary, secondary })
    }

    /// Document supplying the identity for `tracks`, if configured.
    pub fn document(&self, tracks: TrackedIdentity) -> Option<&CanonicalDocument> {
        match tracks {
            TrackedIdentity::Primary => Some(&self.primary),
            TrackedIdentity::Secondary => self.secondary.as_ref(),
        }
    }
}

/// Orchestrates projection of canonical metadata into every registered adapter.
pub struct SyncOrchestrator {
    root: PathBuf,
    registry: AdapterRegistry,
}

impl SyncOrchestrator {
    /// Creates an orchestrator resolving relative target paths against `root`.
    pub fn new(root: impl Into<PathBuf>, registry: AdapterRegistry) -> Self {
        Self {
            root: root.into(),
            registry,
        }
    }

    /// Loads the canonical documents and syncs every target.
    ///
    /// Identity extraction errors are returned before any file is touched.
    pub fn run(
        &self,
        canonical: &Path,
        secondary: Option<&Path>,
        today: Date,
        params: &SyncParams,
    ) -> std::result::Result<SyncReport, MetadataError> {
        let sources = SyncSources::load(canonical, secondary)?;
        Ok(self.sync(&sources, today, params))
    }

    /// Syncs every target in registry order.
    ///
    /// Targets are independent: a failure on one is recorded and the next
    /// target is still processed. Nothing is rolled back.
    pub fn sync(&self, sources: &SyncSources, today: Date, params: &SyncParams) -> SyncReport {
        tracing::info!(
            identity = %sources.primary.identity,
            date = %format_date(today),
            "Syncing {} adapter targets",
            self.registry.len()
        );

        let targets = self
            .registry
            .iter()
            .map(|target| {
                let mut warnings = Vec::new();
                let outcome = match self.sync_target(target, sources, today, params, &mut warnings)
                {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        tracing::error!(path = %target.path.display(), "{err:#}");
                        TargetOutcome::Failed {
                            error: format!("{err:#}"),
                        }
                    }
                };
                TargetReport {
                    path: target.path.clone(),
                    mode: target.mode,
                    tracks: target.tracks,
                    outcome,
                    warnings,
                }
            })
            .collect();

        SyncReport {
            primary: sources.primary.identity.clone(),
            secondary: sources.secondary.as_ref().map(|d| d.identity.clone()),
            today: format_date(today),
            dry_run: params.dry_run,
            targets,
        }
    }

    fn sync_target(
        &self,
        target: &AdapterTarget,
        sources: &SyncSources,
        today: Date,
        params: &SyncParams,
        warnings: &mut Vec<String>,
    ) -> Result<TargetOutcome> {
        let Some(doc) = sources.document(target.tracks) else {
            tracing::warn!(
                path = %target.path.display(),
                "Skipping: no secondary document configured"
            );
            return Ok(TargetOutcome::Skipped {
                reason: "no secondary document configured".to_string(),
            });
        };
        let dest = self.root.join(&target.path);

        match target.mode {
            ProjectionMode::FullResync => {
                tracing::info!("Syncing {} from {}...", dest.display(), doc.file_name());
                let block = MetadataBlock::new(
                    &doc.identity,
                    today,
                    doc.file_name(),
                    &target.adapter_id,
                    &target.adapter_format,
                );
                let content = full_resync(&doc.content, &block);
                if read_existing(&dest)?.as_deref() == Some(content.as_str()) {
                    return Ok(TargetOutcome::Unchanged);
                }
                if !params.dry_run {
                    if let Some(parent) = dest.parent() {
                        fs::create_dir_all(parent)
                            .with_context(|| format!("creating {}", parent.display()))?;
                    }
                    fs::write(&dest, content)
                        .with_context(|| format!("writing {}", dest.display()))?;
                    tracing::info!("Updated {}", dest.display());
                }
                Ok(TargetOutcome::Written)
            }
            ProjectionMode::FieldUpdate => {
                let Some(existing) = read_existing(&dest)? else {
                    tracing::warn!("Warning: {} not found.", dest.display());
                    return Ok(TargetOutcome::MissingDestination);
                };
                tracing::info!("Updating metadata in {}...", dest.display());
                let update = field_update(&existing, &doc.identity.version, today);
                if !update.is_complete() {
                    let message = format!(
                        "expected fields not found: {}",
                        update.missing_fields().join(", ")
                    );
                    tracing::warn!("Warning: {}: {}", dest.display(), message);
                    warnings.push(message);
                }
                if update.content == existing {
                    return Ok(TargetOutcome::Unchanged);
                }
                if !params.dry_run {
                    fs::write(&dest, &update.content)
                        .with_context(|| format!("writing {}", dest.display()))?;
                    tracing::info!("Updated {}", dest.display());
                }
                Ok(TargetOutcome::Updated {
                    version_hits: update.version_hits,
                    date_hits: update.date_hits,
                })
            }
        }
    }
}

/// Reads `path`, mapping a missing file to `None`.
fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TrackedIdentity::{Primary, Secondary};
    use tempfile::tempdir;
    use time::macros::date;

    fn registry() -> AdapterRegistry {
        AdapterRegistry::new(vec![
            AdapterTarget::new(
                "out/SKILL.md",
                ProjectionMode::FullResync,
                Primary,
                "skill",
                "Test skill",
            ),
            AdapterTarget::new(
                "TOOL.md",
                ProjectionMode::FieldUpdate,
                Primary,
                "tool",
                "Tool context",
            ),
            AdapterTarget::new(
                "PRO.md",
                ProjectionMode::FieldUpdate,
                Secondary,
                "tool-pro",
                "Tool context",
            ),
        ])
    }

    #[test]
    fn syncs_each_mode_and_skips_unconfigured_secondary() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let canonical = tmp.path().join("SKILL.md");
        fs::write(&canonical, "---\nname: humanizer\nversion: 1.3.0\n---\nBody\n")?;
        fs::write(
            tmp.path().join("TOOL.md"),
            "# Tool\nskill_version: 1.0.0\nlast_synced: 2000-01-01\n",
        )?;

        let orchestrator = SyncOrchestrator::new(tmp.path(), registry());
        let report = orchestrator.run(
            &canonical,
            None,
            date!(2026 - 02 - 01),
            &SyncParams::default(),
        )?;

        assert_eq!(report.targets[0].outcome, TargetOutcome::Written);
        assert_eq!(
            report.targets[1].outcome,
            TargetOutcome::Updated {
                version_hits: 1,
                date_hits: 1
            }
        );
        assert!(matches!(
            report.targets[2].outcome,
            TargetOutcome::Skipped { .. }
        ));

        let written = fs::read_to_string(tmp.path().join("out/SKILL.md"))?;
        assert!(written.contains("  skill_version: 1.3.0\n"));
        assert!(written.contains("  source_path: SKILL.md\n"));
        assert!(written.ends_with("---\nBody\n"));
        assert_eq!(
            fs::read_to_string(tmp.path().join("TOOL.md"))?,
            "# Tool\nskill_version: 1.3.0\nlast_synced: 2026-02-01\n"
        );
        Ok(())
    }

    #[test]
    fn second_run_reports_unchanged() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let canonical = tmp.path().join("SKILL.md");
        fs::write(&canonical, "name: humanizer\nversion: 1.3.0\n")?;
        fs::write(
            tmp.path().join("TOOL.md"),
            "skill_version: 1.0.0\nlast_synced: 2000-01-01\n",
        )?;
        let orchestrator = SyncOrchestrator::new(tmp.path(), registry());
        let today = date!(2026 - 02 - 01);

        orchestrator.run(&canonical, None, today, &SyncParams::default())?;
        let again = orchestrator.run(&canonical, None, today, &SyncParams::default())?;

        assert_eq!(again.targets[0].outcome, TargetOutcome::Unchanged);
        assert_eq!(again.targets[1].outcome, TargetOutcome::Unchanged);
        assert_eq!(again.changed(), 0);
        Ok(())
    }

    #[test]
    fn missing_field_update_destination_is_a_warning() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let canonical = tmp.path().join("SKILL.md");
        fs::write(&canonical, "name: humanizer\nversion: 1.3.0\n")?;

        let orchestrator = SyncOrchestrator::new(tmp.path(), registry());
        let report = orchestrator.run(
            &canonical,
            None,
            date!(2026 - 02 - 01),
            &SyncParams::default(),
        )?;

        assert_eq!(report.targets[1].outcome, TargetOutcome::MissingDestination);
        assert!(!tmp.path().join("TOOL.md").exists());
        // the full-resync target before it was still written
        assert!(tmp.path().join("out/SKILL.md").exists());
        Ok(())
    }

    #[test]
    fn absent_fields_warn_without_failing() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let canonical = tmp.path().join("SKILL.md");
        fs::write(&canonical, "name: humanizer\nversion: 1.3.0\n")?;
        fs::write(tmp.path().join("TOOL.md"), "hand-written adapter\n")?;

        let orchestrator = SyncOrchestrator::new(tmp.path(), registry());
        let report = orchestrator.run(
            &canonical,
            None,
            date!(2026 - 02 - 01),
            &SyncParams::default(),
        )?;

        let tool = &report.targets[1];
        assert_eq!(tool.outcome, TargetOutcome::Unchanged);
        assert_eq!(
            tool.warnings,
            vec!["expected fields not found: skill_version, last_synced"]
        );
        assert_eq!(report.failed(), 0);
        Ok(())
    }

    #[test]
    fn dry_run_writes_nothing() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let canonical = tmp.path().join("SKILL.md");
        fs::write(&canonical, "name: humanizer\nversion: 1.3.0\n")?;
        let tool = tmp.path().join("TOOL.md");
        fs::write(&tool, "skill_version: 1.0.0\nlast_synced: 2000-01-01\n")?;

        let orchestrator = SyncOrchestrator::new(tmp.path(), registry());
        let report = orchestrator.run(
            &canonical,
            None,
            date!(2026 - 02 - 01),
            &SyncParams { dry_run: true },
        )?;

        assert_eq!(report.changed(), 2);
        assert!(!tmp.path().join("out").exists());
        assert_eq!(
            fs::read_to_string(&tool)?,
            "skill_version: 1.0.0\nlast_synced: 2000-01-01\n"
        );
        Ok(())
    }

    #[test]
    fn unreadable_canonical_is_fatal() {
        let tmp = tempdir().unwrap();
        let orchestrator = SyncOrchestrator::new(tmp.path(), registry());

        let err = orchestrator
            .run(
                &tmp.path().join("SKILL.md"),
                None,
                date!(2026 - 02 - 01),
                &SyncParams::default(),
            )
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn failure_on_one_target_does_not_block_the_next() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let canonical = tmp.path().join("SKILL.md");
        fs::write(&canonical, "name: humanizer\nversion: 1.3.0\n")?;
        // a directory where the full-resync file should go
        fs::create_dir_all(tmp.path().join("out/SKILL.md"))?;
        fs::write(
            tmp.path().join("TOOL.md"),
            "skill_version: 1.0.0\nlast_synced: 2000-01-01\n",
        )?;

        let orchestrator = SyncOrchestrator::new(tmp.path(), registry());
        let report = orchestrator.run(
            &canonical,
            None,
            date!(2026 - 02 - 01),
            &SyncParams::default(),
        )?;

        assert!(report.targets[0].outcome.is_failure());
        assert!(report.targets[1].outcome.changed());
        Ok(())
    }
}
