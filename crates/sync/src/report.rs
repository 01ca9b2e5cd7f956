//! Sync reporting types for tracking what happened to each adapter.

use crate::registry::{ProjectionMode, TrackedIdentity};
use serde::{Deserialize, Serialize};
use skillsync_metadata::SkillIdentity;
use std::path::PathBuf;

/// What happened to a single adapter target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetOutcome {
    /// Full content written (or would be, on a dry run).
    Written,
    /// Fields rewritten in place (or would be, on a dry run).
    Updated {
        version_hits: usize,
        date_hits: usize,
    },
    /// Projection produced the content already on disk.
    Unchanged,
    /// Field-update destination does not exist.
    MissingDestination,
    /// Target tracks an identity that is not configured for this run.
    Skipped { reason: String },
    /// Reading or writing the target failed.
    Failed { error: String },
}

impl TargetOutcome {
    /// Returns a human-readable description of the outcome.
    pub fn description(&self, dry_run: bool) -> String {
        let verb = |done: &str, planned: &str| {
            if dry_run {
                planned.to_string()
            } else {
                done.to_string()
            }
        };
        match self {
            Self::Written => verb("written", "would write"),
            Self::Updated {
                version_hits,
                date_hits,
            } => format!(
                "{} (skill_version x{}, last_synced x{})",
                verb("updated", "would update"),
                version_hits,
                date_hits
            ),
            Self::Unchanged => "unchanged".to_string(),
            Self::MissingDestination => "not found, skipped".to_string(),
            Self::Skipped { reason } => format!("skipped: {reason}"),
            Self::Failed { error } => format!("failed: {error}"),
        }
    }

    /// Soft problems that do not fail a sync run.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::MissingDestination | Self::Skipped { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// True when the destination was (or would be) modified.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Written | Self::Updated { .. })
    }
}

/// Report for one adapter target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetReport {
    pub path: PathBuf,
    pub mode: ProjectionMode,
    pub tracks: TrackedIdentity,
    pub outcome: TargetOutcome,
    /// Non-fatal warnings, e.g. expected fields not found.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Complete report of a sync run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub primary: SkillIdentity,
    pub secondary: Option<SkillIdentity>,
    /// `YYYY-MM-DD` stamped on every target of the run.
    pub today: String,
    pub dry_run: bool,
    pub targets: Vec<TargetReport>,
}

impl SyncReport {
    /// Number of targets that were (or would be) modified.
    pub fn changed(&self) -> usize {
        self.targets.iter().filter(|t| t.outcome.changed()).count()
    }

    pub fn unchanged(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| t.outcome == TargetOutcome::Unchanged)
            .count()
    }

    /// Targets with a soft warning of any kind.
    pub fn warned(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| t.outcome.is_warning() || !t.warnings.is_empty())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| t.outcome.is_failure())
            .count()
    }

    /// One line per target.
    pub fn target_lines(&self) -> Vec<String> {
        self.targets
            .iter()
            .map(|t| {
                format!(
                    "{} [{}]: {}",
                    t.path.display(),
                    t.mode.label(),
                    t.outcome.description(self.dry_run)
                )
            })
            .collect()
    }

    /// Generates a formatted summary for display.
    pub fn format_summary(&self) -> String {
        let mut out = String::new();
        for line in self.target_lines() {
            out.push_str(&format!("  {line}\n"));
        }
        out.push_str(&format!(
            "Sync Complete{}: {} changed, {} unchanged, {} warnings, {} failed ({} targets, {})\n",
            if self.dry_run { " (dry run)" } else { "" },
            self.changed(),
            self.unchanged(),
            self.warned(),
            self.failed(),
            self.targets.len(),
            self.today
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcomes: Vec<TargetOutcome>) -> SyncReport {
        SyncReport {
            primary: SkillIdentity::new("humanizer", "1.2.3"),
            secondary: None,
            today: "2026-01-31".into(),
            dry_run: false,
            targets: outcomes
                .into_iter()
                .enumerate()
                .map(|(i, outcome)| TargetReport {
                    path: PathBuf::from(format!("adapter-{i}.md")),
                    mode: ProjectionMode::FieldUpdate,
                    tracks: TrackedIdentity::Primary,
                    outcome,
                    warnings: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn counts_by_outcome() {
        let report = report(vec![
            TargetOutcome::Written,
            TargetOutcome::Updated {
                version_hits: 1,
                date_hits: 1,
            },
            TargetOutcome::Unchanged,
            TargetOutcome::MissingDestination,
            TargetOutcome::Failed {
                error: "denied".into(),
            },
        ]);
        assert_eq!(report.changed(), 2);
        assert_eq!(report.unchanged(), 1);
        assert_eq!(report.warned(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn summary_has_line_per_target() {
        let summary = report(vec![TargetOutcome::Unchanged, TargetOutcome::MissingDestination])
            .format_summary();
        assert!(summary.contains("adapter-0.md [field update]: unchanged"));
        assert!(summary.contains("adapter-1.md [field update]: not found, skipped"));
        assert!(summary.contains("Sync Complete: 0 changed, 1 unchanged, 1 warnings"));
    }

    #[test]
    fn dry_run_descriptions_are_conditional() {
        assert_eq!(TargetOutcome::Written.description(true), "would write");
        assert_eq!(TargetOutcome::Written.description(false), "written");
    }
}
