//! Installation of synced adapters into the locations each tool reads from.

use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A single copy operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstallStep {
    /// Copy one file into `dest_dir` under `dest_name`.
    File {
        source: PathBuf,
        dest_dir: PathBuf,
        dest_name: String,
    },
    /// Copy a directory tree. With `replace`, an existing destination is
    /// removed first; otherwise files are merged into it.
    Dir {
        source: PathBuf,
        dest: PathBuf,
        replace: bool,
    },
}

impl InstallStep {
    pub fn source(&self) -> &Path {
        match self {
            Self::File { source, .. } | Self::Dir { source, .. } => source,
        }
    }

    pub fn destination(&self) -> PathBuf {
        match self {
            Self::File {
                dest_dir,
                dest_name,
                ..
            } => dest_dir.join(dest_name),
            Self::Dir { dest, .. } => dest.clone(),
        }
    }
}

/// Ordered list of install steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallPlan {
    pub steps: Vec<InstallStep>,
}

impl InstallPlan {
    /// Standard layout: the Gemini extension goes to the user's home, every
    /// other adapter into the workspace at `root`.
    pub fn standard(root: &Path, home: &Path, skill_name: &str) -> Self {
        let adapters = root.join("adapters");
        let agent = root.join(".agent");
        let file = |source: PathBuf, dest_dir: PathBuf, dest_name: &str| InstallStep::File {
            source,
            dest_dir,
            dest_name: dest_name.to_string(),
        };

        let steps = vec![
            InstallStep::Dir {
                source: adapters.join("gemini-extension"),
                dest: home.join(".gemini/extensions").join(skill_name),
                replace: true,
            },
            file(
                adapters.join("antigravity-skill/SKILL.md"),
                agent.join("skills").join(skill_name),
                "SKILL.md",
            ),
            file(
                adapters.join("antigravity-skill/README.md"),
                agent.join("skills").join(skill_name),
                "README.md",
            ),
            InstallStep::Dir {
                source: adapters.join("antigravity-rules-workflows/rules"),
                dest: agent.join("rules"),
                replace: false,
            },
            InstallStep::Dir {
                source: adapters.join("antigravity-rules-workflows/workflows"),
                dest: agent.join("workflows"),
                replace: false,
            },
            file(
                adapters.join(format!("vscode/{skill_name}.code-snippets")),
                root.join(".vscode"),
                &format!("{skill_name}.code-snippets"),
            ),
            file(adapters.join("qwen-cli/QWEN.md"), root.to_path_buf(), "QWEN.md"),
            file(
                adapters.join("copilot/COPILOT.md"),
                root.join(".github"),
                "copilot-instructions.md",
            ),
        ];
        Self { steps }
    }
}

/// What an install run did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallReport {
    /// Destinations written.
    pub installed: Vec<PathBuf>,
    /// Sources that did not exist.
    pub missing: Vec<PathBuf>,
}

impl InstallReport {
    pub fn format_summary(&self) -> String {
        format!(
            "Installation Complete: {} installed, {} sources missing",
            self.installed.len(),
            self.missing.len()
        )
    }
}

/// Executes every step of `plan`.
///
/// Missing sources are warned about and skipped; I/O failures abort.
pub fn install(plan: &InstallPlan) -> Result<InstallReport> {
    let mut report = InstallReport::default();

    for step in &plan.steps {
        let source = step.source();
        if !source.exists() {
            tracing::warn!("Source not found: {}", source.display());
            report.missing.push(source.to_path_buf());
            continue;
        }

        match step {
            InstallStep::File {
                source,
                dest_dir,
                dest_name,
            } => install_file(source, dest_dir, dest_name)?,
            InstallStep::Dir {
                source,
                dest,
                replace,
            } => {
                if *replace && dest.exists() {
                    fs::remove_dir_all(dest)
                        .with_context(|| format!("removing {}", dest.display()))?;
                }
                copy_dir_all(source, dest)?;
            }
        }

        let dest = step.destination();
        tracing::info!("Installed: {}", dest.display());
        report.installed.push(dest);
    }

    Ok(report)
}

/// Copies `source` to `dest_dir/dest_name`, creating directories as needed.
pub fn install_file(source: &Path, dest_dir: &Path, dest_name: &str) -> Result<()> {
    fs::create_dir_all(dest_dir).with_context(|| format!("creating {}", dest_dir.display()))?;
    let dest = dest_dir.join(dest_name);
    fs::copy(source, &dest)
        .with_context(|| format!("copying {} to {}", source.display(), dest.display()))?;
    Ok(())
}

/// Recursively copies a directory tree.
pub fn copy_dir_all(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.with_context(|| format!("walking {}", source.display()))?;
        let rel = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("{} outside {}", entry.path().display(), source.display()))?;
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("creating {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            fs::copy(entry.path(), &target).with_context(|| {
                format!("copying {} to {}", entry.path().display(), target.display())
            })?;
        }
    }
    Ok(())
}
