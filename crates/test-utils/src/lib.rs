//! Shared test utilities for skillsync crates.
//!
//! This crate provides a temporary repository laid out the way the built-in
//! adapter registry expects, with every adapter already in sync.

use std::path::{Path, PathBuf};

pub const PRIMARY_FILE: &str = "SKILL.md";
pub const SECONDARY_FILE: &str = "SKILL_PROFESSIONAL.md";
pub const FIXTURE_DATE: &str = "2026-01-31";

/// Adapter files of the built-in registry: (path, tracks secondary, full resync).
pub const ADAPTER_FILES: &[(&str, bool, bool)] = &[
    ("AGENTS.md", false, false),
    ("adapters/antigravity-skill/SKILL.md", false, true),
    ("adapters/antigravity-skill/SKILL_PROFESSIONAL.md", true, true),
    ("adapters/gemini-extension/GEMINI.md", false, false),
    ("adapters/gemini-extension/GEMINI_PRO.md", true, false),
    ("adapters/vscode/HUMANIZER.md", false, false),
    ("adapters/antigravity-rules-workflows/README.md", false, false),
    ("adapters/qwen-cli/QWEN.md", false, false),
    ("adapters/copilot/COPILOT.md", false, false),
];

/// Canonical skill document text.
pub fn skill_document(name: &str, version: &str) -> String {
    format!(
        "---\nname: {name}\nversion: {version}\ndescription: Removes signs of AI-generated writing.\n---\n\n# {name}\n\nRewrite the text so it reads naturally.\n"
    )
}

/// Temporary repository with canonical documents and synced adapters.
///
/// The tempdir is automatically cleaned up when this struct is dropped.
pub struct RepoFixture {
    pub tempdir: tempfile::TempDir,
    pub primary: (String, String),
    pub secondary: (String, String),
}

impl RepoFixture {
    /// Creates the standard repository:
    /// - `SKILL.md` (`humanizer 1.2.3`)
    /// - `SKILL_PROFESSIONAL.md` (`humanizer-pro 2.3.4`)
    /// - all nine adapters, in sync with their canonical document
    pub fn new() -> std::io::Result<Self> {
        Self::with_identities(("humanizer", "1.2.3"), ("humanizer-pro", "2.3.4"))
    }

    pub fn with_identities(primary: (&str, &str), secondary: (&str, &str)) -> std::io::Result<Self> {
        let fixture = Self {
            tempdir: tempfile::tempdir()?,
            primary: (primary.0.to_string(), primary.1.to_string()),
            secondary: (secondary.0.to_string(), secondary.1.to_string()),
        };
        fixture.write(PRIMARY_FILE, &skill_document(primary.0, primary.1))?;
        fixture.write(SECONDARY_FILE, &skill_document(secondary.0, secondary.1))?;
        for &(path, is_secondary, full) in ADAPTER_FILES {
            fixture.write(path, &fixture.adapter_content(is_secondary, full))?;
        }
        Ok(fixture)
    }

    pub fn root(&self) -> &Path {
        self.tempdir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn primary_path(&self) -> PathBuf {
        self.path(PRIMARY_FILE)
    }

    pub fn secondary_path(&self) -> PathBuf {
        self.path(SECONDARY_FILE)
    }

    /// Writes `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> std::io::Result<PathBuf> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn read(&self, rel: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.path(rel))
    }

    /// Rewrites the canonical primary document with a new version.
    pub fn bump_primary(&self, version: &str) -> std::io::Result<()> {
        self.write(PRIMARY_FILE, &skill_document(&self.primary.0, version))
            .map(|_| ())
    }

    fn adapter_content(&self, is_secondary: bool, full: bool) -> String {
        let ((name, version), source) = if is_secondary {
            (&self.secondary, SECONDARY_FILE)
        } else {
            (&self.primary, PRIMARY_FILE)
        };
        if full {
            format!(
                "---\nname: {name}\nversion: {version}\nadapter_metadata:\n  skill_name: {name}\n  skill_version: {version}\n  last_synced: {FIXTURE_DATE}\n  source_path: {source}\n  adapter_id: fixture\n  adapter_format: Fixture skill\n---\n\n# {name}\n"
            )
        } else {
            format!(
                "# {name} adapter\n\nHand-written instructions for this tool.\n\n## Metadata\n\nskill_name: {name}\nskill_version: {version}\nlast_synced: {FIXTURE_DATE}\nsource_path: {source}\n"
            )
        }
    }
}
