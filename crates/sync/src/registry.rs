//! Registry of adapter destinations.
//!
//! The registry is data: adding or removing a destination never touches the
//! orchestrator or the validator, both of which iterate it in order.

use serde::{Deserialize, Serialize};
use skillsync_metadata::SkillIdentity;
use skillsync_validate::ExpectedMetadata;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How an adapter receives the canonical metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Copy the canonical document and replace its metadata block.
    FullResync,
    /// Rewrite `skill_version` and `last_synced` in place.
    FieldUpdate,
}

impl ProjectionMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::FullResync => "full resync",
            Self::FieldUpdate => "field update",
        }
    }
}

/// Which canonical document supplies an adapter's identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedIdentity {
    #[default]
    Primary,
    /// The "professional" variant of the skill.
    Secondary,
}

/// One adapter destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterTarget {
    /// Destination file; relative paths resolve against the repository root.
    pub path: PathBuf,
    pub mode: ProjectionMode,
    #[serde(default)]
    pub tracks: TrackedIdentity,
    pub adapter_id: String,
    pub adapter_format: String,
}

impl AdapterTarget {
    pub fn new(
        path: impl Into<PathBuf>,
        mode: ProjectionMode,
        tracks: TrackedIdentity,
        adapter_id: impl Into<String>,
        adapter_format: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            mode,
            tracks,
            adapter_id: adapter_id.into(),
            adapter_format: adapter_format.into(),
        }
    }
}

/// Errors loading a registry file.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid registry file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("registry has no targets")]
    Empty,
    #[error("adapter path listed twice: {}", .0.display())]
    DuplicatePath(PathBuf),
}

use ProjectionMode::{FieldUpdate, FullResync};
use TrackedIdentity::{Primary, Secondary};

const BUILTIN_TARGETS: &[(&str, ProjectionMode, TrackedIdentity, &str, &str)] = &[
    ("AGENTS.md", FieldUpdate, Primary, "agents-manifest", "Agents manifest"),
    (
        "adapters/antigravity-skill/SKILL.md",
        FullResync,
        Primary,
        "antigravity-skill",
        "Antigravity skill",
    ),
    (
        "adapters/antigravity-skill/SKILL_PROFESSIONAL.md",
        FullResync,
        Secondary,
        "antigravity-skill-pro",
        "Antigravity skill",
    ),
    (
        "adapters/gemini-extension/GEMINI.md",
        FieldUpdate,
        Primary,
        "gemini-extension",
        "Gemini extension",
    ),
    (
        "adapters/gemini-extension/GEMINI_PRO.md",
        FieldUpdate,
        Secondary,
        "gemini-extension-pro",
        "Gemini extension",
    ),
    (
        "adapters/vscode/HUMANIZER.md",
        FieldUpdate,
        Primary,
        "vscode",
        "VSCode markdown",
    ),
    (
        "adapters/antigravity-rules-workflows/README.md",
        FieldUpdate,
        Primary,
        "antigravity-rules-workflows",
        "Antigravity rules/workflows",
    ),
    (
        "adapters/qwen-cli/QWEN.md",
        FieldUpdate,
        Primary,
        "qwen-cli",
        "Qwen CLI context",
    ),
    (
        "adapters/copilot/COPILOT.md",
        FieldUpdate,
        Primary,
        "copilot",
        "Copilot instructions",
    ),
];

/// Tools whose user-level skill directory can receive a global copy.
const GLOBAL_TOOLS: &[(&str, &str)] = &[
    ("cline", ".cline/skills"),
    ("kilo", ".kilo/skills"),
    ("amp", ".amp/skills"),
    ("opencode", ".opencode/skills"),
    ("claude", ".claude/skills"),
    ("qwen", ".qwen/skills"),
    ("codex", ".codex/skills"),
];

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(rename = "target", default)]
    targets: Vec<AdapterTarget>,
}

/// Ordered list of adapter destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterRegistry {
    targets: Vec<AdapterTarget>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AdapterRegistry {
    /// Creates a registry from explicit targets.
    pub fn new(targets: Vec<AdapterTarget>) -> Self {
        Self { targets }
    }

    /// The destinations shipped with skillsync.
    pub fn builtin() -> Self {
        let targets = BUILTIN_TARGETS
            .iter()
            .map(|&(path, mode, tracks, id, format)| {
                AdapterTarget::new(path, mode, tracks, id, format)
            })
            .collect();
        Self { targets }
    }

    /// Parses a registry from TOML:
    ///
    /// ```toml
    /// [[target]]
    /// path = "adapters/qwen-cli/QWEN.md"
    /// mode = "field_update"
    /// tracks = "primary"
    /// adapter_id = "qwen-cli"
    /// adapter_format = "Qwen CLI context"
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = toml::from_str(text)?;
        if file.targets.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut seen = HashSet::new();
        for target in &file.targets {
            if !seen.insert(target.path.as_path()) {
                return Err(RegistryError::DuplicatePath(target.path.clone()));
            }
        }
        Ok(Self {
            targets: file.targets,
        })
    }

    /// Loads a registry file from disk.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// True when some target takes its identity from the secondary document.
    pub fn tracks_secondary(&self) -> bool {
        self.targets.iter().any(|t| t.tracks == Secondary)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdapterTarget> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Appends full-resync copies of the primary skill into each tool's
    /// user-level skill directory under `home`.
    pub fn with_global_targets(mut self, home: &Path, skill_name: &str) -> Self {
        for (tool, dir) in GLOBAL_TOOLS {
            self.targets.push(AdapterTarget::new(
                home.join(dir).join(skill_name).join("SKILL.md"),
                FullResync,
                Primary,
                format!("{tool}-global"),
                format!("{tool} skill"),
            ));
        }
        self
    }

    /// Metadata each target should carry for the given identities.
    ///
    /// `primary`/`secondary` pair an identity with the file name of its
    /// canonical document. Targets tracking an absent secondary are left out.
    pub fn expectations(
        &self,
        primary: (&SkillIdentity, &str),
        secondary: Option<(&SkillIdentity, &str)>,
    ) -> Vec<ExpectedMetadata> {
        self.targets
            .iter()
            .filter_map(|target| {
                let (identity, source) = match target.tracks {
                    Primary => primary,
                    Secondary => secondary?,
                };
                Some(ExpectedMetadata {
                    path: target.path.clone(),
                    skill_name: identity.name.clone(),
                    skill_version: identity.version.clone(),
                    source_path: source.to_string(),
                })
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a AdapterRegistry {
    type Item = &'a AdapterTarget;
    type IntoIter = std::slice::Iter<'a, AdapterTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_lists_nine_targets_in_order() {
        let registry = AdapterRegistry::builtin();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.targets[0].path, PathBuf::from("AGENTS.md"));

        let full: Vec<_> = registry
            .iter()
            .filter(|t| t.mode == FullResync)
            .map(|t| t.adapter_id.as_str())
            .collect();
        assert_eq!(full, vec!["antigravity-skill", "antigravity-skill-pro"]);

        let secondary = registry.iter().filter(|t| t.tracks == Secondary).count();
        assert_eq!(secondary, 2);
        assert!(registry.tracks_secondary());
    }

    #[test]
    fn parses_registry_file() {
        let text = r#"
[[target]]
path = "docs/TOOL.md"
mode = "field_update"
adapter_id = "tool"
adapter_format = "Tool context"

[[target]]
path = "skills/pro/SKILL.md"
mode = "full_resync"
tracks = "secondary"
adapter_id = "tool-pro"
adapter_format = "Tool skill"
"#;
        let registry = AdapterRegistry::from_toml_str(text).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.targets[0].tracks, Primary);
        assert_eq!(registry.targets[1].mode, FullResync);
        assert_eq!(registry.targets[1].tracks, Secondary);

        let primary_only = AdapterRegistry::new(registry.targets[..1].to_vec());
        assert!(!primary_only.tracks_secondary());
    }

    #[test]
    fn rejects_empty_and_duplicate_registries() {
        assert!(matches!(
            AdapterRegistry::from_toml_str(""),
            Err(RegistryError::Empty)
        ));

        let dup = r#"
[[target]]
path = "A.md"
mode = "field_update"
adapter_id = "a"
adapter_format = "A"

[[target]]
path = "A.md"
mode = "full_resync"
adapter_id = "b"
adapter_format = "B"
"#;
        assert!(matches!(
            AdapterRegistry::from_toml_str(dup),
            Err(RegistryError::DuplicatePath(_))
        ));
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        let text = "[[target]]\npath = \"A.md\"\nmode = \"append\"\nadapter_id = \"a\"\nadapter_format = \"A\"\n";
        assert!(matches!(
            AdapterRegistry::from_toml_str(text),
            Err(RegistryError::Toml(_))
        ));
    }

    #[test]
    fn global_targets_live_under_home() {
        let registry =
            AdapterRegistry::builtin().with_global_targets(Path::new("/home/u"), "humanizer");
        assert_eq!(registry.len(), 16);
        let claude = registry
            .iter()
            .find(|t| t.adapter_id == "claude-global")
            .unwrap();
        assert_eq!(
            claude.path,
            PathBuf::from("/home/u/.claude/skills/humanizer/SKILL.md")
        );
        assert_eq!(claude.mode, FullResync);
    }

    #[test]
    fn expectations_follow_tracked_identity() {
        let primary = SkillIdentity::new("humanizer", "1.2.3");
        let pro = SkillIdentity::new("humanizer-pro", "2.3.4");
        let registry = AdapterRegistry::builtin();

        let all = registry.expectations(
            (&primary, "SKILL.md"),
            Some((&pro, "SKILL_PROFESSIONAL.md")),
        );
        assert_eq!(all.len(), 9);
        let gemini_pro = all
            .iter()
            .find(|e| e.path.ends_with("GEMINI_PRO.md"))
            .unwrap();
        assert_eq!(gemini_pro.skill_version, "2.3.4");
        assert_eq!(gemini_pro.source_path, "SKILL_PROFESSIONAL.md");

        let primary_only = registry.expectations((&primary, "SKILL.md"), None);
        assert_eq!(primary_only.len(), 7);
    }
}
