//! Resolution of command-line and environment settings into concrete paths.

use crate::cli::RepoArgs;
use anyhow::{Context, Result};
use skillsync_sync::AdapterRegistry;
use std::path::{Path, PathBuf};

/// Secondary document picked up when present and nothing else is configured.
pub const DEFAULT_SECONDARY: &str = "SKILL_PROFESSIONAL.md";

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct RepoConfig {
    pub root: PathBuf,
    pub source: PathBuf,
    pub secondary: Option<PathBuf>,
    /// Registry file, when one replaced the built-in registry.
    pub registry_path: Option<PathBuf>,
    pub registry: AdapterRegistry,
}

impl RepoConfig {
    pub fn resolve(args: &RepoArgs) -> Result<Self> {
        let root = match &args.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("reading current directory")?,
        };
        let source = root.join(&args.source);

        // An explicit secondary must exist; the default one is optional.
        let secondary = if args.no_secondary {
            None
        } else if let Some(path) = &args.secondary {
            Some(root.join(path))
        } else {
            Some(root.join(DEFAULT_SECONDARY)).filter(|p| p.is_file())
        };

        let registry_path = args.registry.as_ref().map(|path| root.join(path));
        let registry = match &registry_path {
            Some(path) => {
                tracing::debug!("Loading adapter registry from {}", path.display());
                AdapterRegistry::load(path)?
            }
            None => AdapterRegistry::builtin(),
        };

        if secondary.is_none() && !args.no_secondary && registry.tracks_secondary() {
            tracing::warn!(
                "{DEFAULT_SECONDARY} not found; adapters tracking the secondary skill are not synced or validated"
            );
        }

        Ok(Self {
            root,
            source,
            secondary,
            registry_path,
            registry,
        })
    }

    pub fn secondary(&self) -> Option<&Path> {
        self.secondary.as_deref()
    }
}
