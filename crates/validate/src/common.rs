//! Common types for adapter metadata validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Metadata an adapter file is expected to carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedMetadata {
    /// Adapter file, relative to the repository root (or absolute).
    pub path: PathBuf,
    pub skill_name: String,
    pub skill_version: String,
    /// File name of the canonical document the adapter tracks.
    pub source_path: String,
}

/// What is wrong with an adapter file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// The adapter file does not exist. No other check is attempted.
    MissingFile,
    /// The adapter file exists but could not be read as UTF-8 text.
    Unreadable { error: String },
    NameMismatch { expected: String },
    VersionMismatch { expected: String },
    /// No `last_synced: YYYY-MM-DD` line.
    MissingLastSynced,
    /// A `last_synced` line is present but is not a real calendar date.
    InvalidLastSynced { found: String },
    SourcePathMismatch { expected: String },
}

/// A single mismatch between an adapter and its canonical source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub path: PathBuf,
    #[serde(flatten)]
    pub kind: DiscrepancyKind,
}

impl Discrepancy {
    pub fn new(path: impl Into<PathBuf>, kind: DiscrepancyKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.kind {
            DiscrepancyKind::MissingFile => write!(f, "Missing adapter file: {path}"),
            DiscrepancyKind::NameMismatch { expected } => {
                write!(f, "{path}: skill_name mismatch (expected {expected})")
            }
            DiscrepancyKind::VersionMismatch { expected } => {
                write!(f, "{path}: skill_version mismatch (expected {expected})")
            }
            DiscrepancyKind::Unreadable { error } => {
                write!(f, "{path}: unreadable adapter file ({error})")
            }
            DiscrepancyKind::MissingLastSynced => {
                write!(f, "{path}: missing or invalid last_synced")
            }
            DiscrepancyKind::InvalidLastSynced { found } => {
                write!(f, "{path}: invalid last_synced date ({found})")
            }
            DiscrepancyKind::SourcePathMismatch { expected } => {
                write!(f, "{path}: source_path mismatch (expected {expected})")
            }
        }
    }
}

/// Outcome of validating every adapter in one pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of adapter files examined.
    pub checked: usize,
    pub discrepancies: Vec<Discrepancy>,
}

impl ValidationReport {
    /// Returns true when no discrepancy was found.
    pub fn is_ok(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Human-readable line for every discrepancy, in discovery order.
    pub fn messages(&self) -> Vec<String> {
        self.discrepancies.iter().map(ToString::to_string).collect()
    }
}
