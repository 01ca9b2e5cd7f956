//! Errors raised while resolving a skill identity.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Header field that identifies a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Name,
    Version,
}

impl HeaderField {
    /// The key as it appears in the document (`name`, `version`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Version => "version",
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A document was read but its identity could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing `{missing}:` header line")]
pub struct ParseError {
    pub missing: HeaderField,
}

/// Identity resolution failures. All of them are fatal for a run.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The canonical document does not exist.
    #[error("source file {} not found", path.display())]
    NotFound { path: PathBuf },

    /// The canonical document exists but lacks a parsable name or version.
    #[error("could not parse name/version from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Any other I/O failure while reading the document.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MetadataError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
