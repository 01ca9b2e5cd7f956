//! Skill identity (name + version) extraction.

use crate::error::{HeaderField, MetadataError, ParseError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

// A line consisting only of `key: token`, token = [A-Za-z0-9_.-]+.
static NAME_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^name:[ \t]*([A-Za-z0-9_.-]+)$").expect("valid regex"));
static VERSION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^version:[ \t]*([A-Za-z0-9_.-]+)$").expect("valid regex"));

/// Versioned identity of a skill document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillIdentity {
    pub name: String,
    pub version: String,
}

impl SkillIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for SkillIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Parses the identity out of document text.
///
/// Lines are matched whole: `name: humanizer` counts, `the name: humanizer`
/// or `  name: humanizer` do not. Trailing whitespace (including a CR) is
/// ignored. The first matching line wins for each field.
pub fn parse_identity(text: &str) -> Result<SkillIdentity, ParseError> {
    let mut name = None;
    let mut version = None;

    for line in text.lines().map(str::trim_end) {
        if name.is_none() {
            name = capture_token(&NAME_LINE, line);
        }
        if version.is_none() {
            version = capture_token(&VERSION_LINE, line);
        }
        if name.is_some() && version.is_some() {
            break;
        }
    }

    let name = name.ok_or(ParseError {
        missing: HeaderField::Name,
    })?;
    let version = version.ok_or(ParseError {
        missing: HeaderField::Version,
    })?;
    Ok(SkillIdentity { name, version })
}

fn capture_token(pattern: &Regex, line: &str) -> Option<String> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Reads `path` and extracts its identity.
pub fn extract_identity(path: &Path) -> Result<SkillIdentity, MetadataError> {
    CanonicalDocument::load(path).map(|doc| doc.identity)
}

/// A canonical skill document read from disk together with its identity.
#[derive(Debug, Clone)]
pub struct CanonicalDocument {
    pub path: PathBuf,
    pub content: String,
    pub identity: SkillIdentity,
}

impl CanonicalDocument {
    /// Loads and parses a canonical document.
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                MetadataError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                MetadataError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let identity = parse_identity(&content).map_err(|source| MetadataError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), %identity, "resolved skill identity");

        Ok(Self {
            path: path.to_path_buf(),
            content,
            identity,
        })
    }

    /// File name of the document, used as `source_path` in adapter metadata.
    pub fn file_name(&self) -> String {
        source_file_name(&self.path)
    }
}

/// File name component of `path`, falling back to the full display form.
pub fn source_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_identity_reads_header_fields() {
        let text = "---\nname: humanizer\nversion: 1.2.3\ndescription: x\n---\n# Body";
        assert_eq!(
            parse_identity(text).unwrap(),
            SkillIdentity::new("humanizer", "1.2.3")
        );
    }

    #[test]
    fn parse_identity_works_without_header_block() {
        let text = "name: humanizer\nversion: 1.2.3\nSome content";
        assert_eq!(
            parse_identity(text).unwrap(),
            SkillIdentity::new("humanizer", "1.2.3")
        );
    }

    #[test]
    fn embedded_occurrences_do_not_count() {
        let text = "The name: humanizer is used\nversion: 2.0.0\n";
        let err = parse_identity(text).unwrap_err();
        assert_eq!(err.missing, HeaderField::Name);
    }

    #[test]
    fn indented_fields_do_not_count() {
        let text = "adapter_metadata:\n  name: nested\nname: top\nversion: 1.0\n";
        assert_eq!(parse_identity(text).unwrap().name, "top");

        let err = parse_identity("name: a\n  version: 1.0\n").unwrap_err();
        assert_eq!(err.missing, HeaderField::Version);
    }

    #[test]
    fn tokens_with_spaces_are_rejected() {
        let err = parse_identity("name: two words\nversion: 1\n").unwrap_err();
        assert_eq!(err.missing, HeaderField::Name);
    }

    #[test]
    fn crlf_and_trailing_whitespace_are_tolerated() {
        let text = "name: humanizer  \r\nversion:1.2.3-beta.1\r\n";
        assert_eq!(
            parse_identity(text).unwrap(),
            SkillIdentity::new("humanizer", "1.2.3-beta.1")
        );
    }

    #[test]
    fn first_occurrence_wins() {
        let text = "name: first\nversion: 1\nname: second\nversion: 2\n";
        assert_eq!(parse_identity(text).unwrap(), SkillIdentity::new("first", "1"));
    }

    #[test]
    fn missing_version_is_reported() {
        let err = parse_identity("name: humanizer\n").unwrap_err();
        assert_eq!(err.missing, HeaderField::Version);
    }

    #[test]
    fn source_file_name_uses_last_component() {
        assert_eq!(source_file_name(Path::new("/repo/SKILL.md")), "SKILL.md");
        assert_eq!(source_file_name(Path::new("SKILL.md")), "SKILL.md");
    }
}
