//! Per-adapter metadata checks.
//!
//! Every check runs on its own: a wrong name does not stop the version,
//! date and source checks from being reported too.

use crate::common::{Discrepancy, DiscrepancyKind, ExpectedMetadata};
use regex::Regex;
use skillsync_metadata::fields::{SKILL_NAME, SKILL_VERSION, SOURCE_PATH};
use skillsync_metadata::parse_date;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

static LAST_SYNCED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*last_synced:[ \t]*([0-9]{4}-[0-9]{2}-[0-9]{2})$").expect("valid regex")
});

/// Validates the adapter at `root.join(expected.path)`.
///
/// Discrepancies are reported against `expected.path` as configured.
pub fn validate_adapter(root: &Path, expected: &ExpectedMetadata) -> Vec<Discrepancy> {
    let file = root.join(&expected.path);
    let content = match std::fs::read_to_string(&file) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return vec![Discrepancy::new(
                expected.path.clone(),
                DiscrepancyKind::MissingFile,
            )];
        }
        Err(err) => {
            tracing::debug!(path = %file.display(), error = %err, "adapter unreadable");
            return vec![Discrepancy::new(
                expected.path.clone(),
                DiscrepancyKind::Unreadable {
                    error: err.to_string(),
                },
            )];
        }
    };
    check_content(&expected.path, &content, expected)
}

/// Runs the four metadata checks against already-loaded content.
pub fn check_content(
    path: &Path,
    content: &str,
    expected: &ExpectedMetadata,
) -> Vec<Discrepancy> {
    let mut found = Vec::new();
    let mut push = |kind| found.push(Discrepancy::new(path, kind));

    if !has_field(content, SKILL_NAME, &expected.skill_name) {
        push(DiscrepancyKind::NameMismatch {
            expected: expected.skill_name.clone(),
        });
    }

    if !has_field(content, SKILL_VERSION, &expected.skill_version) {
        push(DiscrepancyKind::VersionMismatch {
            expected: expected.skill_version.clone(),
        });
    }

    match first_last_synced(content) {
        None => push(DiscrepancyKind::MissingLastSynced),
        Some(date) if parse_date(date).is_none() => push(DiscrepancyKind::InvalidLastSynced {
            found: date.to_string(),
        }),
        Some(_) => {}
    }

    if !has_field(content, SOURCE_PATH, &expected.source_path) {
        push(DiscrepancyKind::SourcePathMismatch {
            expected: expected.source_path.clone(),
        });
    }

    found
}

/// True when some line is exactly `key: value`, ignoring surrounding whitespace.
fn has_field(content: &str, key: &str, value: &str) -> bool {
    content.lines().any(|line| {
        line.trim()
            .strip_prefix(key)
            .and_then(|rest| rest.strip_prefix(':'))
            .is_some_and(|rest| rest.trim() == value)
    })
}

fn first_last_synced(content: &str) -> Option<&str> {
    content.lines().map(str::trim_end).find_map(|line| {
        LAST_SYNCED_LINE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    })
}
