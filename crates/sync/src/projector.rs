//! Projection of a skill identity into adapter documents.
//!
//! Two projections exist:
//! - [`full_resync`] copies the canonical document and merges a freshly
//!   rendered `adapter_metadata:` block into its header.
//! - [`field_update`] rewrites the `skill_version` and `last_synced` values of
//!   an adapter in place and leaves every other byte alone.

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use skillsync_metadata::fields::{
    ADAPTER_FORMAT, ADAPTER_ID, ADAPTER_METADATA, LAST_SYNCED, NESTED_INDENT, SKILL_NAME,
    SKILL_VERSION, SOURCE_PATH,
};
use skillsync_metadata::{format_date, normalize_line_endings, split_header, SkillIdentity};
use std::sync::LazyLock;
use time::Date;

static VERSION_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"skill_version:[^\r\n]*").expect("valid regex"));
static DATE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"last_synced:[^\r\n]*").expect("valid regex"));

/// Metadata embedded in a full-resync adapter.
///
/// Always rendered whole; a resync never edits individual fields of a
/// previous block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataBlock {
    pub skill_name: String,
    pub skill_version: String,
    pub last_synced: Date,
    /// File name of the canonical document.
    pub source_path: String,
    pub adapter_id: String,
    pub adapter_format: String,
}

impl MetadataBlock {
    pub fn new(
        identity: &SkillIdentity,
        today: Date,
        source_path: impl Into<String>,
        adapter_id: impl Into<String>,
        adapter_format: impl Into<String>,
    ) -> Self {
        Self {
            skill_name: identity.name.clone(),
            skill_version: identity.version.clone(),
            last_synced: today,
            source_path: source_path.into(),
            adapter_id: adapter_id.into(),
            adapter_format: adapter_format.into(),
        }
    }

    /// Renders the block without a trailing newline.
    pub fn render(&self) -> String {
        let last_synced = format_date(self.last_synced);
        let fields = [
            (SKILL_NAME, self.skill_name.as_str()),
            (SKILL_VERSION, self.skill_version.as_str()),
            (LAST_SYNCED, last_synced.as_str()),
            (SOURCE_PATH, self.source_path.as_str()),
            (ADAPTER_ID, self.adapter_id.as_str()),
            (ADAPTER_FORMAT, self.adapter_format.as_str()),
        ];
        let mut out = format!("{ADAPTER_METADATA}:");
        for (key, value) in fields {
            out.push('\n');
            out.push_str(NESTED_INDENT);
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
        }
        out
    }
}

/// Builds an adapter document from canonical `source_text`.
///
/// If the source opens with a header block, any `adapter_metadata:` block in
/// it is removed and `block` is appended to what remains; the body after the
/// closing marker is kept verbatim. Otherwise a header holding only `block`
/// is prepended, separated from the original content by a blank line.
///
/// The result always uses LF line endings. Applying the projection to its own
/// output with the same block returns that output unchanged.
pub fn full_resync(source_text: &str, block: &MetadataBlock) -> String {
    let source = normalize_line_endings(source_text);
    let rendered = block.render();

    match split_header(&source) {
        (Some(header), body) => {
            let kept = strip_adapter_metadata(header);
            let kept = kept.trim_end();
            if kept.is_empty() {
                format!("---\n{rendered}\n---\n{body}")
            } else {
                format!("---\n{kept}\n{rendered}\n---\n{body}")
            }
        }
        (None, body) => format!("---\n{rendered}\n---\n\n{body}"),
    }
}

/// Removes every `adapter_metadata:` key and the indented lines that follow it.
fn strip_adapter_metadata(header: &str) -> String {
    let mut kept = Vec::new();
    let mut in_block = false;

    for line in header.split('\n') {
        if is_metadata_key(line) {
            in_block = true;
            continue;
        }
        if in_block && line.starts_with([' ', '\t']) {
            continue;
        }
        in_block = false;
        kept.push(line);
    }

    kept.join("\n")
}

fn is_metadata_key(line: &str) -> bool {
    line.strip_prefix(ADAPTER_METADATA)
        .is_some_and(|rest| rest.starts_with(':'))
}

/// Result of a field update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub content: String,
    /// Number of `skill_version:` occurrences rewritten.
    pub version_hits: usize,
    /// Number of `last_synced:` occurrences rewritten.
    pub date_hits: usize,
}

impl FieldUpdate {
    /// True when both fields were found at least once.
    pub fn is_complete(&self) -> bool {
        self.version_hits > 0 && self.date_hits > 0
    }

    /// Names of the fields that were expected but not found.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.version_hits == 0 {
            missing.push(SKILL_VERSION);
        }
        if self.date_hits == 0 {
            missing.push(LAST_SYNCED);
        }
        missing
    }
}

/// Rewrites every `skill_version:` and `last_synced:` value in `destination_text`.
///
/// Each occurrence is replaced from the key to the end of its line; text
/// before the key (indentation, list markers) and the line ending itself are
/// preserved. Nothing else in the document changes.
pub fn field_update(destination_text: &str, version: &str, today: Date) -> FieldUpdate {
    let version_hits = VERSION_FIELD.find_iter(destination_text).count();
    let content = VERSION_FIELD.replace_all(
        destination_text,
        NoExpand(&format!("{SKILL_VERSION}: {version}")),
    );

    let date_hits = DATE_FIELD.find_iter(&content).count();
    let content = DATE_FIELD
        .replace_all(
            &content,
            NoExpand(&format!("{LAST_SYNCED}: {}", format_date(today))),
        )
        .into_owned();

    FieldUpdate {
        content,
        version_hits,
        date_hits,
    }
}
