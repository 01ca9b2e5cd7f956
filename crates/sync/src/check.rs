//! Validation pass over the registry.
//!
//! Identities are re-read from the canonical documents here and compared
//! with what is on disk; nothing from the projector is reused.

use crate::registry::AdapterRegistry;
use skillsync_metadata::{extract_identity, source_file_name, MetadataError, SkillIdentity};
use skillsync_validate::{validate_adapters, ValidationReport};
use std::path::Path;

/// Validates every registered adapter under `root` against the canonical
/// document(s).
///
/// Identity extraction failures are returned as errors and no adapter is
/// checked. Discrepancies are collected in the report.
pub fn validate(
    root: &Path,
    registry: &AdapterRegistry,
    canonical: &Path,
    secondary: Option<&Path>,
) -> Result<(SkillIdentity, ValidationReport), MetadataError> {
    let primary = extract_identity(canonical)?;
    let secondary = secondary
        .map(|path| extract_identity(path).map(|id| (id, source_file_name(path))))
        .transpose()?;

    let primary_source = source_file_name(canonical);
    let expected = registry.expectations(
        (&primary, primary_source.as_str()),
        secondary.as_ref().map(|(id, source)| (id, source.as_str())),
    );
    let report = validate_adapters(root, &expected);
    Ok((primary, report))
}
