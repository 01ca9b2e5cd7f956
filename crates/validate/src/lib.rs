//! Adapter metadata validation for skillsync.
//!
//! Checks that every adapter file still carries the identity of the
//! canonical document it was generated from. Findings are collected for the
//! whole pass and never short-circuit.
//!
//! # Example
//!
//! ```rust
//! use skillsync_validate::{check_content, ExpectedMetadata};
//! use std::path::Path;
//!
//! let expected = ExpectedMetadata {
//!     path: "GEMINI.md".into(),
//!     skill_name: "humanizer".into(),
//!     skill_version: "1.2.3".into(),
//!     source_path: "SKILL.md".into(),
//! };
//! let content = "skill_name: humanizer\nskill_version: 1.2.3\nlast_synced: 2026-01-31\nsource_path: SKILL.md\n";
//! assert!(check_content(Path::new("GEMINI.md"), content, &expected).is_empty());
//! ```

#![deny(unsafe_code)]

pub mod adapter;
pub mod common;

pub use adapter::{check_content, validate_adapter};
pub use common::{Discrepancy, DiscrepancyKind, ExpectedMetadata, ValidationReport};

use std::path::Path;

/// Validates every expected adapter under `root`.
pub fn validate_adapters(root: &Path, expected: &[ExpectedMetadata]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for entry in expected {
        let found = validate_adapter(root, entry);
        tracing::debug!(
            path = %entry.path.display(),
            discrepancies = found.len(),
            "validated adapter"
        );
        report.checked += 1;
        report.discrepancies.extend(found);
    }
    report
}
