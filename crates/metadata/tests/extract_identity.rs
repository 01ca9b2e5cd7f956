//! Identity extraction from documents on disk.

use skillsync_metadata::{extract_identity, CanonicalDocument, HeaderField, MetadataError};
use std::fs;
use tempfile::tempdir;

#[test]
fn extracts_name_and_version_from_file() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("SKILL.md");
    fs::write(&path, "---\nname: humanizer\nversion: 1.2.3\n---\nSome content")?;

    let identity = extract_identity(&path)?;
    assert_eq!(identity.name, "humanizer");
    assert_eq!(identity.version, "1.2.3");
    Ok(())
}

#[test]
fn missing_file_is_not_found() {
    let tmp = tempdir().unwrap();
    let err = extract_identity(&tmp.path().join("nonexistent.md")).unwrap_err();

    assert!(err.is_not_found());
    assert!(!err.is_parse());
    assert!(err.to_string().contains("not found"));
}

#[test]
fn malformed_file_is_parse_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("SKILL_invalid.md");
    fs::write(&path, "no version here").unwrap();

    let err = extract_identity(&path).unwrap_err();
    match &err {
        MetadataError::Parse { source, .. } => assert_eq!(source.missing, HeaderField::Name),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert!(err
        .to_string()
        .starts_with("could not parse name/version from"));
}

#[test]
fn canonical_document_keeps_content_and_file_name() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("SKILL_PROFESSIONAL.md");
    fs::write(&path, "name: humanizer-pro\nversion: 2.3.4\nbody\n")?;

    let doc = CanonicalDocument::load(&path)?;
    assert_eq!(doc.file_name(), "SKILL_PROFESSIONAL.md");
    assert_eq!(doc.content, "name: humanizer-pro\nversion: 2.3.4\nbody\n");
    assert_eq!(doc.identity.name, "humanizer-pro");
    Ok(())
}
