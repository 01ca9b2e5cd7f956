//! Skill identity extraction for skillsync.
//!
//! A canonical skill document carries its identity as two line-anchored
//! header fields:
//!
//! ```text
//! ---
//! name: humanizer
//! version: 1.2.3
//! ---
//! # Humanizer
//! ```
//!
//! This crate reads that identity and provides the header-splitting helpers
//! shared by the projector in `skillsync-sync`.
//!
//! # Example
//!
//! ```rust
//! use skillsync_metadata::parse_identity;
//!
//! let identity = parse_identity("---\nname: humanizer\nversion: 1.2.3\n---\nBody").unwrap();
//! assert_eq!(identity.name, "humanizer");
//! assert_eq!(identity.version, "1.2.3");
//! ```

#![deny(unsafe_code)]

pub mod dates;
pub mod error;
pub mod fields;
pub mod header;
pub mod identity;

pub use dates::{format_date, parse_date, today_utc};
pub use error::{HeaderField, MetadataError, ParseError};
pub use header::{normalize_line_endings, split_header, HEADER_MARKER};
pub use identity::{
    extract_identity, parse_identity, source_file_name, CanonicalDocument, SkillIdentity,
};

pub type Result<T> = std::result::Result<T, MetadataError>;
