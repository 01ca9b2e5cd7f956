//! Adapter sync for skillsync.
//!
//! Projects the identity of a canonical skill document into every registered
//! adapter, either by copying the whole document with a fresh metadata block
//! or by rewriting version and date fields in place, and validates that the
//! adapters still agree with their source.
//!
//! # Examples
//!
//! ```
//! use skillsync_metadata::SkillIdentity;
//! use skillsync_sync::{field_update, full_resync, MetadataBlock};
//! use time::macros::date;
//!
//! let identity = SkillIdentity::new("humanizer", "1.2.3");
//! let today = date!(2026 - 01 - 31);
//!
//! let block = MetadataBlock::new(&identity, today, "SKILL.md", "qwen-cli", "Qwen CLI context");
//! let adapter = full_resync("# Humanizer\n", &block);
//! assert!(adapter.starts_with("---\nadapter_metadata:\n  skill_name: humanizer\n"));
//! assert_eq!(full_resync(&adapter, &block), adapter);
//!
//! let update = field_update("skill_version: 0.0.0\nlast_synced: 2000-01-01\n", "1.2.3", today);
//! assert_eq!(update.content, "skill_version: 1.2.3\nlast_synced: 2026-01-31\n");
//! ```

#![deny(unsafe_code)]

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub mod check;
pub mod install;
pub mod orchestrator;
pub mod projector;
pub mod registry;
pub mod report;

pub use check::validate;
pub use install::{install, InstallPlan, InstallReport, InstallStep};
pub use orchestrator::{SyncOrchestrator, SyncParams, SyncSources};
pub use projector::{field_update, full_resync, FieldUpdate, MetadataBlock};
pub use registry::{AdapterRegistry, AdapterTarget, ProjectionMode, RegistryError, TrackedIdentity};
pub use report::{SyncReport, TargetOutcome, TargetReport};
