//! Keys of the metadata block embedded in adapter documents.

pub const ADAPTER_METADATA: &str = "adapter_metadata";
pub const SKILL_NAME: &str = "skill_name";
pub const SKILL_VERSION: &str = "skill_version";
pub const LAST_SYNCED: &str = "last_synced";
pub const SOURCE_PATH: &str = "source_path";
pub const ADAPTER_ID: &str = "adapter_id";
pub const ADAPTER_FORMAT: &str = "adapter_format";

/// Indentation of fields nested under `adapter_metadata:`.
pub const NESTED_INDENT: &str = "  ";
