//! CLI command handlers for the skillsync application.

mod install;
mod sync;
mod validate;

pub(crate) use install::handle_install_command;
pub(crate) use sync::handle_sync_command;
pub(crate) use validate::handle_validate_command;
