use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines through the logger.
    #[default]
    Text,
    /// JSON on stdout.
    Json,
}

/// Command-line interface for the `skillsync` application.
#[derive(Debug, Parser)]
#[command(
    name = "skillsync",
    version,
    about = "Keeps skill adapters in sync with the canonical SKILL.md"
)]
pub struct Cli {
    #[command(flatten)]
    pub repo: RepoArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the canonical documents and adapters live.
#[derive(Debug, Clone, Args)]
pub struct RepoArgs {
    /// Repository root; relative paths resolve against it (default: current directory).
    #[arg(long, global = true, env = "SKILLSYNC_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,
    /// Canonical skill document.
    #[arg(
        long,
        global = true,
        env = "SKILLSYNC_SOURCE",
        value_name = "PATH",
        default_value = "SKILL.md"
    )]
    pub source: PathBuf,
    /// Secondary skill document (default: SKILL_PROFESSIONAL.md, when present).
    #[arg(long, global = true, env = "SKILLSYNC_SECONDARY", value_name = "PATH")]
    pub secondary: Option<PathBuf>,
    /// Ignore the secondary document and every target tracking it.
    #[arg(long, global = true, default_value_t = false, conflicts_with = "secondary")]
    pub no_secondary: bool,
    /// TOML file replacing the built-in adapter registry.
    #[arg(long, global = true, env = "SKILLSYNC_REGISTRY", value_name = "FILE")]
    pub registry: Option<PathBuf>,
}

/// Available `skillsync` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Projects the canonical metadata into every registered adapter.
    Sync {
        /// Report what would change without writing anything.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        /// Also copy the skill into each tool's global skill directory under $HOME.
        #[arg(
            long,
            env = "SKILLSYNC_SYNC_GLOBAL",
            action = ArgAction::SetTrue,
            value_parser = FalseyValueParser::new()
        )]
        global: bool,
        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Checks that every adapter carries the canonical metadata.
    Validate {
        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Validates, then copies adapters into the locations each tool reads.
    Install {
        /// Skip the validation run.
        #[arg(long, default_value_t = false)]
        skip_validation: bool,
    },
}
