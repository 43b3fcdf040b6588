//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--config, --json, --verbose) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// smt-sync - apply SMT plugin settings to the daemon config and service
#[derive(Parser, Debug)]
#[command(name = "smt-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/smt-sync/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings submitted on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// JSON object with form fields ("-" reads stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Set one field (repeatable), e.g. --set logging_level=DEBUG
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Tick the enable_service checkbox
    #[arg(long, conflicts_with = "disable_service")]
    pub enable_service: bool,

    /// Clear the enable_service checkbox
    #[arg(long)]
    pub disable_service: bool,

    /// Start from the stored settings instead of an empty form
    #[arg(long)]
    pub from_store: bool,
}

impl InputArgs {
    /// No input source or override was given
    pub fn is_empty(&self) -> bool {
        self.input.is_none()
            && self.set.is_empty()
            && !self.enable_service
            && !self.disable_service
            && !self.from_store
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate, store and apply settings (config.yaml + service)
    Save {
        #[command(flatten)]
        input: InputArgs,

        /// Stream sync events as NDJSON on stdout
        #[arg(long)]
        events: bool,
    },

    /// Print the stored settings
    Show,

    /// Print the config.yaml the stored settings generate
    Render,

    /// Check whether config.yaml on disk matches the stored settings
    Status,

    /// Preview how a save would change config.yaml
    Diff {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Control the SMT service directly
    Service {
        #[arg(value_enum)]
        action: ServiceCommand,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCommand {
    Start,
    Stop,
    /// Start or stop according to the stored enable_service
    Apply,
}
