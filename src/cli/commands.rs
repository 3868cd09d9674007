//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Stratus - declarative resource-graph deployment manager.
#[derive(Parser, Debug)]
#[command(name = "stratus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the workspace file.
    #[arg(short, long, global = true, env = "STRATUS_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Scope and filter arguments shared by the lifecycle commands.
#[derive(Args, Debug, Clone)]
pub struct ScopeArgs {
    /// Resource filter. Format - ENV:INFRA:GROUP:NAME:TYPE.
    pub filter: Option<String>,

    /// Filter the environment (dev, stg, prd).
    #[arg(short, long)]
    pub env: Option<String>,

    /// Filter the infrastructure target (docker, kubernetes, aws).
    #[arg(short, long)]
    pub infra: Option<String>,

    /// Filter resources by group name.
    #[arg(short, long)]
    pub group: Option<String>,

    /// Filter resources by name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Filter resources by type.
    #[arg(short = 't', long = "type")]
    pub resource_type: Option<String>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create resources for the workspace.
    Up {
        /// Scope and filters.
        #[command(flatten)]
        scope: ScopeArgs,

        /// Print resources and exit.
        #[arg(long)]
        dry_run: bool,

        /// Skip confirmation before creating resources.
        #[arg(short = 'y', long)]
        yes: bool,

        /// Force create resources where applicable.
        #[arg(short, long)]
        force: bool,
    },

    /// Delete resources for the workspace.
    Down {
        /// Scope and filters.
        #[command(flatten)]
        scope: ScopeArgs,

        /// Print resources and exit.
        #[arg(long)]
        dry_run: bool,

        /// Skip confirmation before deleting resources.
        #[arg(short = 'y', long)]
        yes: bool,

        /// Force delete resources where applicable.
        #[arg(short, long)]
        force: bool,
    },

    /// Update resources for the workspace.
    Patch {
        /// Scope and filters.
        #[command(flatten)]
        scope: ScopeArgs,

        /// Print resources and exit.
        #[arg(long)]
        dry_run: bool,

        /// Skip confirmation before updating resources.
        #[arg(short = 'y', long)]
        yes: bool,

        /// Force update resources where applicable.
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the workspace configuration.
    Validate {
        /// Show all warnings, not just errors.
        #[arg(long)]
        warnings: bool,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
