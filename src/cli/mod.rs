//! CLI module for the Stratus deployment tool.
//!
//! This module provides the command-line interface for managing
//! workspace resources.

mod commands;
pub mod output;

pub use commands::{Cli, Commands, OutputFormat, ScopeArgs};
pub use output::OutputFormatter;
