//! Configuration module for the Stratus deployment engine.
//!
//! This module handles all configuration-related functionality:
//! - Workspace settings shared by every group
//! - Parsing and deserializing `stratus.yaml`
//! - Validation of workspace values
//! - Resource filter strings (`ENV:INFRA:GROUP:NAME:TYPE`)

mod filter;
mod parser;
mod settings;
mod validator;

pub use filter::TargetFilter;
pub use parser::{find_workspace_file, WorkspaceParser, DEFAULT_WORKSPACE_FILES};
pub use settings::WorkspaceSettings;
pub use validator::{ConfigValidator, ValidationError, ValidationResult};
