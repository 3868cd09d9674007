//! Workspace file parser.
//!
//! This module loads the optional `stratus.yaml` workspace file: shared
//! settings plus resource groups made of standalone resources. Apps carry
//! code (a builder implementation) and are registered programmatically on
//! the resulting [`WorkspaceConfig`].

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ConfigError, Result, StratusError};
use crate::group::ResourceGroup;
use crate::resource::{InfraTarget, ResourceSpec, DEFAULT_GROUP_WEIGHT};
use crate::workspace::WorkspaceConfig;

use super::settings::WorkspaceSettings;

/// Default workspace file names to search for.
pub const DEFAULT_WORKSPACE_FILES: &[&str] = &[
    "stratus.yaml",
    "stratus.yml",
    "workspace.yaml",
    "workspace.yml",
];

/// On-disk shape of the workspace file.
#[derive(Debug, Deserialize)]
struct WorkspaceFile {
    #[serde(default)]
    settings: WorkspaceSettings,
    #[serde(default)]
    groups: Vec<ResourceGroupFile>,
}

/// On-disk shape of one resource group.
#[derive(Debug, Deserialize)]
struct ResourceGroupFile {
    name: String,
    #[serde(default)]
    env: Option<String>,
    infra: InfraTarget,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default = "default_weight")]
    weight: u32,
    #[serde(default)]
    resources: Vec<ResourceSpec>,
}

const fn default_enabled() -> bool {
    true
}

const fn default_weight() -> u32 {
    DEFAULT_GROUP_WEIGHT
}

impl ResourceGroupFile {
    fn into_group(self) -> ResourceGroup {
        let mut group = ResourceGroup::new(self.name, self.infra)
            .with_enabled(self.enabled)
            .with_weight(self.weight)
            .with_resources(self.resources);
        group.env = self.env;
        group
    }
}

/// Parser for workspace files.
#[derive(Debug, Default)]
pub struct WorkspaceParser {
    /// Base path for resolving relative paths.
    base_path: Option<std::path::PathBuf>,
}

impl WorkspaceParser {
    /// Creates a new workspace parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads a workspace from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<WorkspaceConfig> {
        let path = path.as_ref();
        info!("Loading workspace from: {}", path.display());

        if !path.exists() {
            return Err(StratusError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            StratusError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses a workspace from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<WorkspaceConfig> {
        debug!("Parsing YAML workspace");

        let file: WorkspaceFile = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            StratusError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        let mut workspace = WorkspaceConfig::new(file.settings);
        for group in file.groups {
            workspace.add_group(group.into_group());
        }

        debug!(
            "Loaded workspace '{}' with {} groups",
            workspace.settings.workspace_name,
            workspace.groups.len()
        );
        Ok(workspace)
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| std::path::PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                StratusError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Finds the workspace file in the given directory or its parents.
///
/// # Errors
///
/// Returns an error if no workspace file is found.
pub fn find_workspace_file(start_dir: impl AsRef<Path>) -> Result<std::path::PathBuf> {
    let start = start_dir.as_ref();
    let mut current = start.to_path_buf();

    loop {
        for filename in DEFAULT_WORKSPACE_FILES {
            let workspace_path = current.join(filename);
            if workspace_path.exists() {
                info!("Found workspace file: {}", workspace_path.display());
                return Ok(workspace_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    Err(StratusError::Config(ConfigError::FileNotFound {
        path: start.join(DEFAULT_WORKSPACE_FILES[0]),
    }))
}
