//! Workspace-level settings.
//!
//! These are the knobs that apply to a whole run rather than to a single
//! resource: the workspace root snapshots hang off, the process-wide force
//! default, and the continue-on-failure policy consulted between
//! resources.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings shared by every group in a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    /// Workspace name, used in summaries.
    #[serde(default = "default_workspace_name")]
    pub workspace_name: String,

    /// Root directory for snapshot output and local state.
    #[serde(default = "default_workspace_root")]
    pub workspace_root: PathBuf,

    /// Process-wide force default. A resource's own tri-state force flag
    /// and the per-run CLI option both take precedence over this.
    #[serde(default)]
    pub force: Option<bool>,

    /// Keep applying remaining resources after a create failure.
    #[serde(default)]
    pub continue_on_create_failure: bool,

    /// Keep applying remaining resources after an update failure.
    #[serde(default)]
    pub continue_on_update_failure: bool,

    /// Keep applying remaining resources after a delete failure.
    #[serde(default)]
    pub continue_on_delete_failure: bool,
}

fn default_workspace_name() -> String {
    String::from("workspace")
}

fn default_workspace_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            workspace_name: default_workspace_name(),
            workspace_root: default_workspace_root(),
            force: None,
            continue_on_create_failure: false,
            continue_on_update_failure: false,
            continue_on_delete_failure: false,
        }
    }
}

impl WorkspaceSettings {
    /// Creates settings with the given name and root.
    #[must_use]
    pub fn new(workspace_name: impl Into<String>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_name: workspace_name.into(),
            workspace_root: workspace_root.into(),
            ..Self::default()
        }
    }
}
