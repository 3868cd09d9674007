//! Persistence of realized-resource snapshots.
//!
//! After a successful create or update with `save_output` enabled, the
//! realized resource is serialized to
//! `<workspace>/<output_dir>/<resource_type>/<name>.json`. The same file is
//! the read path for attribute lookups used elsewhere in the toolkit, and
//! it is removed when the resource is deleted.

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{ProviderError, Result, StratusError};

use super::spec::ResourceSpec;
use super::types::ActiveResource;

/// Directory used for resources that never set an output dir.
const DEFAULT_OUTPUT_DIR: &str = "output";

/// File-based store for realized-resource snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    /// Workspace root all snapshot paths hang off.
    workspace_root: PathBuf,
}

impl SnapshotStore {
    /// Creates a snapshot store rooted at the given workspace directory.
    #[must_use]
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
        }
    }

    /// Returns the snapshot path for a resource.
    #[must_use]
    pub fn path_for(&self, spec: &ResourceSpec) -> PathBuf {
        let output_dir = spec.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR);
        self.workspace_root
            .join(output_dir)
            .join(spec.resource_type.to_lowercase())
            .join(format!("{}.json", spec.name))
    }

    /// Persists the realized resource, creating parent directories as
    /// needed. Writes go through a temporary file and an atomic rename.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, spec: &ResourceSpec, active: &ActiveResource) -> Result<PathBuf> {
        let path = self.path_for(spec);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(active).map_err(|e| {
            StratusError::Provider(ProviderError::serialization(format!(
                "Failed to serialize snapshot for {spec}: {e}"
            )))
        })?;

        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, &path).await?;

        debug!("Snapshot stored at: {}", path.display());
        Ok(path)
    }

    /// Loads the snapshot for a resource, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self, spec: &ResourceSpec) -> Result<Option<ActiveResource>> {
        let path = self.path_for(spec);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        let active: ActiveResource = serde_json::from_str(&content).map_err(|e| {
            StratusError::Provider(ProviderError::serialization(format!(
                "Failed to parse snapshot {}: {e}",
                path.display()
            )))
        })?;

        Ok(Some(active))
    }

    /// Looks up one top-level attribute from a resource's snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read.
    pub async fn attribute(
        &self,
        spec: &ResourceSpec,
        name: &str,
    ) -> Result<Option<serde_json::Value>> {
        Ok(self
            .load(spec)
            .await?
            .and_then(|active| active.attribute(name).cloned()))
    }

    /// Removes the snapshot for a resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub async fn delete(&self, spec: &ResourceSpec) -> Result<bool> {
        let path = self.path_for(spec);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).await?;
        debug!("Snapshot deleted: {}", path.display());
        Ok(true)
    }

    /// Returns the workspace root this store writes under.
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }
}
