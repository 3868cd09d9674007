//! Local file-backed provider.
//!
//! Realizes resources as JSON state documents on the local filesystem.
//! Useful for development, for exercising plans end-to-end without cloud
//! credentials, and as the reference implementation of the provider
//! contract.

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{ProviderError, Result, StratusError};
use crate::resource::{ActiveResource, ResourceSpec};

use super::ResourceProvider;

/// Default state directory name.
const STATE_DIR: &str = ".stratus";

/// Local file-backed provider.
#[derive(Debug)]
pub struct LocalStateProvider {
    /// Base directory for state documents.
    base_dir: PathBuf,
}

impl LocalStateProvider {
    /// Creates a provider storing state under `.stratus/state` in the
    /// current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self> {
        let base_dir = std::env::current_dir()
            .map_err(|e| StratusError::internal(format!("Cannot determine current directory: {e}")))?
            .join(STATE_DIR)
            .join("state");

        Ok(Self::with_base_dir(base_dir))
    }

    /// Creates a provider with a custom base directory.
    #[must_use]
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the state document path for a resource.
    fn state_path(&self, spec: &ResourceSpec) -> PathBuf {
        self.base_dir
            .join(spec.resource_type.to_lowercase())
            .join(format!("{}.json", spec.name))
    }

    /// Builds the realized representation for a resource.
    fn realize(spec: &ResourceSpec) -> ActiveResource {
        let mut attributes = if spec.payload.is_object() {
            spec.payload.clone()
        } else {
            serde_json::json!({})
        };
        if let Some(map) = attributes.as_object_mut() {
            map.insert(
                String::from("last_applied_at"),
                serde_json::Value::String(Utc::now().to_rfc3339()),
            );
        }
        ActiveResource::new(&spec.resource_type, &spec.name, attributes)
    }

    /// Writes a state document through a temp file and atomic rename.
    async fn write_state(&self, path: &Path, active: &ActiveResource) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(active).map_err(|e| {
            StratusError::Provider(ProviderError::serialization(format!(
                "Failed to serialize state document: {e}"
            )))
        })?;

        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, path).await?;

        Ok(())
    }
}

#[async_trait]
impl ResourceProvider for LocalStateProvider {
    async fn create(&self, spec: &ResourceSpec) -> Result<ActiveResource> {
        let path = self.state_path(spec);
        let active = Self::realize(spec);
        self.write_state(&path, &active).await?;
        info!("Created {spec} at {}", path.display());
        Ok(active)
    }

    async fn read(&self, spec: &ResourceSpec) -> Result<Option<ActiveResource>> {
        let path = self.state_path(spec);
        if !path.exists() {
            debug!("No state document for {spec}");
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        let active: ActiveResource = serde_json::from_str(&content).map_err(|e| {
            StratusError::Provider(ProviderError::serialization(format!(
                "Failed to parse state document {}: {e}",
                path.display()
            )))
        })?;

        Ok(Some(active))
    }

    async fn update(&self, spec: &ResourceSpec) -> Result<ActiveResource> {
        let path = self.state_path(spec);
        let active = Self::realize(spec);
        self.write_state(&path, &active).await?;
        info!("Updated {spec} at {}", path.display());
        Ok(active)
    }

    async fn delete(&self, spec: &ResourceSpec) -> Result<bool> {
        let path = self.state_path(spec);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).await?;
        info!("Deleted {spec}");
        Ok(true)
    }

    fn provider_type(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_provider() -> (LocalStateProvider, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let provider = LocalStateProvider::with_base_dir(temp_dir.path());
        (provider, temp_dir)
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let (provider, _temp) = create_test_provider();
        let spec = ResourceSpec::new("Container", "web")
            .with_payload(serde_json::json!({"image": "nginx:1.27"}));

        provider.create(&spec).await.expect("create failed");

        let active = provider
            .read(&spec)
            .await
            .expect("read failed")
            .expect("resource should exist");
        assert_eq!(active.name, "web");
        assert_eq!(
            active.attribute("image"),
            Some(&serde_json::json!("nginx:1.27"))
        );
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let (provider, _temp) = create_test_provider();
        let spec = ResourceSpec::new("Container", "missing");

        let result = provider.read(&spec).await.expect("read failed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let (provider, _temp) = create_test_provider();
        let spec = ResourceSpec::new("Volume", "data");

        provider.create(&spec).await.expect("create failed");
        assert!(provider.delete(&spec).await.expect("delete failed"));
        assert!(!provider.delete(&spec).await.expect("delete failed"));
        assert!(provider.read(&spec).await.expect("read failed").is_none());
    }
}
