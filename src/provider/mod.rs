//! Provider trait definition.
//!
//! This module defines the common interface the orchestrator drives
//! resources through. One implementation exists per infrastructure target
//! (docker, kubernetes, aws); the concrete cloud/container API calls live
//! behind this seam and are out of scope for the engine itself.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::error::Result;
use crate::resource::{ActiveResource, ResourceSpec};

pub mod local;

pub use local::LocalStateProvider;

/// Trait for resource providers.
///
/// `read` is the only operation that may be polled repeatedly (by the
/// waiter); `create`/`update`/`delete` are invoked at most once per
/// resource per run.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// Creates the resource in the external system.
    ///
    /// Returns the realized representation on success.
    async fn create(&self, spec: &ResourceSpec) -> Result<ActiveResource>;

    /// Reads the resource from the external system.
    ///
    /// Returns `None` if the resource does not exist.
    async fn read(&self, spec: &ResourceSpec) -> Result<Option<ActiveResource>>;

    /// Updates the resource in the external system.
    ///
    /// Returns the realized representation after the update.
    async fn update(&self, spec: &ResourceSpec) -> Result<ActiveResource>;

    /// Deletes the resource from the external system.
    ///
    /// Returns true if something was deleted.
    async fn delete(&self, spec: &ResourceSpec) -> Result<bool>;

    /// Gets the provider type name.
    fn provider_type(&self) -> &'static str;
}

#[async_trait]
impl ResourceProvider for Box<dyn ResourceProvider> {
    async fn create(&self, spec: &ResourceSpec) -> Result<ActiveResource> {
        (**self).create(spec).await
    }

    async fn read(&self, spec: &ResourceSpec) -> Result<Option<ActiveResource>> {
        (**self).read(spec).await
    }

    async fn update(&self, spec: &ResourceSpec) -> Result<ActiveResource> {
        (**self).update(spec).await
    }

    async fn delete(&self, spec: &ResourceSpec) -> Result<bool> {
        (**self).delete(spec).await
    }

    fn provider_type(&self) -> &'static str {
        (**self).provider_type()
    }
}
