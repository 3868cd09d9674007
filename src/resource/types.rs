//! Core resource vocabulary: infrastructure targets, sort orders, identity.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

/// Infrastructure targets a resource group can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfraTarget {
    /// Local docker daemon.
    Docker,
    /// Kubernetes cluster.
    Kubernetes,
    /// AWS account.
    Aws,
}

impl InfraTarget {
    /// All targets in default creation order.
    ///
    /// Creation applies docker first and aws last; deletion walks the
    /// reverse of this list.
    pub const CREATE_ORDER: [Self; 3] = [Self::Docker, Self::Kubernetes, Self::Aws];

    /// Position of this target in the default creation order.
    #[must_use]
    pub fn create_order_index(self) -> usize {
        Self::CREATE_ORDER
            .iter()
            .position(|t| *t == self)
            .unwrap_or(usize::MAX)
    }
}

impl FromStr for InfraTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "docker" => Ok(Self::Docker),
            "kubernetes" | "k8s" => Ok(Self::Kubernetes),
            "aws" => Ok(Self::Aws),
            _ => Err(ConfigError::UnknownInfra {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for InfraTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Docker => "docker",
            Self::Kubernetes => "kubernetes",
            Self::Aws => "aws",
        };
        write!(f, "{s}")
    }
}

/// Direction a plan is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Install order: ranks ascending, dependencies before dependents.
    Create,
    /// Teardown order: ranks descending, dependents before dependencies.
    Delete,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Delete => "delete",
        };
        write!(f, "{s}")
    }
}

/// Identity of a resource: two resources are the same object iff both the
/// type and the name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    /// Resource type name, e.g. `EcsService`.
    pub resource_type: String,
    /// Resource name within its type.
    pub name: String,
}

impl ResourceId {
    /// Creates a new resource identity.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.name)
    }
}

/// The last-read representation of a resource in the external system.
///
/// This is a pure cache: it is only ever produced by a provider `read` (or
/// returned from `create`/`update`) and never feeds back into planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveResource {
    /// Resource type name.
    pub resource_type: String,
    /// Resource name.
    pub name: String,
    /// Realized attributes as reported by the external system.
    pub attributes: serde_json::Value,
}

impl ActiveResource {
    /// Creates a new active-resource snapshot.
    #[must_use]
    pub fn new(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        attributes: serde_json::Value,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            attributes,
        }
    }

    /// Looks up a top-level attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infra_target_from_str() {
        assert_eq!("docker".parse::<InfraTarget>().unwrap(), InfraTarget::Docker);
        assert_eq!("K8s".parse::<InfraTarget>().unwrap(), InfraTarget::Kubernetes);
        assert_eq!("AWS".parse::<InfraTarget>().unwrap(), InfraTarget::Aws);
        assert!("azure".parse::<InfraTarget>().is_err());
    }

    #[test]
    fn test_resource_id_equality() {
        let a = ResourceId::new("EcsCluster", "main");
        let b = ResourceId::new("EcsCluster", "main");
        let c = ResourceId::new("EcsService", "main");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
