//! Install-order ranking for resource types.
//!
//! Each infrastructure target carries a fixed, ordered table of resource
//! type names. A type's rank is its 1-based position in that table; types
//! not present receive [`DEFAULT_INSTALL_RANK`], guaranteeing known
//! infrastructure types always precede unknown ones. Ranks encode
//! conventional ordering dependencies (a role before a cluster, a subnet
//! group before a database instance) so that plans sort correctly by
//! default even without explicit dependency edges.

use super::types::InfraTarget;

/// Rank assigned to resource types absent from the install-order tables.
pub const DEFAULT_INSTALL_RANK: u32 = 5000;

/// Default resource-group weight. Effective install weight is
/// `group_weight * rank`, so weight 100 has no effect on relative order.
pub const DEFAULT_GROUP_WEIGHT: u32 = 100;

/// Canonical install order for docker resource types.
///
/// Networks and images exist before volumes and containers.
pub const DOCKER_INSTALL_ORDER: &[&str] = &["Network", "Image", "Volume", "Container"];

/// Canonical install order for kubernetes resource types.
///
/// Namespaces and service accounts are applied before workloads.
pub const KUBERNETES_INSTALL_ORDER: &[&str] = &[
    "Namespace",
    "ServiceAccount",
    "ClusterRole",
    "ClusterRoleBinding",
    "Secret",
    "ConfigMap",
    "StorageClass",
    "PersistentVolume",
    "PersistentVolumeClaim",
    "Service",
    "Deployment",
    "Ingress",
    "CustomResourceDefinition",
    "CustomObject",
];

/// Canonical install order for aws resource types.
pub const AWS_INSTALL_ORDER: &[&str] = &[
    "IamRole",
    "IamPolicy",
    "SecurityGroup",
    "Secret",
    "S3Bucket",
    "EbsVolume",
    "AcmCertificate",
    "CloudFormationStack",
    "GlueCrawler",
    "DbSubnetGroup",
    "DbCluster",
    "DbInstance",
    "CacheSubnetGroup",
    "CacheCluster",
    "LoadBalancer",
    "TargetGroup",
    "Listener",
    "EcsCluster",
    "EcsTaskDefinition",
    "EcsService",
];

/// Returns the install-order table for an infrastructure target.
#[must_use]
pub const fn install_order(infra: InfraTarget) -> &'static [&'static str] {
    match infra {
        InfraTarget::Docker => DOCKER_INSTALL_ORDER,
        InfraTarget::Kubernetes => KUBERNETES_INSTALL_ORDER,
        InfraTarget::Aws => AWS_INSTALL_ORDER,
    }
}

/// Returns the install rank for a resource type under an infrastructure
/// target.
#[must_use]
pub fn install_rank(infra: InfraTarget, resource_type: &str) -> u32 {
    install_order(infra)
        .iter()
        .position(|t| t.eq_ignore_ascii_case(resource_type))
        .map_or(DEFAULT_INSTALL_RANK, |pos| {
            u32::try_from(pos).unwrap_or(DEFAULT_INSTALL_RANK) + 1
        })
}

/// Returns the effective install weight: group weight times type rank.
///
/// Groups default to weight 100; a group with weight 11-99 installs before
/// all default-weight groups and a group with weight 101+ after them.
#[must_use]
pub fn install_weight(infra: InfraTarget, resource_type: &str, group_weight: u32) -> u64 {
    u64::from(group_weight) * u64::from(install_rank(infra, resource_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_rank_monotonicity() {
        let role = install_rank(InfraTarget::Aws, "IamRole");
        let cluster = install_rank(InfraTarget::Aws, "EcsCluster");
        let service = install_rank(InfraTarget::Aws, "EcsService");
        assert!(role < cluster);
        assert!(cluster < service);
    }

    #[test]
    fn test_unknown_type_sorts_last() {
        let known = install_rank(InfraTarget::Aws, "EcsService");
        let unknown = install_rank(InfraTarget::Aws, "QuantumAnnealer");
        assert_eq!(unknown, DEFAULT_INSTALL_RANK);
        assert!(known < unknown);
    }

    #[test]
    fn test_rank_is_case_insensitive() {
        assert_eq!(
            install_rank(InfraTarget::Aws, "iamrole"),
            install_rank(InfraTarget::Aws, "IamRole")
        );
    }

    #[test]
    fn test_docker_volume_before_container() {
        let volume = install_rank(InfraTarget::Docker, "Volume");
        let container = install_rank(InfraTarget::Docker, "Container");
        assert!(volume < container);
    }

    #[test]
    fn test_group_weight_scales_rank() {
        let default = install_weight(InfraTarget::Aws, "EcsService", DEFAULT_GROUP_WEIGHT);
        let early = install_weight(InfraTarget::Aws, "EcsService", 11);
        let late = install_weight(InfraTarget::Aws, "IamRole", 101_000);
        assert!(early < default);
        assert!(default < late);
    }
}
