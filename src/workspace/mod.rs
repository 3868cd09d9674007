//! Workspace configuration.
//!
//! A [`WorkspaceConfig`] owns the full declarative surface of one
//! workspace: shared settings plus every resource group across all
//! environments and infrastructure targets. Commands select the groups in
//! scope through [`WorkspaceConfig::resource_groups`].

use tracing::debug;

use crate::config::WorkspaceSettings;
use crate::group::ResourceGroup;
use crate::resource::{InfraTarget, SortOrder};

/// The declarative root object: settings plus resource groups.
#[derive(Debug, Default)]
pub struct WorkspaceConfig {
    /// Shared settings.
    pub settings: WorkspaceSettings,
    /// All groups, in declared order.
    pub groups: Vec<ResourceGroup>,
}

impl WorkspaceConfig {
    /// Creates an empty workspace with the given settings.
    #[must_use]
    pub const fn new(settings: WorkspaceSettings) -> Self {
        Self {
            settings,
            groups: Vec::new(),
        }
    }

    /// Adds a resource group.
    #[must_use]
    pub fn with_group(mut self, group: ResourceGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds a resource group in place.
    pub fn add_group(&mut self, group: ResourceGroup) {
        self.groups.push(group);
    }

    /// Returns the enabled groups matching the requested scope, ordered
    /// for the given direction.
    ///
    /// When no infra filter is given, creation visits docker groups
    /// first and aws groups last; deletion visits them in the reverse
    /// target order. Declared order is preserved within one target.
    pub fn resource_groups(
        &mut self,
        env: Option<&str>,
        infra: Option<InfraTarget>,
        order: SortOrder,
    ) -> Vec<&mut ResourceGroup> {
        debug!("Selecting groups for env: {env:?} | infra: {infra:?} | order: {order}");

        let mut selected: Vec<&mut ResourceGroup> = self
            .groups
            .iter_mut()
            .filter(|g| {
                if !g.enabled {
                    debug!("{} disabled", g.name);
                    return false;
                }
                g.matches_scope(env, infra)
            })
            .collect();

        match order {
            SortOrder::Create => {
                selected.sort_by_key(|g| g.infra.create_order_index());
            }
            SortOrder::Delete => {
                selected.sort_by_key(|g| std::cmp::Reverse(g.infra.create_order_index()));
            }
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_with_targets() -> WorkspaceConfig {
        WorkspaceConfig::new(WorkspaceSettings::default())
            .with_group(ResourceGroup::new("aws-main", InfraTarget::Aws).with_env("prd"))
            .with_group(ResourceGroup::new("docker-main", InfraTarget::Docker).with_env("dev"))
            .with_group(ResourceGroup::new("k8s-main", InfraTarget::Kubernetes).with_env("prd"))
    }

    #[test]
    fn test_create_order_is_docker_first() {
        let mut ws = workspace_with_targets();
        let groups = ws.resource_groups(None, None, SortOrder::Create);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["docker-main", "k8s-main", "aws-main"]);
    }

    #[test]
    fn test_delete_order_is_aws_first() {
        let mut ws = workspace_with_targets();
        let groups = ws.resource_groups(None, None, SortOrder::Delete);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["aws-main", "k8s-main", "docker-main"]);
    }

    #[test]
    fn test_env_filter() {
        let mut ws = workspace_with_targets();
        let groups = ws.resource_groups(Some("prd"), None, SortOrder::Create);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["k8s-main", "aws-main"]);
    }

    #[test]
    fn test_infra_filter() {
        let mut ws = workspace_with_targets();
        let groups = ws.resource_groups(None, Some(InfraTarget::Docker), SortOrder::Create);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "docker-main");
    }

    #[test]
    fn test_disabled_group_excluded() {
        let mut ws = WorkspaceConfig::new(WorkspaceSettings::default())
            .with_group(ResourceGroup::new("off", InfraTarget::Aws).with_enabled(false));
        assert!(ws.resource_groups(None, None, SortOrder::Create).is_empty());
    }
}
