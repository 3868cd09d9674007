//! Resource groups.
//!
//! A [`ResourceGroup`] scopes Apps and standalone resources to one
//! (environment, infrastructure-target) pair. Groups are the unit the
//! planner flattens: candidates are enumerated explicitly (apps first, in
//! declared order, then standalone resources) through a typed method
//! rather than by field introspection.

use tracing::debug;

use crate::app::{App, BuildContext};
use crate::error::Result;
use crate::resource::{InfraTarget, ResourceSpec, DEFAULT_GROUP_WEIGHT};

/// Apps and standalone resources scoped to one (env, infra) pair.
#[derive(Debug)]
pub struct ResourceGroup {
    /// Group name; also the default group tag for its standalone
    /// resources.
    pub name: String,
    /// Environment this group belongs to (dev/stg/prd).
    pub env: Option<String>,
    /// Infrastructure target this group deploys to.
    pub infra: InfraTarget,
    /// Gates the entire group.
    pub enabled: bool,
    /// Install weight multiplier relative to other groups; 100 is
    /// neutral, 11-99 installs before default groups, 101+ after.
    pub weight: u32,
    /// Apps in declared order.
    pub apps: Vec<App>,
    /// Standalone resources in declared order.
    pub resources: Vec<ResourceSpec>,
}

impl ResourceGroup {
    /// Creates a new, enabled resource group.
    #[must_use]
    pub fn new(name: impl Into<String>, infra: InfraTarget) -> Self {
        Self {
            name: name.into(),
            env: None,
            infra,
            enabled: true,
            weight: DEFAULT_GROUP_WEIGHT,
            apps: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Sets the environment.
    #[must_use]
    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the install weight multiplier.
    #[must_use]
    pub const fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Adds Apps in declared order.
    #[must_use]
    pub fn with_apps(mut self, apps: Vec<App>) -> Self {
        self.apps = apps;
        self
    }

    /// Adds standalone resources in declared order.
    #[must_use]
    pub fn with_resources(mut self, resources: Vec<ResourceSpec>) -> Self {
        self.resources = resources;
        self
    }

    /// Whether this group matches the requested env/infra scope.
    #[must_use]
    pub fn matches_scope(&self, env: Option<&str>, infra: Option<InfraTarget>) -> bool {
        if let Some(env) = env {
            if self.env.as_deref() != Some(env) {
                return false;
            }
        }
        if let Some(infra) = infra {
            if self.infra != infra {
                return false;
            }
        }
        true
    }

    /// Whether this group matches a `--group` filter (case-insensitive
    /// substring against the group name).
    #[must_use]
    pub fn matches_group_filter(&self, group_filter: Option<&str>) -> bool {
        group_filter.is_none_or(|f| self.name.to_lowercase().contains(&f.to_lowercase()))
    }

    /// Returns the build context used to expand this group's Apps.
    #[must_use]
    pub fn build_context(&self) -> BuildContext {
        BuildContext::new(self.env.clone(), self.infra)
    }

    /// Enumerates candidate resources in encounter order: each enabled
    /// App's resources (built and memoized on first use), then standalone
    /// resources. Standalone resources with no group tag inherit the
    /// group's name. Disabled Apps contribute nothing; per-resource
    /// filtering is the planner's concern.
    ///
    /// # Errors
    ///
    /// Returns an error if an App's builder fails.
    pub fn candidate_resources(&mut self, ctx: &BuildContext) -> Result<Vec<ResourceSpec>> {
        let mut candidates: Vec<ResourceSpec> = Vec::new();

        for app in &mut self.apps {
            if !app.enabled {
                debug!("{} disabled", app.name);
                continue;
            }
            candidates.extend(app.get_resources(ctx)?);
        }

        for resource in &mut self.resources {
            if resource.group.is_none() {
                resource.group = Some(self.name.clone());
            }
            candidates.push(resource.clone());
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_scope() {
        let group = ResourceGroup::new("data-platform", InfraTarget::Aws).with_env("prd");

        assert!(group.matches_scope(None, None));
        assert!(group.matches_scope(Some("prd"), None));
        assert!(group.matches_scope(Some("prd"), Some(InfraTarget::Aws)));
        assert!(!group.matches_scope(Some("dev"), None));
        assert!(!group.matches_scope(None, Some(InfraTarget::Docker)));
    }

    #[test]
    fn test_group_filter_substring() {
        let group = ResourceGroup::new("data-platform", InfraTarget::Aws);
        assert!(group.matches_group_filter(None));
        assert!(group.matches_group_filter(Some("platform")));
        assert!(!group.matches_group_filter(Some("web")));
    }

    #[test]
    fn test_standalone_resources_inherit_group_name() {
        let mut group = ResourceGroup::new("edge", InfraTarget::Aws)
            .with_resources(vec![ResourceSpec::new("SecurityGroup", "lb-sg")]);

        let ctx = group.build_context();
        let candidates = group.candidate_resources(&ctx).expect("flatten failed");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].group.as_deref(), Some("edge"));
    }

    #[test]
    fn test_explicit_resource_group_kept() {
        let mut group = ResourceGroup::new("edge", InfraTarget::Aws).with_resources(vec![
            ResourceSpec::new("SecurityGroup", "lb-sg").with_group("custom"),
        ]);

        let ctx = group.build_context();
        let candidates = group.candidate_resources(&ctx).expect("flatten failed");
        assert_eq!(candidates[0].group.as_deref(), Some("custom"));
    }
}
