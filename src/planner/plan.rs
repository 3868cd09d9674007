//! Plan construction.
//!
//! The planner runs one group through the full pipeline:
//! flatten + filter, rank sort, dedup, dependency expansion. The result
//! is a [`DeploymentPlan`]: the exact ordered list of resources a
//! lifecycle run will walk.

use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::group::ResourceGroup;
use crate::resource::{InfraTarget, ResourceSpec, SortOrder};

use super::flatten::{flatten_group, PlanFilters};

/// An ordered execution plan for one resource group.
#[derive(Debug)]
pub struct DeploymentPlan {
    /// When the plan was created.
    pub created_at: DateTime<Utc>,
    /// Name of the group the plan was built from.
    pub group_name: String,
    /// Environment the plan targets.
    pub env: Option<String>,
    /// Infrastructure target the plan applies to.
    pub infra: InfraTarget,
    /// Direction the plan was built for.
    pub sort_order: SortOrder,
    /// Resources in execution order.
    pub resources: Vec<ResourceSpec>,
}

impl DeploymentPlan {
    /// Returns true if the plan has no resources.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Returns the number of planned resources.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.resources.len()
    }
}

impl std::fmt::Display for DeploymentPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.resources.is_empty() {
            return write!(f, "No matching resources");
        }

        writeln!(
            f,
            "{} plan for '{}' ({} resources):",
            self.sort_order,
            self.group_name,
            self.resources.len()
        )?;
        for resource in &self.resources {
            writeln!(f, "  -+-> {resource}")?;
        }
        Ok(())
    }
}

/// Builds deployment plans from resource groups.
#[derive(Debug, Default)]
pub struct Planner;

impl Planner {
    /// Creates a new planner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs one group through flatten, rank sort, dedup, and dependency
    /// expansion.
    ///
    /// # Errors
    ///
    /// Returns an error if an App's builder fails.
    pub fn plan_group(
        &self,
        group: &mut ResourceGroup,
        filters: &PlanFilters,
        order: SortOrder,
        workspace_root: Option<&Path>,
    ) -> Result<DeploymentPlan> {
        debug!("Planning {} for {}", group.name, order);

        let mut ctx = group.build_context();
        if let Some(root) = workspace_root {
            ctx = ctx.with_workspace_root(root);
        }

        let mut ranked = flatten_group(group, filters, &ctx)?;

        // Stable sort: ties keep flatten encounter order.
        match order {
            SortOrder::Create => ranked.sort_by_key(|r| r.weight),
            SortOrder::Delete => ranked.sort_by_key(|r| std::cmp::Reverse(r.weight)),
        }

        let sorted: Vec<ResourceSpec> = ranked.into_iter().map(|r| r.spec).collect();
        let deduped = super::expand::dedup_resources(sorted);
        let resources = super::expand::expand_dependencies(deduped, order);

        Ok(DeploymentPlan {
            created_at: Utc::now(),
            group_name: group.name.clone(),
            env: group.env.clone(),
            infra: group.infra,
            sort_order: order,
            resources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sg(name: &str) -> ResourceSpec {
        ResourceSpec::new("SecurityGroup", name)
    }

    /// Group from the canonical scenario: a standalone lb-sg and an
    /// app-sg that depends on it.
    fn scenario_group() -> ResourceGroup {
        let lb_sg = sg("lb-sg");
        let app_sg = sg("app-sg").with_depends_on(vec![lb_sg.clone()]);
        ResourceGroup::new("edge", InfraTarget::Aws).with_resources(vec![lb_sg, app_sg])
    }

    #[test]
    fn test_create_plan_orders_dependency_first() {
        let planner = Planner::new();
        let mut group = scenario_group();
        let plan = planner
            .plan_group(&mut group, &PlanFilters::default(), SortOrder::Create, None)
            .expect("plan failed");

        let names: Vec<&str> = plan.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["lb-sg", "app-sg"]);
    }

    #[test]
    fn test_delete_plan_pins_asymmetric_order() {
        let planner = Planner::new();
        let mut group = scenario_group();
        let plan = planner
            .plan_group(&mut group, &PlanFilters::default(), SortOrder::Delete, None)
            .expect("plan failed");

        // The teardown algorithm removes the already-placed dependency,
        // inserts the dependent, then re-appends the dependency.
        let names: Vec<&str> = plan.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["app-sg", "lb-sg"]);
    }

    #[test]
    fn test_dependency_pulled_in_despite_filters() {
        // Only app-sg is declared in the group; its dependency lb-sg is
        // pulled into the plan anyway.
        let lb_sg = sg("lb-sg");
        let app_sg = sg("app-sg").with_depends_on(vec![lb_sg]);
        let mut group = ResourceGroup::new("edge", InfraTarget::Aws).with_resources(vec![app_sg]);

        let planner = Planner::new();
        let plan = planner
            .plan_group(&mut group, &PlanFilters::default(), SortOrder::Create, None)
            .expect("plan failed");

        let names: Vec<&str> = plan.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["lb-sg", "app-sg"]);
    }

    #[test]
    fn test_rank_orders_types_without_dependencies() {
        let mut group = ResourceGroup::new("platform", InfraTarget::Aws).with_resources(vec![
            ResourceSpec::new("EcsService", "api"),
            ResourceSpec::new("EcsCluster", "main"),
            ResourceSpec::new("IamRole", "task-role"),
        ]);

        let planner = Planner::new();
        let plan = planner
            .plan_group(&mut group, &PlanFilters::default(), SortOrder::Create, None)
            .expect("plan failed");

        let types: Vec<&str> = plan
            .resources
            .iter()
            .map(|r| r.resource_type.as_str())
            .collect();
        assert_eq!(types, vec!["IamRole", "EcsCluster", "EcsService"]);
    }

    #[test]
    fn test_delete_reverses_rank_order() {
        let mut group = ResourceGroup::new("platform", InfraTarget::Aws).with_resources(vec![
            ResourceSpec::new("IamRole", "task-role"),
            ResourceSpec::new("EcsService", "api"),
        ]);

        let planner = Planner::new();
        let plan = planner
            .plan_group(&mut group, &PlanFilters::default(), SortOrder::Delete, None)
            .expect("plan failed");

        let types: Vec<&str> = plan
            .resources
            .iter()
            .map(|r| r.resource_type.as_str())
            .collect();
        assert_eq!(types, vec!["EcsService", "IamRole"]);
    }

    #[test]
    fn test_duplicate_identity_planned_once() {
        let mut group = ResourceGroup::new("edge", InfraTarget::Aws)
            .with_resources(vec![sg("lb-sg"), sg("lb-sg")]);

        let planner = Planner::new();
        let plan = planner
            .plan_group(&mut group, &PlanFilters::default(), SortOrder::Create, None)
            .expect("plan failed");
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let planner = Planner::new();
        let mut group = scenario_group();

        let first = planner
            .plan_group(&mut group, &PlanFilters::default(), SortOrder::Delete, None)
            .expect("plan failed");
        let second = planner
            .plan_group(&mut group, &PlanFilters::default(), SortOrder::Delete, None)
            .expect("plan failed");

        assert_eq!(first.resources, second.resources);
    }

    #[test]
    fn test_display_lists_resources() {
        let planner = Planner::new();
        let mut group = scenario_group();
        let plan = planner
            .plan_group(&mut group, &PlanFilters::default(), SortOrder::Create, None)
            .expect("plan failed");

        let rendered = plan.to_string();
        assert!(rendered.contains("SecurityGroup: lb-sg"));
        assert!(rendered.contains("SecurityGroup: app-sg"));
    }
}
