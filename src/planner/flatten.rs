//! Flattening and filtering of resource groups.
//!
//! Turns one [`ResourceGroup`] into a flat list of resources matching the
//! caller-supplied filters, each tagged with its effective install
//! weight. Encounter order of the group's declared candidates is
//! preserved; deduplication happens later in the pipeline.

use tracing::debug;

use crate::app::BuildContext;
use crate::config::TargetFilter;
use crate::error::Result;
use crate::group::ResourceGroup;
use crate::resource::{install_weight, ResourceSpec};

/// The three per-resource filters a plan is narrowed by.
#[derive(Debug, Clone, Default)]
pub struct PlanFilters {
    /// Group filter (case-insensitive substring).
    pub group_filter: Option<String>,
    /// Resource name filter (case-insensitive substring).
    pub name_filter: Option<String>,
    /// Resource type filter (case-insensitive exact match).
    pub type_filter: Option<String>,
}

impl From<&TargetFilter> for PlanFilters {
    fn from(filter: &TargetFilter) -> Self {
        Self {
            group_filter: filter.group.clone(),
            name_filter: filter.name.clone(),
            type_filter: filter.resource_type.clone(),
        }
    }
}

/// A flattened resource together with its effective install weight.
#[derive(Debug, Clone)]
pub struct RankedResource {
    /// The resource specification.
    pub spec: ResourceSpec,
    /// Group weight times type rank; lower installs earlier.
    pub weight: u64,
}

/// Flattens one group into filtered resources in encounter order.
///
/// The group filter is applied against the group's own name *before*
/// flattening: a non-matching group contributes nothing. Disabled
/// resources are dropped; name and type filters are applied per resource.
///
/// # Errors
///
/// Returns an error if an App's builder fails.
pub fn flatten_group(
    group: &mut ResourceGroup,
    filters: &PlanFilters,
    ctx: &BuildContext,
) -> Result<Vec<RankedResource>> {
    if !group.enabled {
        debug!("Skipping {}: disabled", group.name);
        return Ok(Vec::new());
    }

    if !group.matches_group_filter(filters.group_filter.as_deref()) {
        debug!("Skipping {}: group filter", group.name);
        return Ok(Vec::new());
    }

    let infra = group.infra;
    let group_weight = group.weight;

    let mut flattened: Vec<RankedResource> = Vec::new();
    for spec in group.candidate_resources(ctx)? {
        if !spec.enabled {
            debug!("Skipping {spec}: disabled");
            continue;
        }

        if let Some(name_filter) = filters.name_filter.as_deref() {
            if !spec.name.to_lowercase().contains(&name_filter.to_lowercase()) {
                debug!("Skipping {spec}: name filter");
                continue;
            }
        }

        if let Some(type_filter) = filters.type_filter.as_deref() {
            if !spec.resource_type.eq_ignore_ascii_case(type_filter) {
                debug!("Skipping {spec}: type filter");
                continue;
            }
        }

        let weight = install_weight(infra, &spec.resource_type, group_weight);
        flattened.push(RankedResource { spec, weight });
    }

    Ok(flattened)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::InfraTarget;

    fn edge_group() -> ResourceGroup {
        ResourceGroup::new("edge", InfraTarget::Aws).with_resources(vec![
            ResourceSpec::new("SecurityGroup", "lb-sg"),
            ResourceSpec::new("SecurityGroup", "app-sg"),
            ResourceSpec::new("LoadBalancer", "main-lb"),
            ResourceSpec::new("TargetGroup", "disabled-tg").with_enabled(false),
        ])
    }

    #[test]
    fn test_flatten_preserves_encounter_order() {
        let mut group = edge_group();
        let ctx = group.build_context();
        let flattened =
            flatten_group(&mut group, &PlanFilters::default(), &ctx).expect("flatten failed");

        let names: Vec<&str> = flattened.iter().map(|r| r.spec.name.as_str()).collect();
        assert_eq!(names, vec!["lb-sg", "app-sg", "main-lb"]);
    }

    #[test]
    fn test_flatten_drops_disabled_resources() {
        let mut group = edge_group();
        let ctx = group.build_context();
        let flattened =
            flatten_group(&mut group, &PlanFilters::default(), &ctx).expect("flatten failed");
        assert!(flattened.iter().all(|r| r.spec.name != "disabled-tg"));
    }

    #[test]
    fn test_name_filter_substring() {
        let mut group = edge_group();
        let ctx = group.build_context();
        let filters = PlanFilters {
            name_filter: Some(String::from("SG")),
            ..PlanFilters::default()
        };
        let flattened = flatten_group(&mut group, &filters, &ctx).expect("flatten failed");
        let names: Vec<&str> = flattened.iter().map(|r| r.spec.name.as_str()).collect();
        assert_eq!(names, vec!["lb-sg", "app-sg"]);
    }

    #[test]
    fn test_type_filter_exact() {
        let mut group = edge_group();
        let ctx = group.build_context();
        let filters = PlanFilters {
            type_filter: Some(String::from("loadbalancer")),
            ..PlanFilters::default()
        };
        let flattened = flatten_group(&mut group, &filters, &ctx).expect("flatten failed");
        assert_eq!(flattened.len(), 1);
        assert_eq!(flattened[0].spec.name, "main-lb");
    }

    #[test]
    fn test_group_filter_skips_whole_group() {
        let mut group = edge_group();
        let ctx = group.build_context();
        let filters = PlanFilters {
            group_filter: Some(String::from("backend")),
            ..PlanFilters::default()
        };
        let flattened = flatten_group(&mut group, &filters, &ctx).expect("flatten failed");
        assert!(flattened.is_empty());
    }

    #[test]
    fn test_disabled_group_contributes_nothing() {
        let mut group = edge_group().with_enabled(false);
        let ctx = group.build_context();
        let flattened =
            flatten_group(&mut group, &PlanFilters::default(), &ctx).expect("flatten failed");
        assert!(flattened.is_empty());
    }

    #[test]
    fn test_weights_follow_install_order() {
        let mut group = edge_group();
        let ctx = group.build_context();
        let flattened =
            flatten_group(&mut group, &PlanFilters::default(), &ctx).expect("flatten failed");

        let sg_weight = flattened
            .iter()
            .find(|r| r.spec.name == "lb-sg")
            .map(|r| r.weight)
            .expect("missing lb-sg");
        let lb_weight = flattened
            .iter()
            .find(|r| r.spec.name == "main-lb")
            .map(|r| r.weight)
            .expect("missing main-lb");
        assert!(sg_weight < lb_weight);
    }
}
