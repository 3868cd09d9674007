//! Planning module.
//!
//! This module turns declarative resource groups into ordered execution
//! plans: flatten + filter, install-rank sort, dedup, and dependency
//! expansion.

mod expand;
mod flatten;
mod plan;

pub use expand::{dedup_resources, expand_dependencies};
pub use flatten::{flatten_group, PlanFilters, RankedResource};
pub use plan::{DeploymentPlan, Planner};
