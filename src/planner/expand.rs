//! Deduplication and dependency expansion.
//!
//! After rank sorting, the pipeline removes identity duplicates and then
//! guarantees every resource's declared dependencies appear in the final
//! list in the correct relative position, even when a dependency was
//! never part of the flattened input (it belongs to another App or group
//! not matched by the filters).
//!
//! The create and delete paths are intentionally not symmetric. Creation
//! appends dependencies before their dependent. Deletion removes
//! already-placed dependencies, inserts the dependent, then re-appends
//! the dependencies in reversed declaration order, so a resource's own
//! dependencies are torn down after it in reverse order. Changing this
//! teardown ordering is a breaking change.

use tracing::debug;

use crate::resource::{ResourceSpec, SortOrder};

/// Removes identity duplicates, keeping the first occurrence.
#[must_use]
pub fn dedup_resources(resources: Vec<ResourceSpec>) -> Vec<ResourceSpec> {
    let mut deduped: Vec<ResourceSpec> = Vec::new();
    for resource in resources {
        if !deduped.contains(&resource) {
            deduped.push(resource);
        }
    }
    deduped
}

/// Expands dependencies into the final execution order.
///
/// Dependencies are taken as reversed *copies* on the delete path; the
/// specs' own `depends_on` lists are never mutated, so running the
/// pipeline twice over the same input yields the same output.
#[must_use]
pub fn expand_dependencies(resources: Vec<ResourceSpec>, order: SortOrder) -> Vec<ResourceSpec> {
    let mut result: Vec<ResourceSpec> = Vec::new();

    for resource in resources {
        if resource.depends_on.is_empty() {
            if !result.contains(&resource) {
                debug!("Adding {}", resource.name);
                result.push(resource);
            }
            continue;
        }

        match order {
            SortOrder::Delete => {
                // Dependents are removed first, then their dependencies in
                // reversed declaration order.
                let reversed_deps: Vec<ResourceSpec> =
                    resource.depends_on.iter().rev().cloned().collect();

                for dep in &reversed_deps {
                    if result.contains(dep) {
                        debug!("Removing {}, dependency of {}", dep.name, resource.name);
                        result.retain(|r| r != dep);
                    }
                }

                if !result.contains(&resource) {
                    debug!("Adding {}", resource.name);
                    result.push(resource.clone());
                }

                for dep in reversed_deps {
                    if !result.contains(&dep) {
                        debug!("Adding {}, dependency of {}", dep.name, resource.name);
                        result.push(dep);
                    }
                }
            }
            SortOrder::Create => {
                for dep in &resource.depends_on {
                    if !result.contains(dep) {
                        debug!("Adding {}, dependency of {}", dep.name, resource.name);
                        result.push(dep.clone());
                    }
                }

                if !result.contains(&resource) {
                    debug!("Adding {}", resource.name);
                    result.push(resource);
                }
            }
        }
    }

    result
}
