//! Workspace validation.
//!
//! This module checks a workspace before any resource is touched:
//! duplicate names, duplicate resource identities within a group, and
//! degenerate waiter parameters are configuration errors and abort the
//! command.

use std::collections::HashSet;
use tracing::debug;

use crate::error::{ConfigError, Result, StratusError};
use crate::group::ResourceGroup;
use crate::resource::{install_rank, ResourceSpec, DEFAULT_INSTALL_RANK};
use crate::workspace::WorkspaceConfig;

/// Validator for workspace configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator;

/// Validation result containing all findings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ConfigValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a workspace configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error if any check fails.
    pub fn validate(&self, workspace: &WorkspaceConfig) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();

        if workspace.groups.is_empty() {
            result
                .warnings
                .push(String::from("No resource groups defined in workspace"));
        }

        let mut seen_group_names: HashSet<&str> = HashSet::new();
        for (i, group) in workspace.groups.iter().enumerate() {
            let prefix = format!("groups[{i}]");

            if group.name.is_empty() {
                result.errors.push(ValidationError {
                    field: format!("{prefix}.name"),
                    message: String::from("Group name cannot be empty"),
                });
            } else if !seen_group_names.insert(&group.name) {
                result.errors.push(ValidationError {
                    field: format!("{prefix}.name"),
                    message: format!("Duplicate group name: {}", group.name),
                });
            }

            Self::validate_group(group, &prefix, &mut result);
        }

        if result.errors.is_empty() {
            debug!("Workspace validation passed");
            Ok(result)
        } else {
            let first_error = &result.errors[0];
            Err(StratusError::Config(ConfigError::ValidationError {
                message: first_error.message.clone(),
                field: Some(first_error.field.clone()),
            }))
        }
    }

    /// Validates one resource group.
    fn validate_group(group: &ResourceGroup, prefix: &str, result: &mut ValidationResult) {
        if group.apps.is_empty() && group.resources.is_empty() {
            result
                .warnings
                .push(format!("Group '{}' has no apps or resources", group.name));
        }

        if group.weight == 0 {
            result.errors.push(ValidationError {
                field: format!("{prefix}.weight"),
                message: String::from("Group weight must be positive"),
            });
        }

        let mut seen_ids = HashSet::new();
        for (j, resource) in group.resources.iter().enumerate() {
            let field = format!("{prefix}.resources[{j}]");

            if !seen_ids.insert(resource.id()) {
                result.errors.push(ValidationError {
                    field: field.clone(),
                    message: format!("Duplicate resource identity: {}", resource.id()),
                });
            }

            Self::validate_resource(resource, group, &field, result);
        }
    }

    /// Validates one resource specification.
    fn validate_resource(
        resource: &ResourceSpec,
        group: &ResourceGroup,
        field: &str,
        result: &mut ValidationResult,
    ) {
        if resource.name.is_empty() {
            result.errors.push(ValidationError {
                field: format!("{field}.name"),
                message: String::from("Resource name cannot be empty"),
            });
        }

        if resource.resource_type.is_empty() {
            result.errors.push(ValidationError {
                field: format!("{field}.resource_type"),
                message: String::from("Resource type cannot be empty"),
            });
        } else if install_rank(group.infra, &resource.resource_type) == DEFAULT_INSTALL_RANK {
            result.warnings.push(format!(
                "Resource type '{}' is not in the {} install-order table; it will sort last",
                resource.resource_type, group.infra
            ));
        }

        if resource.waiter_delay == 0 {
            result.errors.push(ValidationError {
                field: format!("{field}.waiter_delay"),
                message: String::from("Waiter delay must be positive"),
            });
        }

        if resource.waiter_max_attempts == 0 {
            result.errors.push(ValidationError {
                field: format!("{field}.waiter_max_attempts"),
                message: String::from("Waiter max attempts must be positive"),
            });
        }
    }
}
