//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying plans and run
//! results, plus the console helpers the orchestrator uses for its plan
//! listing and confirmation prompt.

use colored::Colorize;
use std::fmt::Write as _;
use std::io::Write as _;
use tabled::{Table, Tabled};

use crate::config::ValidationResult;
use crate::planner::DeploymentPlan;
use crate::resource::SortOrder;

use super::commands::OutputFormat;

/// Prints a heading line.
pub fn print_heading(message: &str) {
    println!("{}", message.cyan().bold());
}

/// Prints an informational line.
pub fn print_info(message: &str) {
    println!("{message}");
}

/// Asks a yes/no question on the terminal; defaults to no.
#[must_use]
pub fn confirm_yes_no(question: &str) -> bool {
    print!("{question} [y/N]: ");
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Plan row for table display.
#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Type")]
    resource_type: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Group")]
    group: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a deployment plan for display.
    #[must_use]
    pub fn format_plan(&self, plan: &DeploymentPlan) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&PlanJson::from(plan)).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_plan_text(plan),
        }
    }

    /// Formats a plan as text.
    fn format_plan_text(plan: &DeploymentPlan) -> String {
        if plan.is_empty() {
            return format!("{} No matching resources.\n", "-".dimmed());
        }

        let mut output = String::new();
        let _ = writeln!(
            output,
            "\nPlan for '{}' ({}, {}):",
            plan.group_name,
            plan.infra,
            plan.env.as_deref().unwrap_or("all envs")
        );

        let action = match plan.sort_order {
            SortOrder::Create => "+create".green().to_string(),
            SortOrder::Delete => "-delete".red().to_string(),
        };

        let rows: Vec<PlanRow> = plan
            .resources
            .iter()
            .enumerate()
            .map(|(i, r)| PlanRow {
                index: i + 1,
                action: action.clone(),
                resource_type: r.resource_type.clone(),
                name: r.name.clone(),
                group: r.group_name().to_string(),
            })
            .collect();

        let table = Table::new(rows).to_string();
        output.push_str(&table);
        output.push('\n');

        let _ = writeln!(output, "\nTotal {} resources", plan.len());
        output
    }

    /// Formats a run summary line.
    #[must_use]
    pub fn format_summary(&self, operation: &str, succeeded: usize, attempted: usize) -> String {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "operation": operation,
                    "succeeded": succeeded,
                    "attempted": attempted,
                });
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => {
                let status = if succeeded == attempted {
                    format!("{succeeded}/{attempted}").green().to_string()
                } else {
                    format!("{succeeded}/{attempted}").red().to_string()
                };
                format!("# Resources {operation}d: {status}")
            }
        }
    }

    /// Formats a validation result.
    #[must_use]
    pub fn format_validation(&self, result: &ValidationResult, show_warnings: bool) -> String {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "errors": result
                        .errors
                        .iter()
                        .map(|e| serde_json::json!({"field": e.field, "message": e.message}))
                        .collect::<Vec<_>>(),
                    "warnings": result.warnings,
                });
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => {
                let mut output = String::new();
                if result.errors.is_empty() {
                    let _ = writeln!(output, "{} Workspace is valid.", "ok".green());
                } else {
                    for error in &result.errors {
                        let _ = writeln!(
                            output,
                            "{} {}: {}",
                            "error".red(),
                            error.field,
                            error.message
                        );
                    }
                }
                if show_warnings {
                    for warning in &result.warnings {
                        let _ = writeln!(output, "{} {warning}", "warning".yellow());
                    }
                }
                output
            }
        }
    }
}

// JSON serialization helpers

#[derive(serde::Serialize)]
struct PlanJson {
    group: String,
    env: Option<String>,
    infra: String,
    sort_order: String,
    resource_count: usize,
    resources: Vec<PlanResourceJson>,
}

#[derive(serde::Serialize)]
struct PlanResourceJson {
    resource_type: String,
    name: String,
    group: String,
}

impl From<&DeploymentPlan> for PlanJson {
    fn from(plan: &DeploymentPlan) -> Self {
        Self {
            group: plan.group_name.clone(),
            env: plan.env.clone(),
            infra: plan.infra.to_string(),
            sort_order: plan.sort_order.to_string(),
            resource_count: plan.len(),
            resources: plan
                .resources
                .iter()
                .map(|r| PlanResourceJson {
                    resource_type: r.resource_type.clone(),
                    name: r.name.clone(),
                    group: r.group_name().to_string(),
                })
                .collect(),
        }
    }
}
