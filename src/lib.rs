// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![forbid(unsafe_code)]               // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Stratus Deploy
//!
//! A declarative resource-graph build-and-apply engine for docker,
//! kubernetes, and aws targets.
//!
//! ## Overview
//!
//! Stratus takes a declarative set of Apps and Resources scoped to an
//! environment (dev/stg/prd) and an infrastructure target, expands each
//! App into its constituent resources, filters and deduplicates them,
//! computes a dependency-respecting execution order, and drives each
//! resource through a create/read/update/delete lifecycle with caching,
//! dry-run, and forced-recreation semantics.
//!
//! ## Architecture
//!
//! A run flows through four stages:
//!
//! 1. **Select**: the workspace picks the resource groups matching the
//!    requested (env, infra) scope
//! 2. **Plan**: each group is flattened, filtered, rank-sorted,
//!    deduplicated, and dependency-expanded into an ordered plan
//! 3. **Confirm**: the plan is shown for dry-run inspection or explicit
//!    confirmation
//! 4. **Apply**: the orchestrator walks the plan sequentially against a
//!    provider, honoring per-resource control flags and waiters
//!
//! ## Modules
//!
//! - [`resource`]: resource specifications, identity, install ranking
//! - [`app`]: declarative Apps and property propagation
//! - [`group`]: (env, infra)-scoped resource groups
//! - [`workspace`]: workspace configuration and group selection
//! - [`config`]: settings, workspace file parsing, validation, filters
//! - [`planner`]: flatten, rank, dedup, dependency expansion
//! - [`provider`]: the lifecycle seam to external systems
//! - [`orchestrator`]: sequential lifecycle application
//! - [`cli`]: command-line interface
//!
//! ## Example
//!
//! ```yaml
//! settings:
//!   workspace_name: data-platform
//!
//! groups:
//!   - name: edge
//!     env: prd
//!     infra: aws
//!     resources:
//!       - name: lb-sg
//!         resource_type: SecurityGroup
//!       - name: app-sg
//!         resource_type: SecurityGroup
//!         depends_on:
//!           - name: lb-sg
//!             resource_type: SecurityGroup
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod group;
pub mod orchestrator;
pub mod planner;
pub mod provider;
pub mod resource;
pub mod workspace;

// ============================================================================
// Re-exports
// ============================================================================

pub use app::{App, BuildContext, ResourceBuilder};
pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigValidator, TargetFilter, WorkspaceParser, WorkspaceSettings};
pub use error::{Result, StratusError};
pub use group::ResourceGroup;
pub use orchestrator::{OrchestrateOptions, Orchestrator};
pub use planner::{DeploymentPlan, PlanFilters, Planner};
pub use provider::{LocalStateProvider, ResourceProvider};
pub use resource::{
    ActiveResource, InfraTarget, ResourceId, ResourceSpec, SnapshotStore, SortOrder,
};
pub use workspace::WorkspaceConfig;
