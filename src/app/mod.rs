//! Declarative Apps.
//!
//! An [`App`] is a higher-level unit that expands into one or more
//! resources it did not declare explicitly (a "web service" App might
//! yield a load balancer, a target group, and a task definition). The
//! expansion itself is provided by a [`ResourceBuilder`] implementation;
//! the App owns the declarative surface: control flags, dependencies, and
//! the property-propagation rules that push those flags down onto every
//! resource it generates.

use std::path::PathBuf;

use crate::error::{PlanError, Result, StratusError};
use crate::resource::{InfraTarget, ResourceSpec};

/// Context handed to resource builders.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Environment the resources are being built for.
    pub env: Option<String>,
    /// Infrastructure target the resources are being built for.
    pub infra: InfraTarget,
    /// Workspace root directory.
    pub workspace_root: Option<PathBuf>,
}

impl BuildContext {
    /// Creates a new build context.
    #[must_use]
    pub const fn new(env: Option<String>, infra: InfraTarget) -> Self {
        Self {
            env,
            infra,
            workspace_root: None,
        }
    }

    /// Sets the workspace root.
    #[must_use]
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }
}

/// Contract for provider-specific App expansions.
///
/// Implementations must be pure other than reading the build context, and
/// may return `None` for "no resources".
pub trait ResourceBuilder: Send + Sync {
    /// Builds the resources this App expands into.
    ///
    /// # Errors
    ///
    /// Returns an error if the expansion cannot be computed.
    fn build_resources(&self, ctx: &BuildContext) -> Result<Option<Vec<ResourceSpec>>>;
}

/// A declarative unit that expands into resources.
pub struct App {
    /// App name (required).
    pub name: String,
    /// Logical group tag; defaults to `name`.
    pub group: Option<String>,
    /// Gates the App and everything it generates.
    pub enabled: bool,

    /// App-level control flags, propagated onto generated resources that
    /// did not set their own.
    pub skip_create: Option<bool>,
    /// See [`ResourceSpec::skip_read`].
    pub skip_read: Option<bool>,
    /// See [`ResourceSpec::skip_update`].
    pub skip_update: Option<bool>,
    /// See [`ResourceSpec::skip_delete`].
    pub skip_delete: Option<bool>,
    /// See [`ResourceSpec::recreate_on_update`].
    pub recreate_on_update: Option<bool>,
    /// See [`ResourceSpec::use_cache`].
    pub use_cache: Option<bool>,
    /// See [`ResourceSpec::force`].
    pub force: Option<bool>,
    /// See [`ResourceSpec::debug_mode`].
    pub debug_mode: Option<bool>,
    /// See [`ResourceSpec::save_output`].
    pub save_output: Option<bool>,
    /// See [`ResourceSpec::wait_for_create`].
    pub wait_for_create: Option<bool>,
    /// See [`ResourceSpec::wait_for_update`].
    pub wait_for_update: Option<bool>,
    /// See [`ResourceSpec::wait_for_delete`].
    pub wait_for_delete: Option<bool>,

    /// Dependencies inherited by every resource this App generates
    /// (appended to each resource's own list).
    pub depends_on: Vec<ResourceSpec>,

    /// Extra resources created before the App's built ones.
    pub resources: Vec<ResourceSpec>,

    /// The expansion implementation.
    builder: Box<dyn ResourceBuilder>,

    /// Memoized resource list; populated on the first `get_resources`
    /// call and never rebuilt.
    cached_resources: Option<Vec<ResourceSpec>>,
}

impl App {
    /// Creates a new App around a resource builder.
    #[must_use]
    pub fn new(name: impl Into<String>, builder: Box<dyn ResourceBuilder>) -> Self {
        Self {
            name: name.into(),
            group: None,
            enabled: true,
            skip_create: None,
            skip_read: None,
            skip_update: None,
            skip_delete: None,
            recreate_on_update: None,
            use_cache: None,
            force: None,
            debug_mode: None,
            save_output: None,
            wait_for_create: None,
            wait_for_update: None,
            wait_for_delete: None,
            depends_on: Vec::new(),
            resources: Vec::new(),
            builder,
            cached_resources: None,
        }
    }

    /// Sets the group tag.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the dependency list.
    #[must_use]
    pub fn with_depends_on(mut self, depends_on: Vec<ResourceSpec>) -> Self {
        self.depends_on = depends_on;
        self
    }

    /// Sets the extra resources created before the App's built ones.
    #[must_use]
    pub fn with_resources(mut self, resources: Vec<ResourceSpec>) -> Self {
        self.resources = resources;
        self
    }

    /// Sets the skip_delete flag explicitly.
    #[must_use]
    pub const fn with_skip_delete(mut self, skip_delete: bool) -> Self {
        self.skip_delete = Some(skip_delete);
        self
    }

    /// Sets the save_output flag explicitly.
    #[must_use]
    pub const fn with_save_output(mut self, save_output: bool) -> Self {
        self.save_output = Some(save_output);
        self
    }

    /// Returns the group tag, defaulting to the App name.
    #[must_use]
    pub fn group_name(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.name)
    }

    /// Checks the App against a group filter.
    #[must_use]
    pub fn matches_group_filter(&self, group_filter: Option<&str>) -> bool {
        group_filter.is_none_or(|f| {
            self.group_name()
                .to_lowercase()
                .contains(&f.to_lowercase())
        })
    }

    /// Whether this App participates in a create run.
    #[must_use]
    pub fn should_create(&self, group_filter: Option<&str>) -> bool {
        if !self.enabled || self.skip_create.unwrap_or(false) {
            return false;
        }
        self.matches_group_filter(group_filter)
    }

    /// Whether this App participates in an update run.
    #[must_use]
    pub fn should_update(&self, group_filter: Option<&str>) -> bool {
        if !self.enabled || self.skip_update.unwrap_or(false) {
            return false;
        }
        self.matches_group_filter(group_filter)
    }

    /// Whether this App participates in a delete run.
    #[must_use]
    pub fn should_delete(&self, group_filter: Option<&str>) -> bool {
        if !self.enabled || self.skip_delete.unwrap_or(false) {
            return false;
        }
        self.matches_group_filter(group_filter)
    }

    /// Returns this App's resources, building and propagating properties
    /// on first call. Subsequent calls return the memoized list and never
    /// rebuild.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder fails.
    pub fn get_resources(&mut self, ctx: &BuildContext) -> Result<Vec<ResourceSpec>> {
        if let Some(cached) = &self.cached_resources {
            return Ok(cached.clone());
        }

        let mut resources = self.resources.clone();
        let built = self.builder.build_resources(ctx).map_err(|e| {
            StratusError::Plan(PlanError::BuildFailed {
                app: self.name.clone(),
                message: e.to_string(),
            })
        })?;
        if let Some(built) = built {
            resources.extend(built);
        }

        self.propagate_properties(&mut resources);

        self.cached_resources = Some(resources.clone());
        Ok(resources)
    }

    /// Pushes App-level flags down onto each generated resource, without
    /// overriding anything the resource set explicitly.
    fn propagate_properties(&self, resources: &mut [ResourceSpec]) {
        fn inherit(field: &mut Option<bool>, app_value: Option<bool>) {
            if field.is_none() && app_value.is_some() {
                *field = app_value;
            }
        }

        for resource in resources.iter_mut() {
            inherit(&mut resource.skip_create, self.skip_create);
            inherit(&mut resource.skip_read, self.skip_read);
            inherit(&mut resource.skip_update, self.skip_update);
            inherit(&mut resource.skip_delete, self.skip_delete);
            inherit(&mut resource.recreate_on_update, self.recreate_on_update);
            inherit(&mut resource.use_cache, self.use_cache);
            inherit(&mut resource.force, self.force);
            inherit(&mut resource.debug_mode, self.debug_mode);
            inherit(&mut resource.wait_for_create, self.wait_for_create);
            inherit(&mut resource.wait_for_update, self.wait_for_update);
            inherit(&mut resource.wait_for_delete, self.wait_for_delete);
            inherit(&mut resource.save_output, self.save_output);

            resource.output_dir = Some(self.name.clone());
            if resource.group.is_none() {
                resource.group = Some(self.group_name().to_string());
            }

            if !self.depends_on.is_empty() {
                resource.depends_on.extend(self.depends_on.iter().cloned());
            }
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("enabled", &self.enabled)
            .field("resources", &self.resources.len())
            .field(
                "cached_resources",
                &self.cached_resources.as_ref().map(Vec::len),
            )
            .finish_non_exhaustive()
    }
}
