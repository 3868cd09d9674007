//! Lifecycle orchestrator.
//!
//! Walks a plan's ordered resource list and applies one of
//! create/update/delete to each, honoring control flags, the cache/force
//! short-circuit, and the bounded waiter. Resources are applied strictly
//! sequentially in list order; a per-resource failure is recorded and the
//! run continues or stops according to the workspace
//! `continue_on_*_failure` policy. The orchestrator returns
//! `(succeeded, attempted)` counts either way.

use std::time::Duration;
use tracing::{debug, error, warn};

use crate::cli::output::{confirm_yes_no, print_heading, print_info};
use crate::config::WorkspaceSettings;
use crate::error::{OrchestrateError, Result, StratusError};
use crate::provider::ResourceProvider;
use crate::resource::{ResourceSpec, SnapshotStore};

/// Per-run orchestration options.
#[derive(Debug, Clone, Default)]
pub struct OrchestrateOptions {
    /// Print the resolved plan and perform no provider calls.
    pub dry_run: bool,
    /// Skip the confirmation prompt.
    pub auto_confirm: bool,
    /// Per-run force override; a resource's own flag takes precedence.
    pub force: Option<bool>,
    /// Group filter applied through `should_*`.
    pub group_filter: Option<String>,
    /// Name filter applied through `should_*`.
    pub name_filter: Option<String>,
    /// Type filter applied through `should_*`.
    pub type_filter: Option<String>,
}

impl OrchestrateOptions {
    /// Creates default options (interactive, no filters).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets auto-confirm mode.
    #[must_use]
    pub const fn with_auto_confirm(mut self, auto_confirm: bool) -> Self {
        self.auto_confirm = auto_confirm;
        self
    }

    /// Sets the per-run force override.
    #[must_use]
    pub const fn with_force(mut self, force: Option<bool>) -> Self {
        self.force = force;
        self
    }

    /// Sets the group filter.
    #[must_use]
    pub fn with_group_filter(mut self, group_filter: impl Into<String>) -> Self {
        self.group_filter = Some(group_filter.into());
        self
    }
}

/// Drives resources through their lifecycle against one provider.
pub struct Orchestrator<'a, P: ResourceProvider> {
    /// Provider the lifecycle operations are issued against.
    provider: &'a P,
    /// Workspace settings (continuation policy, force default).
    settings: &'a WorkspaceSettings,
    /// Snapshot store for `save_output` resources.
    snapshots: SnapshotStore,
}

impl<'a, P: ResourceProvider> Orchestrator<'a, P> {
    /// Creates a new orchestrator.
    #[must_use]
    pub fn new(provider: &'a P, settings: &'a WorkspaceSettings) -> Self {
        let snapshots = SnapshotStore::new(settings.workspace_root.clone());
        Self {
            provider,
            settings,
            snapshots,
        }
    }

    /// Creates the resources in list order.
    ///
    /// Returns `(succeeded, attempted)`; dry runs and declined
    /// confirmations return `(0, 0)` without touching the provider.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures outside the per-resource
    /// lifecycle (per-resource failures are counted, not raised).
    pub async fn create_resources(
        &self,
        resources: &mut [ResourceSpec],
        opts: &OrchestrateOptions,
    ) -> Result<(usize, usize)> {
        let selected = Self::select(resources, opts, ResourceSpec::should_create);
        let attempted = selected.len();

        if attempted == 0 {
            print_info("No resources to create");
            return Ok((0, 0));
        }

        if !Self::preflight(resources, &selected, "create", opts) {
            return Ok((0, 0));
        }

        let mut succeeded = 0;
        for &i in &selected {
            let resource = &mut resources[i];
            print_info(&format!("\n-==+==- {resource}"));
            let force = self.resolve_force(resource, opts);
            let created = match self.create_one(resource, force).await {
                Ok(created) => created,
                Err(e) => {
                    error!("Error creating resource: {e}");
                    false
                }
            };

            if created {
                succeeded += 1;
            } else if !self.settings.continue_on_create_failure {
                break;
            }
        }

        print_heading(&format!("\n# Resources created: {succeeded}/{attempted}"));
        if succeeded != attempted {
            error!("Resources created: {succeeded} do not match resources required: {attempted}");
        }
        Ok((succeeded, attempted))
    }

    /// Updates the resources in list order.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures outside the per-resource
    /// lifecycle.
    pub async fn update_resources(
        &self,
        resources: &mut [ResourceSpec],
        opts: &OrchestrateOptions,
    ) -> Result<(usize, usize)> {
        let selected = Self::select(resources, opts, ResourceSpec::should_update);
        let attempted = selected.len();

        if attempted == 0 {
            print_info("No resources to update");
            return Ok((0, 0));
        }

        if !Self::preflight(resources, &selected, "update", opts) {
            return Ok((0, 0));
        }

        let mut succeeded = 0;
        for &i in &selected {
            let resource = &mut resources[i];
            print_info(&format!("\n-==+==- {resource}"));
            let force = self.resolve_force(resource, opts);
            let updated = match self.update_one(resource, force).await {
                Ok(updated) => updated,
                Err(e) => {
                    error!("Error updating resource: {e}");
                    false
                }
            };

            if updated {
                succeeded += 1;
            } else if !self.settings.continue_on_update_failure {
                break;
            }
        }

        print_heading(&format!("\n# Resources updated: {succeeded}/{attempted}"));
        if succeeded != attempted {
            error!("Resources updated: {succeeded} do not match resources required: {attempted}");
        }
        Ok((succeeded, attempted))
    }

    /// Deletes the resources in list order.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures outside the per-resource
    /// lifecycle.
    pub async fn delete_resources(
        &self,
        resources: &mut [ResourceSpec],
        opts: &OrchestrateOptions,
    ) -> Result<(usize, usize)> {
        let selected = Self::select(resources, opts, ResourceSpec::should_delete);
        let attempted = selected.len();

        if attempted == 0 {
            print_info("No resources to delete");
            return Ok((0, 0));
        }

        if !Self::preflight(resources, &selected, "delete", opts) {
            return Ok((0, 0));
        }

        let mut succeeded = 0;
        for &i in &selected {
            let resource = &mut resources[i];
            print_info(&format!("\n-==+==- {resource}"));
            let deleted = match self.delete_one(resource).await {
                Ok(deleted) => deleted,
                Err(e) => {
                    error!("Error deleting resource: {e}");
                    false
                }
            };

            if deleted {
                succeeded += 1;
            } else if !self.settings.continue_on_delete_failure {
                break;
            }
        }

        print_heading(&format!("\n# Resources deleted: {succeeded}/{attempted}"));
        if succeeded != attempted {
            error!("Resources deleted: {succeeded} do not match resources required: {attempted}");
        }
        Ok((succeeded, attempted))
    }

    /// Collects the indices of resources passing the `should_*` gate.
    fn select(
        resources: &[ResourceSpec],
        opts: &OrchestrateOptions,
        should: impl Fn(&ResourceSpec, Option<&str>, Option<&str>, Option<&str>) -> bool,
    ) -> Vec<usize> {
        resources
            .iter()
            .enumerate()
            .filter(|(_, r)| {
                should(
                    r,
                    opts.group_filter.as_deref(),
                    opts.name_filter.as_deref(),
                    opts.type_filter.as_deref(),
                )
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Prints the resolved plan and obtains confirmation. Returns false
    /// when the run should stop here (dry run or declined prompt).
    fn preflight(
        resources: &[ResourceSpec],
        selected: &[usize],
        operation: &str,
        opts: &OrchestrateOptions,
    ) -> bool {
        if opts.dry_run {
            print_heading(&format!("--**-- Resources to {operation}:"));
            for &i in selected {
                print_info(&format!("  -+-> {}", resources[i]));
            }
            print_info(&format!("\nTotal {} resources", selected.len()));
            return false;
        }

        if !opts.auto_confirm {
            print_heading(&format!("--**-- Confirm resources to {operation}:"));
            for &i in selected {
                print_info(&format!("  -+-> {}", resources[i]));
            }
            print_info(&format!("\nTotal {} resources", selected.len()));
            if !confirm_yes_no(&format!("\nConfirm {operation}")) {
                print_info(&format!("Skipping {operation}"));
                return false;
            }
        }

        true
    }

    /// Resolves the effective force flag: resource flag, then per-run
    /// option, then workspace default.
    fn resolve_force(&self, resource: &ResourceSpec, opts: &OrchestrateOptions) -> bool {
        resource
            .force
            .or(opts.force)
            .or(self.settings.force)
            .unwrap_or(false)
    }

    /// Creates one resource, honoring cache, force, waiter, and snapshot
    /// flags. Returns false on per-resource failure.
    async fn create_one(&self, spec: &mut ResourceSpec, force: bool) -> Result<bool> {
        if spec.skip_create.unwrap_or(false) {
            print_info(&format!("Skipping create: {}", spec.name));
            return Ok(true);
        }

        // With the cache enabled, an already-active resource short-circuits
        // creation; force bypasses the short-circuit entirely, and a
        // resource that refuses reads cannot be probed at all.
        if spec.use_cache.unwrap_or(true) && !force && !spec.skip_read.unwrap_or(false) {
            match self.provider.read(spec).await {
                Ok(Some(active)) => {
                    print_info(&format!("{spec} already exists"));
                    spec.active_resource = Some(active);
                    return Ok(true);
                }
                Ok(None) => {}
                Err(e) => warn!("Pre-create read failed for {spec}: {e}"),
            }
        }

        let active = match self.provider.create(spec).await {
            Ok(active) => active,
            Err(e) => {
                error!("Failed to create {spec}: {e}");
                return Ok(false);
            }
        };

        if spec.wait_for_create.unwrap_or(true) {
            if let Err(e) = self.wait_until_active(spec).await {
                error!("{e}");
                return Ok(false);
            }
        }

        spec.active_resource = Some(active);
        print_info(&format!("{spec} created"));

        if spec.save_output.unwrap_or(false) {
            if let Some(active) = &spec.active_resource {
                if let Err(e) = self.snapshots.save(spec, active).await {
                    error!("Could not write snapshot for {spec}: {e}");
                }
            }
        }

        Ok(true)
    }

    /// Updates one resource. A resource that does not exist in the
    /// external system is a no-op success; `recreate_on_update` realizes
    /// the update as delete followed by create.
    async fn update_one(&self, spec: &mut ResourceSpec, force: bool) -> Result<bool> {
        if spec.skip_update.unwrap_or(false) {
            print_info(&format!("Skipping update: {}", spec.name));
            return Ok(true);
        }

        if spec.recreate_on_update.unwrap_or(false) {
            debug!("Recreating {spec}");
            if !self.delete_one(spec).await? {
                return Ok(false);
            }
            return self.create_one(spec, force).await;
        }

        if !spec.skip_read.unwrap_or(false) {
            match self.provider.read(spec).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    print_info(&format!("{spec} does not exist"));
                    return Ok(true);
                }
                Err(e) => {
                    error!("Pre-update read failed for {spec}: {e}");
                    return Ok(false);
                }
            }
        }

        let active = match self.provider.update(spec).await {
            Ok(active) => active,
            Err(e) => {
                error!("Failed to update {spec}: {e}");
                return Ok(false);
            }
        };

        if spec.wait_for_update.unwrap_or(true) {
            if let Err(e) = self.wait_until_active(spec).await {
                error!("{e}");
                return Ok(false);
            }
        }

        spec.active_resource = Some(active);
        print_info(&format!("{spec} updated"));

        if spec.save_output.unwrap_or(false) {
            if let Some(active) = &spec.active_resource {
                if let Err(e) = self.snapshots.save(spec, active).await {
                    error!("Could not write snapshot for {spec}: {e}");
                }
            }
        }

        Ok(true)
    }

    /// Deletes one resource. A resource that does not exist in the
    /// external system is a no-op success.
    async fn delete_one(&self, spec: &mut ResourceSpec) -> Result<bool> {
        if spec.skip_delete.unwrap_or(false) {
            print_info(&format!("Skipping delete: {}", spec.name));
            return Ok(true);
        }

        if !spec.skip_read.unwrap_or(false) {
            match self.provider.read(spec).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    print_info(&format!("{spec} does not exist"));
                    return Ok(true);
                }
                Err(e) => {
                    error!("Pre-delete read failed for {spec}: {e}");
                    return Ok(false);
                }
            }
        }

        match self.provider.delete(spec).await {
            Ok(true) => {}
            Ok(false) => {
                error!("Failed to delete {spec}");
                return Ok(false);
            }
            Err(e) => {
                error!("Failed to delete {spec}: {e}");
                return Ok(false);
            }
        }

        if spec.wait_for_delete.unwrap_or(true) {
            if let Err(e) = self.wait_until_gone(spec).await {
                error!("{e}");
                return Ok(false);
            }
        }

        spec.active_resource = None;
        print_info(&format!("{spec} deleted"));

        if spec.save_output.unwrap_or(false) {
            if let Err(e) = self.snapshots.delete(spec).await {
                error!("Could not remove snapshot for {spec}: {e}");
            }
        }

        Ok(true)
    }

    /// Polls until the resource is observed active, up to the resource's
    /// waiter cap. Resources that refuse reads are not waited on.
    async fn wait_until_active(&self, spec: &ResourceSpec) -> Result<()> {
        if spec.skip_read.unwrap_or(false) {
            debug!("Skipping waiter for {spec}: reads disabled");
            return Ok(());
        }
        for attempt in 1..=spec.waiter_max_attempts {
            match self.provider.read(spec).await {
                Ok(Some(_)) => return Ok(()),
                Ok(None) => debug!(
                    "Waiting for {spec} ({attempt}/{})",
                    spec.waiter_max_attempts
                ),
                Err(e) => warn!("Waiter read failed for {spec}: {e}"),
            }
            if attempt < spec.waiter_max_attempts {
                tokio::time::sleep(Duration::from_secs(spec.waiter_delay)).await;
            }
        }

        Err(StratusError::Orchestrate(OrchestrateError::WaiterTimeout {
            resource_type: spec.resource_type.clone(),
            name: spec.name.clone(),
            attempts: spec.waiter_max_attempts,
        }))
    }

    /// Polls until the resource is no longer observed, up to the
    /// resource's waiter cap. Resources that refuse reads are not waited
    /// on.
    async fn wait_until_gone(&self, spec: &ResourceSpec) -> Result<()> {
        if spec.skip_read.unwrap_or(false) {
            debug!("Skipping waiter for {spec}: reads disabled");
            return Ok(());
        }
        for attempt in 1..=spec.waiter_max_attempts {
            match self.provider.read(spec).await {
                Ok(None) => return Ok(()),
                Ok(Some(_)) => debug!(
                    "Waiting for {spec} to be deleted ({attempt}/{})",
                    spec.waiter_max_attempts
                ),
                Err(e) => warn!("Waiter read failed for {spec}: {e}"),
            }
            if attempt < spec.waiter_max_attempts {
                tokio::time::sleep(Duration::from_secs(spec.waiter_delay)).await;
            }
        }

        Err(StratusError::Orchestrate(OrchestrateError::WaiterTimeout {
            resource_type: spec.resource_type.clone(),
            name: spec.name.clone(),
            attempts: spec.waiter_max_attempts,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::provider::MockResourceProvider;
    use crate::resource::ActiveResource;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Test provider that tracks which resources exist and records every
    /// lifecycle call.
    struct ScriptedProvider {
        existing: Mutex<HashSet<String>>,
        calls: Mutex<Vec<String>>,
        fail_create: HashSet<String>,
        create_stays_invisible: bool,
    }

    impl ScriptedProvider {
        fn new() -> Self {
            Self {
                existing: Mutex::new(HashSet::new()),
                calls: Mutex::new(Vec::new()),
                fail_create: HashSet::new(),
                create_stays_invisible: false,
            }
        }

        fn with_existing(self, names: &[&str]) -> Self {
            {
                let mut existing = self.existing.lock().expect("poisoned");
                for name in names {
                    existing.insert((*name).to_string());
                }
            }
            self
        }

        fn with_failing_create(mut self, name: &str) -> Self {
            self.fail_create.insert(name.to_string());
            self
        }

        /// Makes created resources never observable, so create waiters
        /// time out.
        const fn with_invisible_creates(mut self) -> Self {
            self.create_stays_invisible = true;
            self
        }

        fn record(&self, operation: &str, name: &str) {
            self.calls
                .lock()
                .expect("poisoned")
                .push(format!("{operation}:{name}"));
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("poisoned").clone()
        }

        fn active(spec: &ResourceSpec) -> ActiveResource {
            ActiveResource::new(&spec.resource_type, &spec.name, serde_json::json!({}))
        }
    }

    #[async_trait]
    impl ResourceProvider for ScriptedProvider {
        async fn create(&self, spec: &ResourceSpec) -> Result<ActiveResource> {
            self.record("create", &spec.name);
            if self.fail_create.contains(&spec.name) {
                return Err(StratusError::Provider(ProviderError::operation(
                    "create",
                    &spec.resource_type,
                    &spec.name,
                    "scripted failure",
                )));
            }
            if !self.create_stays_invisible {
                self.existing
                    .lock()
                    .expect("poisoned")
                    .insert(spec.name.clone());
            }
            Ok(Self::active(spec))
        }

        async fn read(&self, spec: &ResourceSpec) -> Result<Option<ActiveResource>> {
            self.record("read", &spec.name);
            let exists = self.existing.lock().expect("poisoned").contains(&spec.name);
            Ok(exists.then(|| Self::active(spec)))
        }

        async fn update(&self, spec: &ResourceSpec) -> Result<ActiveResource> {
            self.record("update", &spec.name);
            Ok(Self::active(spec))
        }

        async fn delete(&self, spec: &ResourceSpec) -> Result<bool> {
            self.record("delete", &spec.name);
            Ok(self.existing.lock().expect("poisoned").remove(&spec.name))
        }

        fn provider_type(&self) -> &'static str {
            "scripted"
        }
    }

    fn fast_spec(resource_type: &str, name: &str) -> ResourceSpec {
        let mut spec = ResourceSpec::new(resource_type, name);
        spec.waiter_delay = 0;
        spec.waiter_max_attempts = 2;
        spec
    }

    fn auto_opts() -> OrchestrateOptions {
        OrchestrateOptions::new().with_auto_confirm(true)
    }

    #[tokio::test]
    async fn test_dry_run_performs_no_provider_calls() {
        // The mock has no expectations: any provider call would panic.
        let provider = MockResourceProvider::new();
        let settings = WorkspaceSettings::default();
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut resources = vec![fast_spec("Container", "web")];
        let opts = auto_opts().with_dry_run(true);
        let (succeeded, attempted) = orchestrator
            .create_resources(&mut resources, &opts)
            .await
            .expect("orchestrate failed");

        assert_eq!((succeeded, attempted), (0, 0));
    }

    #[tokio::test]
    async fn test_create_all_resources() {
        let provider = ScriptedProvider::new();
        let settings = WorkspaceSettings::default();
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut resources = vec![fast_spec("Volume", "data"), fast_spec("Container", "web")];
        let counts = orchestrator
            .create_resources(&mut resources, &auto_opts())
            .await
            .expect("orchestrate failed");

        assert_eq!(counts, (2, 2));
        assert!(provider.calls().contains(&String::from("create:data")));
        assert!(provider.calls().contains(&String::from("create:web")));
        assert!(resources.iter().all(|r| r.active_resource.is_some()));
    }

    #[tokio::test]
    async fn test_use_cache_short_circuits_create() {
        let provider = ScriptedProvider::new().with_existing(&["web"]);
        let settings = WorkspaceSettings::default();
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut resources = vec![fast_spec("Container", "web")];
        let counts = orchestrator
            .create_resources(&mut resources, &auto_opts())
            .await
            .expect("orchestrate failed");

        assert_eq!(counts, (1, 1));
        assert!(!provider.calls().contains(&String::from("create:web")));
    }

    #[tokio::test]
    async fn test_force_bypasses_cache() {
        let provider = ScriptedProvider::new().with_existing(&["web"]);
        let settings = WorkspaceSettings::default();
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut resources = vec![fast_spec("Container", "web")];
        let opts = auto_opts().with_force(Some(true));
        let counts = orchestrator
            .create_resources(&mut resources, &opts)
            .await
            .expect("orchestrate failed");

        assert_eq!(counts, (1, 1));
        assert!(provider.calls().contains(&String::from("create:web")));
    }

    #[tokio::test]
    async fn test_skip_create_excluded_from_attempted() {
        let provider = ScriptedProvider::new();
        let settings = WorkspaceSettings::default();
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut skipped = fast_spec("Container", "skipped");
        skipped.skip_create = Some(true);
        let mut resources = vec![fast_spec("Container", "web"), skipped];

        let counts = orchestrator
            .create_resources(&mut resources, &auto_opts())
            .await
            .expect("orchestrate failed");
        assert_eq!(counts, (1, 1));
        assert!(!provider.calls().contains(&String::from("create:skipped")));
    }

    #[tokio::test]
    async fn test_create_failure_stops_batch_by_default() {
        let provider = ScriptedProvider::new().with_failing_create("first");
        let settings = WorkspaceSettings::default();
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut resources = vec![fast_spec("Volume", "first"), fast_spec("Volume", "second")];
        let counts = orchestrator
            .create_resources(&mut resources, &auto_opts())
            .await
            .expect("orchestrate failed");

        assert_eq!(counts, (0, 2));
        assert!(!provider.calls().contains(&String::from("create:second")));
    }

    #[tokio::test]
    async fn test_create_failure_continues_when_configured() {
        let provider = ScriptedProvider::new().with_failing_create("first");
        let settings = WorkspaceSettings {
            continue_on_create_failure: true,
            ..WorkspaceSettings::default()
        };
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut resources = vec![fast_spec("Volume", "first"), fast_spec("Volume", "second")];
        let counts = orchestrator
            .create_resources(&mut resources, &auto_opts())
            .await
            .expect("orchestrate failed");

        assert_eq!(counts, (1, 2));
        assert!(provider.calls().contains(&String::from("create:second")));
    }

    #[tokio::test]
    async fn test_waiter_timeout_is_per_resource_failure() {
        let provider = ScriptedProvider::new().with_invisible_creates();
        let settings = WorkspaceSettings {
            continue_on_create_failure: true,
            ..WorkspaceSettings::default()
        };
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut resources = vec![fast_spec("DbInstance", "primary")];
        let counts = orchestrator
            .create_resources(&mut resources, &auto_opts())
            .await
            .expect("orchestrate failed");

        assert_eq!(counts, (0, 1));
    }

    #[tokio::test]
    async fn test_delete_existing_resource() {
        let provider = ScriptedProvider::new().with_existing(&["web"]);
        let settings = WorkspaceSettings::default();
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut resources = vec![fast_spec("Container", "web")];
        let counts = orchestrator
            .delete_resources(&mut resources, &auto_opts())
            .await
            .expect("orchestrate failed");

        assert_eq!(counts, (1, 1));
        assert!(provider.calls().contains(&String::from("delete:web")));
        assert!(resources[0].active_resource.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_resource_is_noop_success() {
        let provider = ScriptedProvider::new();
        let settings = WorkspaceSettings::default();
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut resources = vec![fast_spec("Container", "gone")];
        let counts = orchestrator
            .delete_resources(&mut resources, &auto_opts())
            .await
            .expect("orchestrate failed");

        assert_eq!(counts, (1, 1));
        assert!(!provider.calls().contains(&String::from("delete:gone")));
    }

    #[tokio::test]
    async fn test_update_missing_resource_is_noop_success() {
        let provider = ScriptedProvider::new();
        let settings = WorkspaceSettings::default();
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut resources = vec![fast_spec("Container", "web")];
        let counts = orchestrator
            .update_resources(&mut resources, &auto_opts())
            .await
            .expect("orchestrate failed");

        assert_eq!(counts, (1, 1));
        assert!(!provider.calls().contains(&String::from("update:web")));
    }

    #[tokio::test]
    async fn test_recreate_on_update() {
        let provider = ScriptedProvider::new().with_existing(&["web"]);
        let settings = WorkspaceSettings::default();
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut spec = fast_spec("Container", "web");
        spec.recreate_on_update = Some(true);
        let mut resources = vec![spec];

        let counts = orchestrator
            .update_resources(&mut resources, &auto_opts())
            .await
            .expect("orchestrate failed");

        assert_eq!(counts, (1, 1));
        let calls = provider.calls();
        let delete_pos = calls
            .iter()
            .position(|c| c == "delete:web")
            .expect("delete should be called");
        let create_pos = calls
            .iter()
            .position(|c| c == "create:web")
            .expect("create should be called");
        assert!(delete_pos < create_pos);
    }

    #[tokio::test]
    async fn test_skip_read_creates_without_probe() {
        let provider = ScriptedProvider::new().with_existing(&["web"]);
        let settings = WorkspaceSettings::default();
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut spec = fast_spec("Container", "web");
        spec.skip_read = Some(true);
        let mut resources = vec![spec];

        let counts = orchestrator
            .create_resources(&mut resources, &auto_opts())
            .await
            .expect("orchestrate failed");

        // No cache probe and no waiter: the resource goes straight to create.
        assert_eq!(counts, (1, 1));
        assert!(provider.calls().contains(&String::from("create:web")));
        assert!(!provider.calls().contains(&String::from("read:web")));
    }

    #[tokio::test]
    async fn test_group_filter_limits_selection() {
        let provider = ScriptedProvider::new();
        let settings = WorkspaceSettings::default();
        let orchestrator = Orchestrator::new(&provider, &settings);

        let mut backend = fast_spec("Container", "api");
        backend.group = Some(String::from("backend"));
        let mut frontend = fast_spec("Container", "web");
        frontend.group = Some(String::from("frontend"));
        let mut resources = vec![backend, frontend];

        let opts = auto_opts().with_group_filter("backend");
        let counts = orchestrator
            .create_resources(&mut resources, &opts)
            .await
            .expect("orchestrate failed");

        assert_eq!(counts, (1, 1));
        assert!(provider.calls().contains(&String::from("create:api")));
        assert!(!provider.calls().contains(&String::from("create:web")));
    }
}
