//! Declarative resource specifications.
//!
//! A [`ResourceSpec`] describes one external object to be managed: its
//! identity, control flags, waiter parameters, and dependencies. Control
//! flags are tri-state (`Option<bool>`) so that a value a user set
//! explicitly can be distinguished from a defaulted one; property
//! propagation from an App only ever fills in the unset side.

use serde::{Deserialize, Serialize};

use super::types::{ActiveResource, ResourceId};

/// Default seconds between waiter poll attempts.
pub const DEFAULT_WAITER_DELAY_SECS: u64 = 30;

/// Default maximum number of waiter poll attempts.
pub const DEFAULT_WAITER_MAX_ATTEMPTS: u32 = 50;

/// Declarative specification of one managed resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Resource name (required).
    pub name: String,

    /// Resource type name, e.g. `EcsService` (required).
    pub resource_type: String,

    /// If false, the resource is dropped during flattening and every
    /// lifecycle operation is refused.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// If true, creation is skipped for this resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_create: Option<bool>,

    /// If true, reads against the external system are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_read: Option<bool>,

    /// If true, updates are skipped for this resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_update: Option<bool>,

    /// If true, deletion is skipped for this resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_delete: Option<bool>,

    /// If true, updates are realized as delete followed by create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recreate_on_update: Option<bool>,

    /// If true (the effective default), creation is short-circuited when an
    /// active resource with the same identity already exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cache: Option<bool>,

    /// Tri-state force flag; unset defers to the process-wide force
    /// override threaded through the orchestrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,

    /// Enables debug output for this resource's operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_mode: Option<bool>,

    /// If true, a JSON snapshot of the realized resource is persisted
    /// after successful create/update and removed after delete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_output: Option<bool>,

    /// If true (the effective default), block until creation is observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_create: Option<bool>,

    /// If true (the effective default), block until an update is observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_update: Option<bool>,

    /// If true (the effective default), block until deletion is observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_delete: Option<bool>,

    /// Seconds between waiter poll attempts.
    #[serde(default = "default_waiter_delay")]
    pub waiter_delay: u64,

    /// Maximum number of waiter poll attempts.
    #[serde(default = "default_waiter_max_attempts")]
    pub waiter_max_attempts: u32,

    /// Logical group tag used for group filtering; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Environment this resource belongs to (dev/stg/prd).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,

    /// Directory component of the snapshot path; propagation sets this to
    /// the owning App's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// Resources that must be handled before (create) or after (delete)
    /// this one. Must not contain the resource itself; this is a caller
    /// precondition, not validated here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<ResourceSpec>,

    /// Opaque desired-state document handed to the provider.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,

    /// Last-read representation of the object in the external system.
    #[serde(skip)]
    pub active_resource: Option<ActiveResource>,
}

const fn default_true() -> bool {
    true
}

const fn default_waiter_delay() -> u64 {
    DEFAULT_WAITER_DELAY_SECS
}

const fn default_waiter_max_attempts() -> u32 {
    DEFAULT_WAITER_MAX_ATTEMPTS
}

impl ResourceSpec {
    /// Creates a new resource specification with default flags.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
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
            waiter_delay: DEFAULT_WAITER_DELAY_SECS,
            waiter_max_attempts: DEFAULT_WAITER_MAX_ATTEMPTS,
            group: None,
            env: None,
            output_dir: None,
            depends_on: Vec::new(),
            payload: serde_json::Value::Null,
            active_resource: None,
        }
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the group tag.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the dependency list.
    #[must_use]
    pub fn with_depends_on(mut self, depends_on: Vec<Self>) -> Self {
        self.depends_on = depends_on;
        self
    }

    /// Sets the desired-state payload.
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
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

    /// Returns this resource's identity.
    #[must_use]
    pub fn id(&self) -> ResourceId {
        ResourceId::new(&self.resource_type, &self.name)
    }

    /// Returns the group tag, defaulting to the resource name.
    #[must_use]
    pub fn group_name(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.name)
    }

    /// Checks this resource against the three plan filters.
    ///
    /// Group and name filters are case-insensitive substring matches; the
    /// type filter is a case-insensitive exact match.
    #[must_use]
    pub fn matches_filters(
        &self,
        group_filter: Option<&str>,
        name_filter: Option<&str>,
        type_filter: Option<&str>,
    ) -> bool {
        if let Some(group_filter) = group_filter {
            if !self
                .group_name()
                .to_lowercase()
                .contains(&group_filter.to_lowercase())
            {
                return false;
            }
        }
        if let Some(name_filter) = name_filter {
            if !self
                .name
                .to_lowercase()
                .contains(&name_filter.to_lowercase())
            {
                return false;
            }
        }
        if let Some(type_filter) = type_filter {
            if !self.resource_type.eq_ignore_ascii_case(type_filter) {
                return false;
            }
        }
        true
    }

    /// Whether the orchestrator should create this resource.
    #[must_use]
    pub fn should_create(
        &self,
        group_filter: Option<&str>,
        name_filter: Option<&str>,
        type_filter: Option<&str>,
    ) -> bool {
        if !self.enabled || self.skip_create.unwrap_or(false) {
            return false;
        }
        self.matches_filters(group_filter, name_filter, type_filter)
    }

    /// Whether the orchestrator should update this resource.
    #[must_use]
    pub fn should_update(
        &self,
        group_filter: Option<&str>,
        name_filter: Option<&str>,
        type_filter: Option<&str>,
    ) -> bool {
        if !self.enabled || self.skip_update.unwrap_or(false) {
            return false;
        }
        self.matches_filters(group_filter, name_filter, type_filter)
    }

    /// Whether the orchestrator should delete this resource.
    #[must_use]
    pub fn should_delete(
        &self,
        group_filter: Option<&str>,
        name_filter: Option<&str>,
        type_filter: Option<&str>,
    ) -> bool {
        if !self.enabled || self.skip_delete.unwrap_or(false) {
            return false;
        }
        self.matches_filters(group_filter, name_filter, type_filter)
    }
}

impl PartialEq for ResourceSpec {
    fn eq(&self, other: &Self) -> bool {
        self.resource_type == other.resource_type && self.name == other.name
    }
}

impl Eq for ResourceSpec {}

impl std::hash::Hash for ResourceSpec {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.resource_type.hash(state);
        self.name.hash(state);
    }
}

impl std::fmt::Display for ResourceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.resource_type, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_equality_ignores_flags() {
        let a = ResourceSpec::new("S3Bucket", "data").with_skip_delete(true);
        let b = ResourceSpec::new("S3Bucket", "data");
        assert_eq!(a, b);
    }

    #[test]
    fn test_group_defaults_to_name() {
        let r = ResourceSpec::new("SecurityGroup", "lb-sg");
        assert_eq!(r.group_name(), "lb-sg");

        let r = r.with_group("edge");
        assert_eq!(r.group_name(), "edge");
    }

    #[test]
    fn test_matches_filters() {
        let r = ResourceSpec::new("EcsService", "api-server").with_group("backend");

        assert!(r.matches_filters(None, None, None));
        assert!(r.matches_filters(Some("back"), None, None));
        assert!(r.matches_filters(None, Some("API"), None));
        assert!(r.matches_filters(None, None, Some("ecsservice")));
        assert!(!r.matches_filters(Some("front"), None, None));
        assert!(!r.matches_filters(None, Some("worker"), None));
        assert!(!r.matches_filters(None, None, Some("EcsCluster")));
    }

    #[test]
    fn test_should_create_gates() {
        let mut r = ResourceSpec::new("EcsService", "api");
        assert!(r.should_create(None, None, None));

        r.skip_create = Some(true);
        assert!(!r.should_create(None, None, None));

        r.skip_create = None;
        r.enabled = false;
        assert!(!r.should_create(None, None, None));
    }

    #[test]
    fn test_waiter_defaults() {
        let r = ResourceSpec::new("DbInstance", "primary");
        assert_eq!(r.waiter_delay, 30);
        assert_eq!(r.waiter_max_attempts, 50);
    }
}
