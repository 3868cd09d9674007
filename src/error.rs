//! Error types for the Stratus deployment engine.
//!
//! This module provides the error hierarchy for all operations in the
//! build-and-apply lifecycle: configuration, planning, provider calls,
//! and orchestration.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the Stratus deployment engine.
#[derive(Debug, Error)]
pub enum StratusError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Planning errors.
    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    /// Provider errors.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Orchestration errors.
    #[error("Orchestration error: {0}")]
    Orchestrate(#[from] OrchestrateError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
///
/// These are fatal to the current command: they are raised before any
/// resource is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The workspace file was not found.
    #[error("Workspace file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The workspace file could not be parsed.
    #[error("Failed to parse workspace: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Workspace validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// Environment variable is missing.
    #[error("Missing environment variable: {name}")]
    MissingEnvVar {
        /// Name of the missing variable.
        name: String,
    },

    /// An infrastructure target string could not be recognized.
    #[error("Unknown infrastructure target: {value}")]
    UnknownInfra {
        /// The unrecognized target string.
        value: String,
    },

    /// A resource filter string could not be parsed.
    #[error("Invalid resource filter '{filter}': {message}")]
    InvalidFilter {
        /// The offending filter string.
        filter: String,
        /// Description of the problem.
        message: String,
    },

    /// Duplicate definition.
    #[error("Duplicate {kind} name: {name}")]
    DuplicateName {
        /// Kind of the duplicated object (group, resource, app).
        kind: String,
        /// The duplicated name.
        name: String,
    },
}

/// Planning errors.
#[derive(Debug, Error)]
pub enum PlanError {
    /// An App failed to build its resources.
    #[error("App '{app}' failed to build resources: {message}")]
    BuildFailed {
        /// Name of the failing app.
        app: String,
        /// Description of the failure.
        message: String,
    },

    /// Plan is empty (nothing to do).
    #[error("Plan is empty: no matching resources")]
    EmptyPlan,
}

/// Errors surfaced by a resource provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A provider operation failed.
    #[error("Failed to {operation} {resource_type} '{name}': {message}")]
    OperationFailed {
        /// The lifecycle operation (create, read, update, delete).
        operation: String,
        /// Type of the resource.
        resource_type: String,
        /// Name of the resource.
        name: String,
        /// Description of the failure.
        message: String,
    },

    /// Realized-state serialization error.
    #[error("State serialization error: {message}")]
    SerializationError {
        /// Description of the serialization error.
        message: String,
    },
}

/// Orchestration errors.
#[derive(Debug, Error)]
pub enum OrchestrateError {
    /// Waiter polling exhausted its attempt cap.
    #[error("Timed out waiting for {resource_type} '{name}' after {attempts} attempts")]
    WaiterTimeout {
        /// Type of the resource.
        resource_type: String,
        /// Name of the resource.
        name: String,
        /// Number of poll attempts made.
        attempts: u32,
    },

    /// The run was aborted.
    #[error("Run aborted: {reason}")]
    Aborted {
        /// Reason for abort.
        reason: String,
    },
}

/// Result type alias for Stratus operations.
pub type Result<T> = std::result::Result<T, StratusError>;

impl StratusError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a validation error without a specific field.
    #[must_use]
    pub fn validation_general(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: None,
        }
    }
}

impl ProviderError {
    /// Creates an operation-failed error.
    #[must_use]
    pub fn operation(
        operation: impl Into<String>,
        resource_type: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            resource_type: resource_type.into(),
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a serialization error with the given message.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }
}
