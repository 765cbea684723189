//! Lookup and lifecycle errors.
//!
//! These are raised by the surrounding lookup/persistence layer when a
//! referenced entity does not exist or a lifecycle invariant would be
//! violated, never by the evaluator itself. They are defined here so the
//! whole error taxonomy lives in the core and a network-facing layer can map
//! each variant to a stable machine-readable code.

use thiserror::Error;
use uuid::Uuid;

/// A referenced entity could not be resolved, or a lifecycle invariant
/// (every project keeps at least one environment) would be broken.
///
/// Always fatal to the operation that raised it; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No flag with this key exists in the project.
    #[error("Flag not found: {flag_key}")]
    FlagNotFound { flag_key: String },

    /// No environment with this key exists in the project.
    #[error("Environment not found: {environment_key}")]
    EnvironmentNotFound { environment_key: String },

    /// No project with this id exists.
    #[error("Project not found: {project_id}")]
    ProjectNotFound { project_id: Uuid },

    /// The flag exists but has no configuration in this environment.
    #[error("Flag configuration not found for flag '{flag_key}' in environment '{environment_key}'")]
    FlagEnvironmentConfigNotFound {
        flag_key: String,
        environment_key: String,
    },

    /// A project was about to be left with no environments.
    #[error("Project must have at least one environment")]
    ProjectMustHaveEnvironment,

    /// Deleting this environment would leave its project empty.
    #[error("Cannot delete the last environment in project {project_id}")]
    CannotDeleteLastEnvironment { project_id: Uuid },
}
