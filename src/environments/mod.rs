use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::validation::{validate_key, KeyError, MAX_NAME_LENGTH};

// MODELS

/// Where your code runs (dev, staging, prod, etc). Belongs to one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub key: String,
}

/// Candidate environment fields for a create or update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentDraft {
    pub key: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentValidationError {
    #[error("Environment key is required")]
    KeyRequired,
    #[error("Environment key must be 100 characters or less")]
    KeyTooLong,
    #[error("Environment key must start and end with alphanumeric characters")]
    KeyInvalid,
    #[error("Environment name is required")]
    NameRequired,
    #[error("Environment name must be 200 characters or less")]
    NameTooLong,
}

/// Validate environment fields ahead of a create or update.
pub fn validate_environment(
    environment: &EnvironmentDraft,
) -> Result<(), EnvironmentValidationError> {
    validate_key(environment.key.as_deref()).map_err(|e| match e {
        KeyError::Missing => EnvironmentValidationError::KeyRequired,
        KeyError::TooLong => EnvironmentValidationError::KeyTooLong,
        KeyError::InvalidFormat => EnvironmentValidationError::KeyInvalid,
    })?;

    let name = environment.name.as_deref().unwrap_or("");

    if name.trim().is_empty() {
        return Err(EnvironmentValidationError::NameRequired);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(EnvironmentValidationError::NameTooLong);
    }

    Ok(())
}
