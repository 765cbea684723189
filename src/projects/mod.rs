use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::validation::MAX_NAME_LENGTH;

// MODELS

/// Container grouping related flags and environments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub key: String,
}

/// Candidate project fields for a create or update.
///
/// The key is carried but validated at the boundary schema layer with the
/// shared key rules; the core validator only enforces the name contract.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectDraft {
    pub name: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectValidationError {
    #[error("Project name is required")]
    NameRequired,
    #[error("Project name must be 200 characters or less")]
    NameTooLong,
}

/// Validate project fields ahead of a create or update.
pub fn validate_project(project: &ProjectDraft) -> Result<(), ProjectValidationError> {
    let name = project.name.as_deref().unwrap_or("");

    if name.trim().is_empty() {
        return Err(ProjectValidationError::NameRequired);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ProjectValidationError::NameTooLong);
    }

    Ok(())
}
