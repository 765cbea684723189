use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::gates::Gate;
use crate::validation::{validate_key, KeyError, MAX_NAME_LENGTH};

// MODELS

/// Supported flag value types.
///
/// The value type determines what the flag resolves to: `boolean` flags
/// resolve to a bool, `string` to a string, `number` to a number, and `json`
/// to an arbitrary object. One flag keeps one value type for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagValueType {
    Boolean,
    String,
    Number,
    Json,
}

/// A flag value tagged with its runtime type.
///
/// Serializes untagged, so values read and write as plain JSON scalars and
/// objects. Variant order matters for deserialization: scalars are tried
/// before `Json` so that a bare bool/number/string lands in its typed
/// variant rather than in the catch-all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Boolean(bool),
    Number(f64),
    String(String),
    Json(Value),
}

impl FlagValue {
    /// The runtime type tag of this value.
    pub fn value_type(&self) -> FlagValueType {
        match self {
            FlagValue::Boolean(_) => FlagValueType::Boolean,
            FlagValue::Number(_) => FlagValueType::Number,
            FlagValue::String(_) => FlagValueType::String,
            FlagValue::Json(_) => FlagValueType::Json,
        }
    }

    /// Parse a raw string, as entered in a dashboard form, into a value of
    /// the given type.
    pub fn parse(value_type: FlagValueType, raw: &str) -> Result<Self, FlagValidationError> {
        match value_type {
            FlagValueType::Boolean => match raw {
                "true" => Ok(FlagValue::Boolean(true)),
                "false" => Ok(FlagValue::Boolean(false)),
                _ => Err(FlagValidationError::InvalidBooleanValue),
            },
            FlagValueType::Number => raw
                .parse::<f64>()
                .map(FlagValue::Number)
                .map_err(|_| FlagValidationError::InvalidNumberValue),
            FlagValueType::String => Ok(FlagValue::String(raw.to_string())),
            FlagValueType::Json => serde_json::from_str(raw)
                .map(FlagValue::Json)
                .map_err(|_| FlagValidationError::InvalidJsonValue),
        }
    }
}

/// Metadata about a flag. The flag-level default is the template applied
/// when a new environment configuration is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub id: Uuid,
    pub project_id: Uuid,
    pub key: String,
    pub name: String,
    pub value_type: FlagValueType,
    pub default_value: FlagValue,
}

/// Configuration for a flag in a specific environment; the unit the
/// evaluator reads. Unique per (flag, environment).
///
/// The default value is returned when no gates match, so non-boolean flags
/// always have a valid return value. Generic over the flag's value type;
/// callers working with heterogeneous flags instantiate `V = FlagValue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagEnvironmentConfig<V> {
    pub id: Uuid,
    pub flag_id: Uuid,
    pub environment_id: Uuid,
    pub enabled: bool,
    pub default_value: V,
    pub gates: Vec<Gate<V>>,
}

/// Candidate flag fields for a create or update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlagDraft {
    pub key: Option<String>,
    pub name: Option<String>,
    pub value_type: Option<FlagValueType>,
    pub default_value: Option<FlagValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagValidationError {
    #[error("Flag key is required")]
    KeyRequired,
    #[error("Flag key must be 100 characters or less")]
    KeyTooLong,
    #[error("Flag key must start and end with alphanumeric characters")]
    KeyInvalid,
    #[error("Flag name is required")]
    NameRequired,
    #[error("Flag name must be 200 characters or less")]
    NameTooLong,
    #[error("Flag value type is required")]
    ValueTypeRequired,
    #[error("Flag default value is required")]
    DefaultValueRequired,
    #[error("Boolean value must be 'true' or 'false'")]
    InvalidBooleanValue,
    #[error("Invalid number format")]
    InvalidNumberValue,
    #[error("Invalid JSON format")]
    InvalidJsonValue,
}

/// Validate flag fields ahead of a create or update.
pub fn validate_flag(flag: &FlagDraft) -> Result<(), FlagValidationError> {
    validate_key(flag.key.as_deref()).map_err(|e| match e {
        KeyError::Missing => FlagValidationError::KeyRequired,
        KeyError::TooLong => FlagValidationError::KeyTooLong,
        KeyError::InvalidFormat => FlagValidationError::KeyInvalid,
    })?;

    let name = flag.name.as_deref().unwrap_or("");

    if name.trim().is_empty() {
        return Err(FlagValidationError::NameRequired);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(FlagValidationError::NameTooLong);
    }

    if flag.value_type.is_none() {
        return Err(FlagValidationError::ValueTypeRequired);
    }

    // Presence check, not truthiness: false, 0, "" and {} are all valid
    // defaults. Only a missing value or an explicit JSON null is rejected.
    match &flag.default_value {
        None | Some(FlagValue::Json(Value::Null)) => {
            Err(FlagValidationError::DefaultValueRequired)
        }
        Some(_) => Ok(()),
    }
}
