use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// MODELS

/// Maximum number of gates on one flag/environment configuration.
pub const MAX_GATES_PER_CONFIG: usize = 50;

/// Maximum number of actor IDs on one actors gate.
pub const MAX_ACTOR_IDS_PER_GATE: usize = 10000;

/// The kind of a gate, as carried on the wire in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateType {
    Boolean,
    Actors,
}

/// Matches every actor while enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanGate<V> {
    pub id: Uuid,
    pub enabled: bool,
    pub value: V,
}

/// Matches actors whose id appears in `actor_ids`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorsGate<V> {
    pub id: Uuid,
    pub enabled: bool,
    pub actor_ids: Vec<String>,
    pub value: V,
}

/// An ordered, conditional rule attached to a flag's environment
/// configuration that overrides the default value for matching actors.
///
/// Gate order inside a configuration is insertion order and is significant:
/// the evaluator walks the list front to back and the first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Gate<V> {
    Boolean(BooleanGate<V>),
    Actors(ActorsGate<V>),
}

impl<V> Gate<V> {
    pub fn id(&self) -> Uuid {
        match self {
            Gate::Boolean(gate) => gate.id,
            Gate::Actors(gate) => gate.id,
        }
    }

    pub fn gate_type(&self) -> GateType {
        match self {
            Gate::Boolean(_) => GateType::Boolean,
            Gate::Actors(_) => GateType::Actors,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            Gate::Boolean(gate) => gate.enabled,
            Gate::Actors(gate) => gate.enabled,
        }
    }

    /// The value returned when this gate matches.
    pub fn value(&self) -> &V {
        match self {
            Gate::Boolean(gate) => &gate.value,
            Gate::Actors(gate) => &gate.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateValidationError {
    #[error("Maximum of 50 gates allowed per configuration")]
    TooManyGates,
    #[error("Boolean gates must be positioned last because they match all users and make subsequent gates unreachable")]
    BooleanGateNotLast,
    #[error("Actors gate must have at least one actor ID")]
    NoActorIds,
    #[error("Actors gate cannot have more than 10000 actor IDs")]
    TooManyActorIds,
    #[error("Actors gate contains duplicate actor IDs")]
    DuplicateActorIds,
}

/// Validate the structural invariants of a gate list before it is stored.
///
/// Checks run in a fixed order and stop at the first violation, so callers
/// always see a deterministic error for a given list.
pub fn validate_gates<V>(gates: &[Gate<V>]) -> Result<(), GateValidationError> {
    if gates.len() > MAX_GATES_PER_CONFIG {
        return Err(GateValidationError::TooManyGates);
    }

    // A boolean gate matches unconditionally, so anything after one is
    // unreachable. Anchoring on the first boolean gate rejects every list
    // where a boolean gate is not in the final slot.
    if let Some(index) = gates
        .iter()
        .position(|gate| gate.gate_type() == GateType::Boolean)
    {
        if index != gates.len() - 1 {
            return Err(GateValidationError::BooleanGateNotLast);
        }
    }

    for gate in gates {
        if let Gate::Actors(gate) = gate {
            if gate.actor_ids.is_empty() {
                return Err(GateValidationError::NoActorIds);
            }

            if gate.actor_ids.len() > MAX_ACTOR_IDS_PER_GATE {
                return Err(GateValidationError::TooManyActorIds);
            }

            let unique: HashSet<&str> = gate.actor_ids.iter().map(String::as_str).collect();
            if unique.len() != gate.actor_ids.len() {
                return Err(GateValidationError::DuplicateActorIds);
            }
        }
    }

    Ok(())
}
