//! Core evaluation and validation engine for feature flags.
//!
//! Resolves a flag's value for a given actor inside a specific environment,
//! and enforces the structural invariants of the configuration objects
//! (projects, environments, flags, gates) that feed that resolution.
//!
//! Validators guard configuration writes; [`evaluate_flag`] consumes
//! already-valid configuration at read time. Every operation is pure and
//! synchronous: the surrounding service owns persistence, transport, and
//! authentication, hands the engine a [`FlagEnvironmentConfig`] and an
//! [`Actor`], and maps the result or error onto its own wire format.

pub mod environments;
pub mod errors;
pub mod evaluation;
pub mod flags;
pub mod gates;
pub mod projects;
pub mod validation;

pub use environments::{validate_environment, Environment, EnvironmentDraft, EnvironmentValidationError};
pub use errors::LookupError;
pub use evaluation::{
    evaluate_flag, matches_gate, Actor, EvaluationContext, EvaluationReason, EvaluationResult,
    MatchedGate,
};
pub use flags::{
    validate_flag, Flag, FlagDraft, FlagEnvironmentConfig, FlagValidationError, FlagValue,
    FlagValueType,
};
pub use gates::{
    validate_gates, ActorsGate, BooleanGate, Gate, GateType, GateValidationError,
    MAX_ACTOR_IDS_PER_GATE, MAX_GATES_PER_CONFIG,
};
pub use projects::{validate_project, Project, ProjectDraft, ProjectValidationError};
