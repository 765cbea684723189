use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::flags::FlagEnvironmentConfig;
use crate::gates::{Gate, GateType};

// Actor context for evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// The sole identity gates match on.
    pub id: String,
    /// Carried for future gate types; never consulted by gate matching.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, Value>,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: HashMap::new(),
        }
    }
}

/// Everything the lookup layer needs to resolve the configuration a flag is
/// evaluated against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationContext {
    pub project_id: Uuid,
    pub environment_id: Uuid,
    pub actor: Actor,
}

/// Why an evaluation resolved the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationReason {
    #[serde(rename = "flag disabled")]
    FlagDisabled,
    #[serde(rename = "gate matched")]
    GateMatched,
    #[serde(rename = "default value")]
    DefaultValue,
}

/// The gate that decided an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedGate {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub gate_type: GateType,
}

// Flag evaluation result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult<V> {
    pub flag_key: String,
    pub value: V,
    pub enabled: bool,
    pub reason: EvaluationReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_gate: Option<MatchedGate>,
}

/// Decide whether a single gate matches an actor.
///
/// Boolean gates match every actor while enabled; actors gates match when
/// enabled and the actor's id is in the gate's list. Disabled gates of
/// either kind never match.
pub fn matches_gate<V>(gate: &Gate<V>, actor: &Actor) -> bool {
    match gate {
        Gate::Boolean(gate) => gate.enabled,
        Gate::Actors(gate) => gate.enabled && gate.actor_ids.iter().any(|id| id == &actor.id),
    }
}

/// Evaluate a flag for a given actor.
///
/// Returns the value from the first matching gate, or the configured default
/// when the flag is disabled or no gate matches. Assumes the configuration
/// already passed [`validate_gates`](crate::gates::validate_gates);
/// evaluation itself never fails.
pub fn evaluate_flag<V: Clone>(
    flag_key: &str,
    config: &FlagEnvironmentConfig<V>,
    actor: &Actor,
) -> EvaluationResult<V> {
    // Step 1: a disabled flag short-circuits; gates are never consulted.
    if !config.enabled {
        return EvaluationResult {
            flag_key: flag_key.to_string(),
            value: config.default_value.clone(),
            enabled: false,
            reason: EvaluationReason::FlagDisabled,
            matched_gate: None,
        };
    }

    // Step 2: walk gates in stored order; the first match wins.
    for gate in &config.gates {
        if matches_gate(gate, actor) {
            return EvaluationResult {
                flag_key: flag_key.to_string(),
                value: gate.value().clone(),
                enabled: true,
                reason: EvaluationReason::GateMatched,
                matched_gate: Some(MatchedGate {
                    id: gate.id(),
                    gate_type: gate.gate_type(),
                }),
            };
        }
    }

    // Step 3: enabled but nothing matched, fall back to the default.
    EvaluationResult {
        flag_key: flag_key.to_string(),
        value: config.default_value.clone(),
        enabled: true,
        reason: EvaluationReason::DefaultValue,
        matched_gate: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::{ActorsGate, BooleanGate};

    fn make_config<V>(
        enabled: bool,
        default_value: V,
        gates: Vec<Gate<V>>,
    ) -> FlagEnvironmentConfig<V> {
        FlagEnvironmentConfig {
            id: Uuid::new_v4(),
            flag_id: Uuid::new_v4(),
            environment_id: Uuid::new_v4(),
            enabled,
            default_value,
            gates,
        }
    }

    fn boolean_gate<V>(enabled: bool, value: V) -> Gate<V> {
        Gate::Boolean(BooleanGate {
            id: Uuid::new_v4(),
            enabled,
            value,
        })
    }

    fn actors_gate<V>(enabled: bool, actor_ids: &[&str], value: V) -> Gate<V> {
        Gate::Actors(ActorsGate {
            id: Uuid::new_v4(),
            enabled,
            actor_ids: actor_ids.iter().map(|id| id.to_string()).collect(),
            value,
        })
    }

    #[test]
    fn test_enabled_boolean_gate_matches_any_actor() {
        let gate = boolean_gate(true, "variant-a");

        assert!(matches_gate(&gate, &Actor::new("user-1")));
        assert!(matches_gate(&gate, &Actor::new("user-2")));
        assert!(matches_gate(&gate, &Actor::new("any-actor")));
    }

    #[test]
    fn test_disabled_boolean_gate_never_matches() {
        let gate = boolean_gate(false, true);
        assert!(!matches_gate(&gate, &Actor::new("user-123")));
    }

    #[test]
    fn test_actors_gate_matches_on_membership() {
        let gate = actors_gate(true, &["user-123", "user-456"], true);

        assert!(matches_gate(&gate, &Actor::new("user-123")));
        assert!(!matches_gate(&gate, &Actor::new("user-789")));
    }

    #[test]
    fn test_disabled_actors_gate_never_matches() {
        let gate = actors_gate(false, &["user-123"], true);
        assert!(!matches_gate(&gate, &Actor::new("user-123")));
    }

    #[test]
    fn test_empty_actors_gate_never_matches() {
        let gate: Gate<bool> = actors_gate(true, &[], true);
        assert!(!matches_gate(&gate, &Actor::new("user-123")));
    }

    #[test]
    fn test_actors_gate_ignores_attributes() {
        let gate = actors_gate(true, &["user-123"], true);

        let mut actor = Actor::new("user-123");
        actor
            .attributes
            .insert("plan".to_string(), serde_json::json!("premium"));
        actor
            .attributes
            .insert("age".to_string(), serde_json::json!(25));

        assert!(matches_gate(&gate, &actor));
    }

    #[test]
    fn test_disabled_flag_returns_default() {
        let config = make_config(false, false, vec![]);
        let result = evaluate_flag("my-flag", &config, &Actor::new("user-123"));

        assert_eq!(result.flag_key, "my-flag");
        assert!(!result.value);
        assert!(!result.enabled);
        assert_eq!(result.reason, EvaluationReason::FlagDisabled);
        assert_eq!(result.matched_gate, None);
    }

    #[test]
    fn test_disabled_flag_ignores_matching_gates() {
        let config = make_config(false, false, vec![boolean_gate(true, true)]);
        let result = evaluate_flag("my-flag", &config, &Actor::new("user-123"));

        assert!(!result.enabled);
        assert!(!result.value);
        assert_eq!(result.reason, EvaluationReason::FlagDisabled);
    }

    #[test]
    fn test_enabled_flag_with_no_gates_returns_default() {
        let config = make_config(true, "default-variant", vec![]);
        let result = evaluate_flag("feature-x", &config, &Actor::new("user-123"));

        assert_eq!(result.value, "default-variant");
        assert!(result.enabled);
        assert_eq!(result.reason, EvaluationReason::DefaultValue);
        assert_eq!(result.matched_gate, None);
    }

    #[test]
    fn test_matching_boolean_gate_returns_gate_value() {
        let gate = boolean_gate(true, true);
        let gate_id = gate.id();
        let config = make_config(true, false, vec![gate]);

        let result = evaluate_flag("feature", &config, &Actor::new("user-123"));

        assert!(result.value);
        assert!(result.enabled);
        assert_eq!(result.reason, EvaluationReason::GateMatched);
        assert_eq!(
            result.matched_gate,
            Some(MatchedGate {
                id: gate_id,
                gate_type: GateType::Boolean,
            })
        );
    }

    #[test]
    fn test_first_matching_gate_wins() {
        let first = actors_gate(true, &["user-123"], 1);
        let second = actors_gate(true, &["user-123"], 2);
        let first_id = first.id();
        let config = make_config(true, 0, vec![first, second]);

        let result = evaluate_flag("feature", &config, &Actor::new("user-123"));

        assert_eq!(result.value, 1);
        assert_eq!(result.matched_gate.unwrap().id, first_id);
    }

    #[test]
    fn test_skips_non_matching_gates() {
        let config = make_config(
            true,
            "default",
            vec![
                actors_gate(true, &["someone-else"], "first"),
                actors_gate(false, &["user-123"], "second"),
                actors_gate(true, &["user-123"], "third"),
            ],
        );

        let result = evaluate_flag("feature", &config, &Actor::new("user-123"));

        assert_eq!(result.value, "third");
        assert_eq!(result.reason, EvaluationReason::GateMatched);
        assert_eq!(result.matched_gate.unwrap().gate_type, GateType::Actors);
    }

    #[test]
    fn test_no_match_falls_back_to_default() {
        let config = make_config(true, 10, vec![actors_gate(true, &["u1", "u2"], 100)]);

        let result = evaluate_flag("rate-limit", &config, &Actor::new("u9"));

        assert_eq!(result.value, 10);
        assert!(result.enabled);
        assert_eq!(result.reason, EvaluationReason::DefaultValue);
        assert_eq!(result.matched_gate, None);

        let result = evaluate_flag("rate-limit", &config, &Actor::new("u1"));

        assert_eq!(result.value, 100);
        assert!(result.enabled);
        assert_eq!(result.reason, EvaluationReason::GateMatched);
    }

    #[test]
    fn test_result_serialization_shape() {
        let gate = actors_gate(true, &["u1"], 100);
        let gate_id = gate.id();
        let config = make_config(true, 10, vec![gate]);

        let matched = evaluate_flag("rate-limit", &config, &Actor::new("u1"));
        let json = serde_json::to_value(&matched).unwrap();
        assert_eq!(json["flag_key"], "rate-limit");
        assert_eq!(json["value"], 100);
        assert_eq!(json["reason"], "gate matched");
        assert_eq!(json["matched_gate"]["id"], gate_id.to_string());
        assert_eq!(json["matched_gate"]["type"], "actors");

        let missed = evaluate_flag("rate-limit", &config, &Actor::new("u9"));
        let json = serde_json::to_value(&missed).unwrap();
        assert_eq!(json["reason"], "default value");
        assert!(json.as_object().unwrap().get("matched_gate").is_none());

        let disabled = make_config(false, 10, vec![]);
        let result = evaluate_flag("rate-limit", &disabled, &Actor::new("u1"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["reason"], "flag disabled");
        assert_eq!(json["enabled"], false);
    }

    #[test]
    fn test_actor_attributes_default_on_deserialization() {
        let actor: Actor = serde_json::from_str(r#"{"id":"user-123"}"#).unwrap();
        assert_eq!(actor.id, "user-123");
        assert!(actor.attributes.is_empty());
    }
}
