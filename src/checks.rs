//! Declarative validation: named checks combined with `and`/`or`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::context::Scope;
use crate::engine;
use crate::errors::{EngineError, Result};
use crate::functions::Registry;

/// One validation rule as it arrives from the protocol: a call to a named
/// check function, or a logical combinator over child rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CheckRule {
    All {
        and: Vec<CheckRule>,
        #[serde(default)]
        message: String,
    },
    Any {
        or: Vec<CheckRule>,
        #[serde(default)]
        message: String,
    },
    Call {
        call: String,
        #[serde(default)]
        args: Map<String, Value>,
        #[serde(default)]
        message: String,
    },
}

impl CheckRule {
    pub fn message(&self) -> &str {
        match self {
            CheckRule::All { message, .. }
            | CheckRule::Any { message, .. }
            | CheckRule::Call { message, .. } => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Parse a rule list from protocol JSON.
pub fn parse_rules(json: &str) -> Result<Vec<CheckRule>> {
    serde_json::from_str(json).map_err(|e| EngineError::Parse(e.to_string()))
}

/// Evaluate every top-level rule independently. `valid` is the conjunction
/// of all results; `errors` carries the message of each failing top-level
/// rule, in declaration order. A failing combinator contributes only its
/// own message, never its children's.
pub fn evaluate_checks(
    rules: &[CheckRule],
    model: &Value,
    scope: &Scope,
    registry: &Registry,
) -> ValidationResult {
    let mut valid = true;
    let mut errors = Vec::new();
    for rule in rules {
        if !passes(rule, model, scope, registry) {
            valid = false;
            if !rule.message().is_empty() {
                errors.push(rule.message().to_string());
            }
        }
    }
    ValidationResult { valid, errors }
}

fn passes(rule: &CheckRule, model: &Value, scope: &Scope, registry: &Registry) -> bool {
    match rule {
        CheckRule::All { and, .. } => and.iter().all(|r| passes(r, model, scope, registry)),
        CheckRule::Any { or, .. } => or.iter().any(|r| passes(r, model, scope, registry)),
        CheckRule::Call { call, args, .. } => {
            let resolved = resolve_args(args, model, scope);
            match registry.get(call) {
                Some(f) => f.call(&resolved),
                None => {
                    // An unvalidatable rule must not pass silently.
                    debug!(call = call.as_str(), "unknown check function fails closed");
                    false
                }
            }
        }
    }
}

/// Resolve each argument against the model: `{"path": ...}` bindings and
/// interpolatable strings go through the engine; absent resolves to null.
fn resolve_args(args: &Map<String, Value>, model: &Value, scope: &Scope) -> Map<String, Value> {
    args.iter()
        .map(|(name, value)| {
            let resolved = engine::resolve_value(value, model, scope).unwrap_or(Value::Null);
            (name.clone(), resolved)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(rules_json: Value, model: Value) -> ValidationResult {
        let rules: Vec<CheckRule> = serde_json::from_value(rules_json).unwrap();
        evaluate_checks(&rules, &model, &Scope::root(), &Registry::with_builtins())
    }

    #[test]
    fn required_reports_message_in_order() {
        let rules = json!([
            {"call": "required", "args": {"value": {"path": "/name"}}, "message": "Name is required"},
            {"call": "required", "args": {"value": {"path": "/city"}}, "message": "City is required"}
        ]);
        let result = run(rules.clone(), json!({"name": "", "city": ""}));
        assert_eq!(
            result,
            ValidationResult {
                valid: false,
                errors: vec!["Name is required".into(), "City is required".into()],
            }
        );
        let result = run(rules, json!({"name": "Ann", "city": "Oslo"}));
        assert_eq!(result, ValidationResult { valid: true, errors: vec![] });
    }

    #[test]
    fn or_combinator_passes_on_any_child() {
        let rules = json!([{
            "or": [
                {"call": "required", "args": {"value": {"path": "/phone"}}},
                {"call": "required", "args": {"value": {"path": "/email"}}}
            ],
            "message": "phone or email required"
        }]);
        let result = run(rules.clone(), json!({"phone": "", "email": "a@b.com"}));
        assert_eq!(result, ValidationResult { valid: true, errors: vec![] });

        let result = run(rules, json!({"phone": "", "email": ""}));
        assert_eq!(
            result,
            ValidationResult {
                valid: false,
                errors: vec!["phone or email required".into()],
            }
        );
    }

    #[test]
    fn and_combinator_reports_only_its_own_message() {
        let rules = json!([{
            "and": [
                {"call": "required", "args": {"value": {"path": "/a"}}, "message": "inner a"},
                {"call": "required", "args": {"value": {"path": "/b"}}, "message": "inner b"}
            ],
            "message": "a and b required"
        }]);
        let result = run(rules, json!({"a": "x", "b": ""}));
        assert_eq!(result.errors, vec!["a and b required".to_string()]);
    }

    #[test]
    fn unknown_check_fails_closed() {
        let rules = json!([{
            "call": "definitelyNotRegistered",
            "args": {},
            "message": "cannot validate"
        }]);
        let result = run(rules, json!({}));
        assert_eq!(
            result,
            ValidationResult {
                valid: false,
                errors: vec!["cannot validate".into()],
            }
        );
    }

    #[test]
    fn failing_rule_without_message_still_invalidates() {
        let rules = json!([{"call": "required", "args": {"value": {"path": "/x"}}}]);
        let result = run(rules, json!({}));
        assert!(!result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scoped_args_resolve_relative_paths() {
        let rules: Vec<CheckRule> = serde_json::from_value(json!([
            {"call": "required", "args": {"value": {"path": "qty"}}, "message": "qty required"}
        ]))
        .unwrap();
        let model = json!({"items": [{"qty": 2}, {}]});
        let registry = Registry::with_builtins();

        let first = evaluate_checks(&rules, &model, &Scope::at("/items/0"), &registry);
        assert!(first.valid);
        let second = evaluate_checks(&rules, &model, &Scope::at("/items/1"), &registry);
        assert!(!second.valid);
    }

    #[test]
    fn parse_rules_rejects_malformed_json() {
        assert!(parse_rules("not json").is_err());
        assert!(parse_rules(r#"[{"call": "required"}]"#).is_ok());
    }
}
