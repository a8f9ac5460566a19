//! Full-string resolution over interpolatable text and typed conveniences
//! for protocol property values.

use itertools::Itertools;
use serde_json::Value;
use tracing::trace;

use crate::comparison::as_f64;
use crate::context::Scope;
use crate::expression::{self, Part};
use crate::lexer;
use crate::store;

/// Resolve interpolatable text against the model; absent bare expressions
/// become `Value::Null`.
pub fn resolve_string(text: &str, model: &Value, scope: &Scope) -> Value {
    resolve_string_or(text, model, scope, Value::Null)
}

/// Resolve interpolatable text against the model.
///
/// A *bare expression* — the whole string is one `${...}` with no
/// surrounding text — keeps its native value type, with `default`
/// substituted when it resolves to nothing. Any other input concatenates
/// text verbatim with each expression's stringified value (absent and null
/// render as the empty string).
pub fn resolve_string_or(text: &str, model: &Value, scope: &Scope, default: Value) -> Value {
    let tokens = lexer::tokenize(text);
    let parts = expression::parse_parts(&tokens);
    trace!(template = text, parts = parts.len(), "resolving template");

    if let Ok(Part::Expr(expr)) = parts.iter().exactly_one() {
        return match expression::eval(expr, model, scope) {
            Some(Value::Null) | None => default,
            Some(value) => value,
        };
    }

    let mut out = String::new();
    for part in &parts {
        match part {
            Part::Text(text) => out.push_str(text),
            Part::Expr(expr) => out.push_str(&stringify(expression::eval(expr, model, scope))),
        }
    }
    Value::String(out)
}

fn stringify(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        // Containers render as compact JSON.
        Some(other) => serde_json::to_string(&other).unwrap_or_default(),
    }
}

/// Resolve a protocol property value: a `{"path": ...}` binding object
/// (with optional `default`), an interpolatable string, or a plain
/// literal. `None` means the property resolved to nothing.
pub fn resolve_value(prop: &Value, model: &Value, scope: &Scope) -> Option<Value> {
    match prop {
        Value::Object(map) => {
            if let Some(Value::String(path)) = map.get("path") {
                let found = store::get(model, &scope.resolve(path)).cloned();
                return match found {
                    Some(v) => Some(v),
                    None => map.get("default").cloned(),
                };
            }
            Some(prop.clone())
        }
        Value::String(text) => match resolve_string(text, model, scope) {
            Value::Null => None,
            value => Some(value),
        },
        _ => Some(prop.clone()),
    }
}

/// Resolve a property expected to be numeric; falls back on mismatch.
pub fn resolve_number(prop: &Value, model: &Value, scope: &Scope, default: f64) -> f64 {
    resolve_value(prop, model, scope)
        .and_then(|v| as_f64(&v))
        .unwrap_or(default)
}

/// Resolve a property expected to be boolean; accepts `"true"`/`"false"`
/// strings, falls back on mismatch.
pub fn resolve_boolean(prop: &Value, model: &Value, scope: &Scope, default: bool) -> bool {
    match resolve_value(prop, model, scope) {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => match s.as_str() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Resolve a property expected to be text; falls back when absent or null.
pub fn resolve_text(prop: &Value, model: &Value, scope: &Scope, default: &str) -> String {
    match resolve_value(prop, model, scope) {
        None | Some(Value::Null) => default.to_string(),
        Some(value) => stringify(Some(value)),
    }
}
