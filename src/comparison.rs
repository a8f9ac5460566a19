use std::cmp::Ordering;

use serde_json::Value;

/// Numeric-aware comparison used by the check builtins. Strings compare
/// lexicographically, booleans as `false < true`; everything else is
/// coerced through `as_f64`. Non-coercible operands do not compare.
pub fn cmp_loose(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(sa), Value::String(sb)) => Some(sa.cmp(sb)),
        (Value::Bool(ba), Value::Bool(bb)) => Some(ba.cmp(bb)),
        _ => match (as_f64(a), as_f64(b)) {
            (Some(da), Some(db)) => da.partial_cmp(&db),
            _ => None,
        },
    }
}

pub fn loose_eq(a: &Value, b: &Value) -> bool {
    a == b || matches!(cmp_loose(a, b), Some(Ordering::Equal))
}

/// Numbers pass through; numeric strings coerce.
pub fn as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Null, `""`, `[]` and `{}` are empty. Numbers and booleans never are,
/// so `false` and `0` count as present values.
pub fn is_empty(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(m) => m.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Length of a string (in chars) or an array; other values have none.
pub fn length_of(v: &Value) -> Option<usize> {
    match v {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(a) => Some(a.len()),
        _ => None,
    }
}
