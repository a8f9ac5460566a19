//! Immutable, path-addressable store over `serde_json::Value`.
//!
//! Mutators never touch the input model: they path-copy down to the
//! addressed leaf and return a new root. Absence is `None` at the API
//! surface; `Value::Null` is an ordinary settable value.

use serde_json::{Map, Value};

use crate::pointer::parse_json_pointer;

/// Read the value at `path`. The root path returns the whole model.
///
/// Array segments must parse as a non-negative in-bounds index; walking
/// through a scalar or `null` short-circuits to `None`. Never panics.
pub fn get<'a>(model: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = model;
    for segment in parse_json_pointer(path) {
        current = match current {
            Value::Object(map) => map.get(&segment)?,
            Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Write `value` at `path`, returning the new model root.
///
/// `None` deletes: an object entry is removed, an array element is spliced
/// out (the array shrinks by one). Missing intermediate segments are
/// created as objects when setting. At the root, only a container value
/// replaces the model; `None` resets to an empty object and a scalar is a
/// no-op.
pub fn set(model: &Value, path: &str, value: Option<Value>) -> Value {
    let segments = parse_json_pointer(path);
    if segments.is_empty() {
        return match value {
            Some(root @ (Value::Object(_) | Value::Array(_))) => root,
            None => Value::Object(Map::new()),
            Some(_) => model.clone(),
        };
    }
    set_at(model, &segments, &value)
}

fn set_at(current: &Value, segments: &[String], value: &Option<Value>) -> Value {
    let Some((head, rest)) = segments.split_first() else {
        // Addressed leaf; deletes are handled one level up, in the parent.
        return value.clone().unwrap_or(Value::Null);
    };
    match current {
        Value::Object(map) => {
            let mut next = map.clone();
            if rest.is_empty() {
                match value {
                    Some(v) => {
                        next.insert(head.clone(), v.clone());
                    }
                    None => {
                        next.remove(head);
                    }
                }
            } else {
                match map.get(head) {
                    Some(child) => {
                        next.insert(head.clone(), set_at(child, rest, value));
                    }
                    None if value.is_some() => {
                        let empty = Value::Object(Map::new());
                        next.insert(head.clone(), set_at(&empty, rest, value));
                    }
                    // Deleting below a missing entry leaves the model as-is.
                    None => {}
                }
            }
            Value::Object(next)
        }
        Value::Array(arr) => match head.parse::<usize>() {
            Ok(idx) if idx < arr.len() => {
                let mut next = arr.clone();
                if rest.is_empty() {
                    match value {
                        Some(v) => next[idx] = v.clone(),
                        None => {
                            next.remove(idx);
                        }
                    }
                } else {
                    next[idx] = set_at(&arr[idx], rest, value);
                }
                Value::Array(next)
            }
            // Out-of-range or non-numeric index: this branch stays unchanged.
            _ => current.clone(),
        },
        _ => {
            if value.is_none() {
                return current.clone();
            }
            // Scalar in the middle of the path gives way to a fresh object.
            set_at(&Value::Object(Map::new()), segments, value)
        }
    }
}

/// Shallow-merge `data`'s keys over the object at `path` and write the
/// result back. A missing or non-object target is treated as `{}`.
pub fn merge(model: &Value, path: &str, data: &Map<String, Value>) -> Value {
    let mut target = match get(model, path) {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };
    for (key, value) in data {
        target.insert(key.clone(), value.clone());
    }
    set(model, path, Some(Value::Object(target)))
}
