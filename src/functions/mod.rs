//! Pluggable check functions used by the validation engine.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::comparison::{as_f64, is_empty, length_of, loose_eq};

/// A named validation predicate, invoked with its resolved arguments.
pub trait CheckFunction: Send + Sync {
    fn name(&self) -> &'static str;
    fn call(&self, args: &Map<String, Value>) -> bool;
}

/// Thread-safe registry mapping protocol names to check functions.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<HashMap<&'static str, Arc<dyn CheckFunction>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut map: HashMap<&'static str, Arc<dyn CheckFunction>> = HashMap::new();
        // `isNotEmpty` is the protocol alias for `required`.
        map.insert("required", Arc::new(builtins::Required));
        map.insert("isNotEmpty", Arc::new(builtins::Required));
        map.insert("email", Arc::new(builtins::Email));
        map.insert("length", Arc::new(builtins::Length));
        map.insert("equals", Arc::new(builtins::Equals));
        map.insert("range", Arc::new(builtins::Range));
        Self {
            inner: Arc::new(map),
        }
    }

    pub fn register<F: CheckFunction + 'static>(&mut self, f: F) {
        let map = Arc::make_mut(&mut self.inner);
        map.insert(f.name(), Arc::new(f));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CheckFunction>> {
        self.inner.get(name).cloned()
    }
}

pub mod builtins {
    use super::*;

    /// Passes when `value` is a present, non-empty value. Registered as
    /// both `required` and `isNotEmpty`.
    pub struct Required;
    impl CheckFunction for Required {
        fn name(&self) -> &'static str {
            "required"
        }
        fn call(&self, args: &Map<String, Value>) -> bool {
            args.get("value").map(|v| !is_empty(v)).unwrap_or(false)
        }
    }

    /// Passes when `value` has a standard email shape: a single `@`, a
    /// non-empty local part, a dotted domain, no whitespace.
    pub struct Email;
    impl CheckFunction for Email {
        fn name(&self) -> &'static str {
            "email"
        }
        fn call(&self, args: &Map<String, Value>) -> bool {
            args.get("value")
                .and_then(Value::as_str)
                .map(is_email)
                .unwrap_or(false)
        }
    }

    fn is_email(s: &str) -> bool {
        let Some((local, domain)) = s.split_once('@') else {
            return false;
        };
        !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !s.contains(char::is_whitespace)
    }

    /// Passes when `value` (string chars or array elements) has a length
    /// within the optional `min`/`max` bounds.
    pub struct Length;
    impl CheckFunction for Length {
        fn name(&self) -> &'static str {
            "length"
        }
        fn call(&self, args: &Map<String, Value>) -> bool {
            let Some(len) = args.get("value").and_then(length_of) else {
                return false;
            };
            let len = len as f64;
            let above = args.get("min").and_then(as_f64).map_or(true, |m| len >= m);
            let below = args.get("max").and_then(as_f64).map_or(true, |m| len <= m);
            above && below
        }
    }

    /// Passes when `value` loosely equals `other` (numeric-aware).
    pub struct Equals;
    impl CheckFunction for Equals {
        fn name(&self) -> &'static str {
            "equals"
        }
        fn call(&self, args: &Map<String, Value>) -> bool {
            match (args.get("value"), args.get("other")) {
                (Some(a), Some(b)) => loose_eq(a, b),
                _ => false,
            }
        }
    }

    /// Passes when numeric `value` lies within the optional `min`/`max`.
    pub struct Range;
    impl CheckFunction for Range {
        fn name(&self) -> &'static str {
            "range"
        }
        fn call(&self, args: &Map<String, Value>) -> bool {
            let Some(value) = args.get("value").and_then(as_f64) else {
                return false;
            };
            let above = args.get("min").and_then(as_f64).map_or(true, |m| value >= m);
            let below = args.get("max").and_then(as_f64).map_or(true, |m| value <= m);
            above && below
        }
    }
}
