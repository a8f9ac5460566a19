//! Data-model and expression resolution engine for server-driven UI trees.
//!
//! Protocol messages describe components whose properties are literals or
//! *bindings* into a shared hierarchical data model: JSON-Pointer-like
//! paths (absolute or scope-relative), text with embedded `${...}`
//! expressions, and declarative validation rules. This crate is the
//! resolution core behind those bindings:
//!
//! - [`pointer`] — path parsing, normalizing, joining, scoped resolution
//! - [`store`] — immutable get/set/merge/delete at a path over JSON values
//! - [`lexer`] — tokenizer for interpolatable text
//! - [`engine`] — full-string resolution and typed property conveniences
//! - [`checks`] — rule-tree validation with `and`/`or` combinators
//! - [`functions`] — the pluggable check-function registry
//!
//! Malformed declarative content never errors: resolution degrades to
//! defaults so a broken binding cannot take down a rendering pipeline.

pub mod checks;
pub mod context;
pub mod engine;
pub mod errors;
pub mod functions; // plugin model
pub mod lexer;
pub mod pointer;
pub mod store;

mod comparison;
mod expression;

use serde_json::Value;

pub use checks::{CheckRule, ValidationResult};
pub use context::Scope;
pub use engine::{
    resolve_boolean, resolve_number, resolve_string, resolve_string_or, resolve_text,
    resolve_value,
};
pub use errors::{EngineError, Result};
pub use functions::{CheckFunction, Registry};
pub use lexer::{tokenize, Token, TokenKind};
pub use store::{get, merge, set};

/// Resolution facade owning a check-function registry, for hosts that
/// register custom functions alongside the builtins.
pub struct Resolver {
    registry: Registry,
}

impl Resolver {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn resolve_string(&self, text: &str, model: &Value, scope: &Scope) -> Value {
        engine::resolve_string(text, model, scope)
    }

    pub fn resolve_string_or(
        &self,
        text: &str,
        model: &Value,
        scope: &Scope,
        default: Value,
    ) -> Value {
        engine::resolve_string_or(text, model, scope, default)
    }

    pub fn evaluate_checks(
        &self,
        rules: &[CheckRule],
        model: &Value,
        scope: &Scope,
    ) -> ValidationResult {
        checks::evaluate_checks(rules, model, scope, &self.registry)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Registry::with_builtins())
    }
}

/// Convenience: evaluate rules with the built-in check functions only.
pub fn evaluate_checks(rules: &[CheckRule], model: &Value, scope: &Scope) -> ValidationResult {
    checks::evaluate_checks(rules, model, scope, &Registry::with_builtins())
}
