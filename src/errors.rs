use thiserror::Error;

// Errors for the fallible public entry points (CLI input, rule files).
// Resolving or validating declarative content never errors; malformed
// bindings degrade to defaults instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid input: {0}")]
    Input(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
