//! Error types for engine operations

use std::fmt;

/// Errors that can occur while configuring the engine or parsing input
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Dialect not found in registry
    DialectNotFound(String),
    /// Invalid engine or builder configuration
    Config(String),
    /// Input does not have the structure the dialect requires
    Structure(String),
    /// Dialect does not support the requested operation
    NotSupported(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::DialectNotFound(name) => write!(f, "Dialect '{name}' not found"),
            EngineError::Config(msg) => write!(f, "Configuration error: {msg}"),
            EngineError::Structure(msg) => write!(f, "Malformed input: {msg}"),
            EngineError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
