//! Error types for the key-value store
//!
//! Provides unified error handling using thiserror. Data operations on the
//! store never fail; errors only come from construction parameters and from
//! the command interpreter.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the store and its command shell.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A construction parameter was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The interpreter did not recognise the command verb
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A known command was given the wrong number of arguments
    #[error("Wrong number of arguments for {command}: expected {expected}, got {got}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the store.
pub type Result<T> = std::result::Result<T, StoreError>;
