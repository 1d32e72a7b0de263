use thiserror::Error;

pub type Result<T> = std::result::Result<T, DebugError>;

/// Failures reported by the breakpoint subsystem. Every variant carries a
/// ready-to-print message; nothing here aborts the interpreter.
#[derive(Debug, Error, PartialEq)]
pub enum DebugError {
    /// A routine, class or file name could not be resolved.
    #[error("{0}")]
    NotFound(String),

    /// Clause ordering violations, malformed clauses, wrong argument counts.
    #[error("{0}")]
    InvalidSyntax(String),

    /// A breakpoint condition that does not parse or is not allowed.
    #[error("{0}")]
    InvalidCondition(String),
}

impl DebugError {
    pub fn not_found(message: impl Into<String>) -> Self {
        DebugError::NotFound(message.into())
    }

    pub fn invalid_syntax(message: impl Into<String>) -> Self {
        DebugError::InvalidSyntax(message.into())
    }

    pub fn invalid_condition(message: impl Into<String>) -> Self {
        DebugError::InvalidCondition(message.into())
    }
}
