use thiserror::Error;

/// Errors that can occur during user store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Transport or query failure reported by the backend, carried verbatim.
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Expected a single item, instead found: {count}")]
    NotUnique { count: usize },
    #[error("The conditional request failed")]
    ConditionFailed,
    #[error("The user has no credits to spend :(")]
    InsufficientCredits,
    #[error("{0}")]
    BadInput(String),
    #[error("Couldn't get a user for sessionid: {0}")]
    UnknownSession(String),
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// Rejected invocation event. The detail is for logs, not the message.
    #[error("bad event")]
    BadEvent(String),
}

/// Result type for user store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
