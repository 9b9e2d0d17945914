//! Domain Layer - Errors
//!
//! Error taxonomy shared by every layer. The commands layer converts these
//! into user-facing messages; nothing propagates past that boundary.

use serde::{Deserialize, Serialize};

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    /// Required input missing or malformed; caught before any request is sent
    Validation(String),
    /// Transport-level failure (connect, timeout, body read)
    Network(String),
    /// A protected endpoint rejected the session cookie
    Unauthorized(String),
    /// The public item list is private and needs a login to view
    ListPrivate,
    /// The backend rejected the operation with a message of its own
    Backend(String),
    NotFound(String),
    /// Workflow misuse, e.g. an illegal edit-flow transition
    Conflict(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Network(msg) => write!(f, "Network error: {}", msg),
            DomainError::Unauthorized(msg) => write!(f, "Not logged in: {}", msg),
            DomainError::ListPrivate => {
                write!(f, "This ledger is not public; log in to view it")
            }
            DomainError::Backend(msg) => write!(f, "Backend error: {}", msg),
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
