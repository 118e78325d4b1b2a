//! Error types for the access decision engine

use crate::attribute::Attribute;
use thiserror::Error;

/// Access decision engine errors
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid hierarchy or voter configuration
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    /// Attribute tag outside the known set
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    /// Access check failed in `enforce`
    ///
    /// Carries the attribute and subject id for logs only; voter reasoning
    /// is never attached.
    #[error("Access denied: {attribute} on {}", .subject.as_deref().unwrap_or("<none>"))]
    AccessDenied {
        attribute: Attribute,
        subject: Option<String>,
    },

    /// Configuration (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthzError {
    /// Whether this is the expected negative outcome of an access check
    pub fn is_access_denied(&self) -> bool {
        matches!(self, AuthzError::AccessDenied { .. })
    }
}

/// Result type for access decision operations
pub type Result<T> = std::result::Result<T, AuthzError>;
