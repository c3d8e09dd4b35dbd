//! Error types for Cumulus
//!
//! The variants map 1:1 onto the client-facing error codes the service
//! facade surfaces verbatim; the message is the full client-visible text.

use thiserror::Error;

/// Core error type for Cumulus operations
#[derive(Error, Debug)]
pub enum CumulusError {
    /// Malformed or missing required fields, duplicate names
    #[error("{0}")]
    Validation(String),

    /// Referenced entity absent on update/delete
    #[error("{0}")]
    NotFound(String),

    /// Cross-resource reference does not resolve
    #[error("{0}")]
    Client(String),

    /// Collaborator failure the caller cannot act on
    #[error("{0}")]
    Internal(String),
}

impl CumulusError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a client error
    pub fn client(msg: impl Into<String>) -> Self {
        Self::Client(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Client-facing error code, returned to callers exactly as written here
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::NotFound(_) => "NotFoundError",
            Self::Client(_) => "ClientException",
            Self::Internal(_) => "ServerException",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CumulusError::validation("x").code(), "ValidationError");
        assert_eq!(CumulusError::not_found("x").code(), "NotFoundError");
        assert_eq!(CumulusError::client("x").code(), "ClientException");
        assert_eq!(CumulusError::internal("x").code(), "ServerException");
    }

    #[test]
    fn test_error_message_is_verbatim() {
        let err = CumulusError::client("Compute environment arn:aws:batch:eu-central-1:123456789012:compute-environment/missing does not exist");
        assert!(err.to_string().starts_with("Compute environment"));
    }
}
