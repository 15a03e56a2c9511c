use thiserror::Error;

/// Message returned for every failed credential check.
///
/// Unknown email, wrong password and inactive account all collapse into it.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Unable to authenticate with provided credentials.";

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Rejected input at the identity-store boundary (e.g. missing email).
    #[error("{0}")]
    InvalidInput(String),

    /// A field value collides with an existing record.
    #[error("{field}: {message}")]
    Conflict {
        field: &'static str,
        message: String,
    },

    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Store-level constraint violation that slipped past application checks.
    #[error("Integrity error: {0}")]
    Integrity(String),

    #[error("Database error: {0}")]
    Storage(String),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_storage_errors_are_transient() {
        assert!(DomainError::Storage("connection reset".into()).is_transient());
        assert!(!DomainError::Integrity("UNIQUE constraint failed".into()).is_transient());
        assert!(!DomainError::InvalidCredentials.is_transient());
        assert!(!DomainError::InvalidInput("bad".into()).is_transient());
    }
}
