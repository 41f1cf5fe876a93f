//! Error taxonomy shared by all hall operations.

use thiserror::Error;

/// Errors reported by registration, lookup, and table lifecycle operations.
///
/// Every failure carries a machine-checkable kind and a human-readable
/// message. Nothing is retried internally; retry is a caller concern.
#[derive(Debug, Error)]
pub enum HallError {
    /// Malformed or missing input (nickname length, negative score, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Nickname already registered.
    #[error("nickname already exists")]
    DuplicateNickname,

    /// Unknown nickname or table number.
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation attempted against a table not in the required lifecycle state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Underlying persistence error, opaque cause.
    #[error("storage failure: {0}")]
    Store(#[from] sqlx::Error),
}

impl HallError {
    /// Stable kind tag for transport layers that match on error class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::DuplicateNickname => "duplicate_nickname",
            Self::NotFound(_) => "not_found",
            Self::InvalidState(_) => "invalid_state",
            Self::Store(_) => "store_failure",
        }
    }

    /// Get a client-safe error message that doesn't leak sensitive information.
    ///
    /// Store errors are sanitized to avoid exposing SQL details.
    pub fn client_message(&self) -> String {
        match self {
            Self::Store(_) => "internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for hall operations.
pub type HallResult<T> = Result<T, HallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_are_sanitized_for_clients() {
        let err = HallError::Store(sqlx::Error::PoolClosed);
        assert_eq!(err.kind(), "store_failure");
        assert_eq!(err.client_message(), "internal server error");
    }

    #[test]
    fn domain_errors_keep_their_message() {
        let err = HallError::InvalidState("table 3 is occupied".to_string());
        assert_eq!(err.kind(), "invalid_state");
        assert_eq!(err.client_message(), "invalid state: table 3 is occupied");
    }
}
