//! Error types for authenticator-core.
//!
//! The diff engine is total and never produces these; they come from the
//! token model, the token store, and reducer transitions.

use thiserror::Error;

use crate::id::PersistentId;

/// Errors that can occur while building tokens or driving the app state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthenticatorError {
    /// The text is not a well-formed `otpauth://` URL
    #[error("invalid otpauth url: {0}")]
    InvalidUrl(String),

    /// The secret is not valid base32
    #[error("invalid secret: {0}")]
    InvalidSecret(String),

    /// Generator parameters are out of range
    #[error("invalid generator: {0}")]
    InvalidGenerator(String),

    /// No stored token carries the identifier
    #[error("token not found: {0}")]
    TokenNotFound(PersistentId),

    /// An index does not address an element of the token list
    #[error("index {index} out of bounds for {len} token(s)")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of stored tokens
        len: usize,
    },

    /// A state machine received an action that does not apply to its current child state
    #[error("bad child state: {0}")]
    BadChildState(&'static str),

    /// A platform-backed [`TokenStore`](crate::store::TokenStore) rejected the operation
    #[error("token store failure: {0}")]
    Store(String),
}

/// Result type alias for authenticator operations.
pub type AuthResult<T> = Result<T, AuthenticatorError>;

impl AuthenticatorError {
    /// Create an invalid-url error with a message.
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Create an invalid-generator error with a message.
    pub fn invalid_generator(msg: impl Into<String>) -> Self {
        Self::InvalidGenerator(msg.into())
    }

    /// Create a store error from whatever a platform store failed with.
    pub fn store(err: impl std::fmt::Display) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<data_encoding::DecodeError> for AuthenticatorError {
    fn from(err: data_encoding::DecodeError) -> Self {
        Self::InvalidSecret(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthenticatorError::IndexOutOfBounds { index: 4, len: 2 };
        assert_eq!(err.to_string(), "index 4 out of bounds for 2 token(s)");

        let err = AuthenticatorError::invalid_url("missing secret");
        assert_eq!(err.to_string(), "invalid otpauth url: missing secret");

        let err = AuthenticatorError::BadChildState("menu has no info child");
        assert_eq!(err.to_string(), "bad child state: menu has no info child");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthenticatorError>();
    }
}
