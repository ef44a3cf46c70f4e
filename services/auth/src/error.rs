//! Credential gate error kinds

use common::error::DatabaseError;
use thiserror::Error;

/// Errors produced while authenticating an admin or checking a token
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown username or wrong password. Both cases share this variant and
    /// its message so callers cannot tell which usernames exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bad signature, malformed token, or missing claims
    #[error("invalid token")]
    InvalidToken,

    /// Signature is fine but `exp` has passed
    #[error("token expired")]
    TokenExpired,

    /// Password digest could not be produced or parsed
    #[error("password hashing error: {0}")]
    Hashing(String),

    /// Token could not be signed
    #[error("token signing error: {0}")]
    Token(#[source] jsonwebtoken::errors::Error),

    /// Configuration is missing or unusable
    #[error("auth configuration error: {0}")]
    Configuration(String),

    /// Underlying storage failed
    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

/// Type alias for results of the credential gate
pub type AuthResult<T> = Result<T, AuthError>;
