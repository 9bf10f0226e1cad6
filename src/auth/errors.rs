//! # Auth Errors
//!
//! Error types for registration, login and token authentication.

use thiserror::Error;

use crate::store::StoreError;
use crate::validation::FieldErrors;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and registration errors
#[derive(Debug, Error)]
pub enum AuthError {
    // ==================
    // Request Errors
    // ==================
    /// One or more fields failed validation
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    // ==================
    // Login Errors
    // ==================
    /// No account for the given phone number
    #[error("user doesn't exist")]
    UserNotFound,

    /// Password did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    // ==================
    // Token Errors
    // ==================
    /// No credentials were supplied
    #[error("Authentication credentials were not provided.")]
    AuthenticationRequired,

    /// Token is malformed or unknown
    #[error("Invalid token.")]
    InvalidToken,

    /// Token belongs to a deactivated account
    #[error("User inactive or deleted.")]
    InactiveUser,

    // ==================
    // Internal Errors
    // ==================
    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::Validation(_) => 400,
            AuthError::WeakPassword(_) => 400,

            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,
            AuthError::AuthenticationRequired => 401,
            AuthError::InvalidToken => 401,
            AuthError::InactiveUser => 401,

            // 404 Not Found
            AuthError::UserNotFound => 404,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::Store(e) => e.status_code(),
        }
    }

    /// Field-level details, when the error carries them
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AuthError::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<FieldErrors> for AuthError {
    fn from(fields: FieldErrors) -> Self {
        AuthError::Validation(fields)
    }
}
