//! # Place Errors

use thiserror::Error;

use crate::store::StoreError;
use crate::validation::FieldErrors;

/// Result type for place and review operations
pub type PlaceResult<T> = Result<T, PlaceError>;

/// Errors from adding reviews and reading places
#[derive(Debug, Error)]
pub enum PlaceError {
    /// One or more fields failed validation
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    /// No place with the requested id
    #[error("Not found.")]
    PlaceNotFound,

    /// The caller already reviewed this place
    #[error("You have already reviewed this place.")]
    DuplicateReview,

    /// A place with the same name and address (ignoring case) exists
    #[error("A place with this name and address already exists.")]
    PlaceConflict,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl PlaceError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PlaceError::Validation(_) => 400,
            PlaceError::PlaceNotFound => 404,
            PlaceError::DuplicateReview => 409,
            PlaceError::PlaceConflict => 409,
            PlaceError::Store(e) => e.status_code(),
        }
    }

    /// Field-level details, when the error carries them
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            PlaceError::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<FieldErrors> for PlaceError {
    fn from(fields: FieldErrors) -> Self {
        PlaceError::Validation(fields)
    }
}

impl From<rusqlite::Error> for PlaceError {
    fn from(err: rusqlite::Error) -> Self {
        PlaceError::Store(StoreError::from(err))
    }
}
