/*!
 * Error types for the lexistore crate.
 *
 * This module contains custom error types for different parts of the store,
 * using the thiserror crate for ergonomic error definitions. Every error is
 * local to a single operation; no cross-operation error state is retained.
 */

use thiserror::Error;

/// A single input field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field ("key", "locale", "value" or "context")
    pub field: &'static str,

    /// Human-readable message for the field
    pub message: String,
}

impl FieldError {
    /// Create a required-field error with the standard message text
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            message: format!("The {} field is required.", field),
        }
    }
}

/// Rejected write input; no partial write occurs when this is raised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed")]
pub struct ValidationError {
    /// One entry per offending field, in request-field order
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    /// Create a validation error from the collected field errors
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self { fields }
    }
}

/// Lookup or delete targeted an id with no live record
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No live translation record with id {id}")]
pub struct NotFoundError {
    /// The id that did not resolve
    pub id: i64,
}

/// Transient failure against durable storage; not retried by the core
#[derive(Error, Debug)]
#[error("Store failure: {0}")]
pub struct StoreError(#[from] pub anyhow::Error);

/// Failure inside a cache implementation.
///
/// Deliberately not part of [`CoreError`]: the query engine logs and ignores
/// cache failures and falls back to the store, so this error never crosses
/// an operation boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cache unavailable: {0}")]
pub struct CacheError(pub String);

/// Errors raised by the authentication collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No token was presented at all
    #[error("Missing bearer token")]
    MissingToken,

    /// The presented token does not match any issued token
    #[error("Unrecognized bearer token")]
    InvalidToken,
}

/// Operation-level error type that wraps all other errors
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected input on upsert
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Missing live record on delete or lookup
    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Durable-storage failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Authentication failure before the core operation runs
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}
