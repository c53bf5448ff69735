//! Error types for the Category actor.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during category operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(String),

    #[error("Category already exists: {0}")]
    Duplicate(String),

    #[error("Invalid category name: {0}")]
    InvalidName(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CategoryError {
    fn from(msg: String) -> Self {
        CategoryError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for CategoryError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => CategoryError::NotFound(id),
            FrameworkError::AlreadyExists(id) => CategoryError::Duplicate(id),
            FrameworkError::Rejected(msg) => CategoryError::InvalidName(msg),
            other => CategoryError::ActorCommunicationError(other.to_string()),
        }
    }
}
