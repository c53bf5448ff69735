//! Error types for the User actor.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// No user is registered under the address.
    #[error("User not found: {0}")]
    NotFound(String),

    /// A user is already registered under the address.
    #[error("User already registered: {0}")]
    AlreadyRegistered(String),

    /// The user record was rejected by validation.
    #[error("User validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for UserError {
    fn from(msg: String) -> Self {
        UserError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for UserError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::AlreadyExists(id) => UserError::AlreadyRegistered(id),
            FrameworkError::Rejected(msg) => UserError::ValidationError(msg),
            other => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}
