//! Contract error types for the record store
//!
//! These errors are transport-agnostic; the REST layer maps them to status codes.

use thiserror::Error;

/// Record store domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Malformed or incomplete input
    #[error("Validation error: {message}")]
    Validation {
        /// User-facing explanation
        message: String,
    },
    /// Referenced entity does not exist
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (store, recording, order, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// No identity, or the identity could not be verified
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Reason shown to the caller
        message: String,
    },
    /// Identity is valid but lacks the required role
    #[error("Forbidden: administrator role required")]
    Forbidden,
    /// Request conflicts with current state (duplicates, referenced rows, transitions)
    #[error("Conflict: {reason}")]
    Conflict {
        /// Conflict reason
        reason: String,
    },
    /// Checkout asked for more units than the store holds
    #[error("Insufficient stock for recording {recording_id}: requested {requested}, available {available}")]
    InsufficientStock {
        recording_id: i32,
        requested: i32,
        available: i32,
    },
    /// Storage or other infrastructure failure
    #[error("Internal error")]
    Internal,
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }
}
