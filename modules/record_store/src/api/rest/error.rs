//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    pub message: String,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<StoreError> for Problem {
    fn from(error: StoreError) -> Self {
        map_domain_error(error)
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: StoreError) -> Problem {
    match error {
        StoreError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error", message)
        }

        StoreError::NotFound { resource, id } => Problem::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            format!("{} with id '{}' was not found", resource, id),
        ),

        StoreError::Unauthorized { message } => {
            Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized", message)
        }

        StoreError::Forbidden => Problem::new(
            StatusCode::FORBIDDEN,
            "Forbidden",
            "administrator role required",
        ),

        StoreError::Conflict { reason } => Problem::new(StatusCode::CONFLICT, "Conflict", reason),

        StoreError::InsufficientStock {
            recording_id,
            requested,
            available,
        } => Problem::new(
            StatusCode::CONFLICT,
            "Insufficient Stock",
            format!(
                "recording {} has {} in stock, {} requested",
                recording_id, available, requested
            ),
        ),

        StoreError::Internal => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "An unexpected error occurred",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_are_distinct() {
        assert_eq!(
            map_domain_error(StoreError::unauthorized("missing token")).status,
            401
        );
        assert_eq!(map_domain_error(StoreError::Forbidden).status, 403);
    }

    #[test]
    fn test_internal_error_hides_details() {
        let problem = map_domain_error(StoreError::Internal);
        assert_eq!(problem.status, 500);
        assert_eq!(problem.message, "An unexpected error occurred");
    }

    #[test]
    fn test_problem_serializes_message() {
        let json = serde_json::to_value(map_domain_error(StoreError::validation("empty cart")))
            .unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["message"], "empty cart");
        assert_eq!(json["type"], "https://httpstatuses.io/400");
    }
}
