//! Error kinds for the API service and their HTTP status mapping

use auth::AuthError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ApiResponse;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed id, body, or missing field
    #[error("{0}")]
    Validation(String),

    /// Login rejected
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, forged, or expired bearer token
    #[error("{0}")]
    InvalidToken(String),

    /// Addressed record does not exist
    #[error("{0}")]
    NotFound(String),

    /// A count cap would be exceeded
    #[error("{0}")]
    LimitReached(String),

    /// Storage failure
    #[error("{0}")]
    Database(DatabaseError),

    /// Internal server error
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::LimitReached(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(_) => ApiError::NotFound(err.to_string()),
            other => ApiError::Database(other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::InvalidToken => ApiError::InvalidToken("Invalid token".to_string()),
            AuthError::TokenExpired => {
                warn!("Rejected expired token");
                ApiError::InvalidToken("Invalid token".to_string())
            }
            AuthError::Storage(e) => ApiError::from(e),
            other => {
                error!("Authentication failure: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::Validation("Invalid request body".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (status, ApiResponse::failure(self.to_string())).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Parse a numeric path segment, naming the entity in the error
pub fn parse_id(raw: &str, entity: &str) -> ApiResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::Validation(format!("Invalid {} ID", entity)))
}
