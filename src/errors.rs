use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::{DbErr, SqlErr};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "error": "Conflict",
    "code": "insufficient_funds",
    "message": "Insufficient funds for account 1234567890",
    "requestId": "req-abc123xyz",
    "timestamp": "2024-12-09T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Unauthorized")
    #[schema(example = "Not Found")]
    pub error: String,
    /// Stable machine-readable error code
    #[schema(example = "account_not_found")]
    pub code: String,
    /// Human-readable error description
    #[schema(example = "Account not found: 1234567890")]
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Request identifier for support and debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "req-abc123xyz")]
    pub request_id: Option<String>,
    /// RFC 3339 timestamp when the error occurred
    #[schema(example = "2024-12-09T10:30:00.000Z")]
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Invalid PIN")]
    InvalidPin,

    #[error("Insufficient funds for account {0}")]
    InsufficientFunds(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    #[error("Hash error: {0}")]
    HashError(String),

}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::ValidationError(rejection.body_text())
    }
}

impl From<argon2::password_hash::Error> for ServiceError {
    fn from(err: argon2::password_hash::Error) -> Self {
        ServiceError::HashError(err.to_string())
    }
}

impl ServiceError {
    /// Maps a failed insert to `DuplicateAccount` when the unique index on the
    /// account number rejected it, otherwise keeps the database error.
    pub fn from_insert_error(err: DbErr, account_number: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ServiceError::DuplicateAccount(account_number.to_string())
            }
            _ => ServiceError::DatabaseError(err),
        }
    }

    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AccountNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidPin => StatusCode::UNAUTHORIZED,
            Self::InsufficientFunds(_) => StatusCode::CONFLICT,
            Self::ValidationError(_) | Self::DuplicateAccount(_) => StatusCode::BAD_REQUEST,
            Self::DatabaseError(_) | Self::HashError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code; distinguishes errors that share a status.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "account_not_found",
            Self::InvalidPin => "invalid_pin",
            Self::InsufficientFunds(_) => "insufficient_funds",
            Self::ValidationError(_) => "validation_failed",
            Self::DuplicateAccount(_) => "duplicate_account",
            Self::DatabaseError(_) | Self::HashError(_) => "internal_error",
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::HashError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed with internal error");
        }

        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            code: self.error_code().to_string(),
            message: self.response_message(),
            details: None,
            request_id: current_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}
