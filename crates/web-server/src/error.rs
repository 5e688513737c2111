use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::ValidationError;
use database::DbError;
use serde_json::json;
use thiserror::Error;

/// Message returned for every fault the caller cannot fix.
const INTERNAL_MESSAGE: &str = "Server error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("School already exists with this name and address")]
    Conflict,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Database error: {0}")]
    Database(DbError),
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Duplicate => AppError::Conflict,
            other => AppError::Database(other),
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            // Reported as 400, not 409; clients already match on it.
            AppError::Conflict => (StatusCode::BAD_REQUEST, AppError::Conflict.to_string()),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                AppError::MethodNotAllowed.to_string(),
            ),
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            AppError::Io(io_err) => {
                tracing::error!(error = ?io_err, "File system error.");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_becomes_conflict_with_bad_request_status() {
        let err = AppError::from(DbError::Duplicate);
        assert!(matches!(err, AppError::Conflict));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_faults_are_internal_errors() {
        let err = AppError::from(DbError::ConnectionConfigError("DATABASE_URL must be set.".into()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::from(std::io::Error::other("disk full"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_and_method_statuses() {
        let err = AppError::from(ValidationError::InvalidEmail);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::MethodNotAllowed.into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
