/// Error types for the feed service
///
/// Every fallible operation funnels into `AppError`, which maps onto the HTTP
/// taxonomy the API documents: validation failures are 400, credential
/// failures are a uniform 400, ownership/token failures are 401, missing
/// entities are 404, duplicate unique keys are 409, and everything coming out
/// of the infrastructure is a 500 whose detail is logged but never serialized
/// into the response body.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for feed-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Uniform login failure, no user-enumeration signal
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing/invalid token or ownership violation
    #[error("{0}")]
    Unauthorized(String),

    /// Referenced entity absent
    #[error("{0}")]
    NotFound(String),

    /// Duplicate unique key
    #[error("{0}")]
    Conflict(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Unexpected infrastructure failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Persistence/infrastructure detail stays server-side.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("{}", self);
            "Server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(serde_json::json!({
            "message": message,
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            return AppError::Conflict("Resource already exists".to_string());
        }
        AppError::Database(err.to_string())
    }
}

/// Postgres unique-constraint violation (SQLSTATE 23505). The reaction toggle
/// and the registration path both key their conflict handling off this.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}
