use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use verkefni_core::error::CoreError;
use verkefni_db::error::RepoError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `verkefni_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Core(core) => AppError::Core(core),
            RepoError::Database(db) => AppError::Database(db),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Validation failures have their own wire shape: a bare
            // array of { field, error } objects.
            AppError::Core(CoreError::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, axum::Json(errors)).into_response()
            }

            AppError::Core(CoreError::NotFound { entity, id }) => {
                let body = json!({
                    "error": format!("{entity} with id {id} not found"),
                    "code": "NOT_FOUND",
                });
                (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
            }

            AppError::Database(err) => {
                let (status, code, message) = classify_sqlx_error(&err);
                let body = json!({
                    "error": message,
                    "code": code,
                });
                (status, axum::Json(body)).into_response()
            }
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message; the real
///   error goes to the log, not the client.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
