//! Error types for Todo Web.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Todo not found: id {0}")]
    NotFound(i64),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Request-level error, converted directly into an HTTP response.
///
/// Validation failures are not errors — the write handlers re-render the
/// form instead. This type covers the two terminal outcomes: a missing
/// row (404) and a store failure (500).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound | AppError::Database(DatabaseError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                Html("<h1>Not Found</h1>".to_string()),
            )
                .into_response(),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Something went wrong</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for request handlers.
pub type Result<T> = std::result::Result<T, AppError>;
