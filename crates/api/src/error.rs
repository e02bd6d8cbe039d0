use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use plantdx_core::error::CoreError;
use plantdx_db::DbError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as the standard envelope
/// `{ "success": false, "message", "error", "code" }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `plantdx_core` (validation, readiness).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage operation failed. `message` is the operation-level summary
    /// shown to clients; `detail` carries the underlying error text.
    #[error("{message}: {detail}")]
    Persistence {
        message: &'static str,
        detail: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// A handler panicked; the payload text is kept for the log only.
    #[error("Internal server error")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Map a store error into a persistence failure with the given summary.
    ///
    /// ```ignore
    /// store.find_all().await.map_err(AppError::persistence(RETRIEVE_FAILED))?;
    /// ```
    pub fn persistence(message: &'static str) -> impl FnOnce(DbError) -> Self {
        move |err| Self::Persistence {
            message,
            detail: err.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Core(CoreError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Core(CoreError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Core(CoreError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, error) = match &self {
            AppError::Core(CoreError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                self.to_string(),
            ),
            AppError::Core(CoreError::NotReady) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "NOT_READY",
                self.to_string(),
                self.to_string(),
            ),
            AppError::Persistence { message, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PERSISTENCE_ERROR",
                message.to_string(),
                detail.clone(),
            ),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                self.to_string(),
                self.to_string(),
            ),
            AppError::Internal(panic) => {
                tracing::error!(panic = %panic, "Handler panicked");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    self.to_string(),
                    self.to_string(),
                )
            }
        };

        if status.is_server_error() {
            tracing::error!(code, error = %error, "{message}");
        } else {
            tracing::warn!(code, error = %error, "{message}");
        }

        let body = json!({
            "success": false,
            "message": message,
            "error": error,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
