use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error body for authorization and method failures: `{ "error": ... }`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable error description.
    #[schema(example = "Invalid sync token")]
    pub error: String,
}

/// Error body for internal failures: `{ "ok": false, "error": ... }`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FailureBody {
    #[schema(example = false)]
    pub ok: bool,
    /// Upstream or configuration error text.
    pub error: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Request used an HTTP method the endpoint doesn't support.
    MethodNotAllowed,
    /// Batch sync token missing or mismatched.
    InvalidSyncToken,
    /// Webhook signature missing, stale, or mismatched.
    InvalidSignature,
    /// A required secret/URL/key is absent for the invoked operation.
    Config(String),
    /// An upstream lookup or write returned a non-success response.
    Upstream(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidSyncToken | AppError::InvalidSignature => StatusCode::UNAUTHORIZED,
            AppError::Config(_) | AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message, also used for per-asset error reporting
    /// in batch summaries.
    pub fn message(&self) -> String {
        match self {
            AppError::MethodNotAllowed => "Method not allowed".into(),
            AppError::InvalidSyncToken => "Invalid sync token".into(),
            AppError::InvalidSignature => "Invalid webhook signature".into(),
            AppError::Config(msg) | AppError::Upstream(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", self.message());
            (
                status,
                Json(FailureBody {
                    ok: false,
                    error: self.message(),
                }),
            )
                .into_response()
        } else {
            (
                status,
                Json(ErrorBody {
                    error: self.message(),
                }),
            )
                .into_response()
        }
    }
}
