pub mod sync;
pub mod webhook;

use crate::error::AppError;

/// Fallback for unsupported HTTP methods on registered routes, keeping
/// the error body JSON like every other response.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
