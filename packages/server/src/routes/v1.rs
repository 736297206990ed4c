use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/sync",
            get(handlers::sync::sync_assets)
                .post(handlers::sync::sync_assets)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/webhook",
            post(handlers::webhook::receive_webhook).fallback(handlers::method_not_allowed),
        )
}
