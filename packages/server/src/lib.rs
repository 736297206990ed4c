//! Image ingestion service for the photo-rating widget: a batch sync
//! endpoint polling the media host, and a signed webhook endpoint for
//! per-upload events. Both drive the same pipeline: normalize a display
//! name from the filename, resolve a short biography title, and upsert
//! a pre-approved face record keyed by the bare image URL.

pub mod clients;
pub mod config;
pub mod enrich;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FaceSync Ingestion API",
        version = "1.0.0",
        description = "Ingests and enriches face images from the media host"
    ),
    paths(handlers::sync::sync_assets, handlers::webhook::receive_webhook),
    tags(
        (name = "Ingestion", description = "Batch sync and webhook ingestion"),
    )
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .nest("/api", routes::api_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
