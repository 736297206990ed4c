use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use tracing::{instrument, warn};

use common::signature::constant_time_eq;
use common::text::normalize_name;

use crate::clients::store::{FaceRecord, UpsertOutcome};
use crate::error::{AppError, ErrorBody, FailureBody};
use crate::models::asset::AssetDescriptor;
use crate::models::sync::{SyncParams, SyncSummary};
use crate::state::AppState;

pub const SYNC_TOKEN_HEADER: &str = "x-sync-token";

/// Poll the media host and reconcile every listed image into the face
/// table. Assets are processed sequentially; a failing asset is
/// recorded in the summary and the batch continues.
#[utoipa::path(
    method(get, post),
    path = "/api/v1/sync",
    tag = "Ingestion",
    operation_id = "syncAssets",
    summary = "Batch-sync media host assets into the face table",
    params(SyncParams),
    responses(
        (status = 200, description = "Batch summary", body = SyncSummary),
        (status = 401, description = "Invalid sync token", body = ErrorBody),
        (status = 500, description = "Upstream or configuration failure", body = FailureBody),
    )
)]
#[instrument(skip(state, params, headers))]
pub async fn sync_assets(
    State(state): State<AppState>,
    Query(params): Query<SyncParams>,
    headers: HeaderMap,
) -> Result<Json<SyncSummary>, AppError> {
    authorize(&state, &params, &headers)?;

    let files = state.media.list_files(params.parsed_limit()).await?;
    let scanned = files.len();

    let assets: Vec<AssetDescriptor> = files
        .iter()
        .filter_map(AssetDescriptor::from_media_file)
        .filter(AssetDescriptor::is_image)
        .collect();

    let mut inserted = 0;
    let mut updated = 0;
    let mut failed = 0;
    let mut errors = Vec::new();
    let processed = assets.len();

    for asset in assets {
        let name = normalize_name(&asset.raw_name, false);
        let title = state.resolver.resolve_title(&name).await;
        let face = FaceRecord::approved(name, title, asset.url.clone());

        match state.store.upsert(&face).await {
            Ok(UpsertOutcome::Inserted { .. }) => inserted += 1,
            Ok(UpsertOutcome::Updated { .. }) => updated += 1,
            Err(e) => {
                warn!(url = %asset.url, "asset upsert failed: {}", e.message());
                failed += 1;
                errors.push(format!("{}: {}", asset.url, e.message()));
            }
        }
    }

    Ok(Json(SyncSummary {
        ok: true,
        scanned,
        processed,
        inserted,
        updated,
        failed,
        folder: Some(state.config.media.folder.clone()).filter(|f| !f.is_empty()),
        errors,
    }))
}

/// Token gate for the whole operation. Open when no token is
/// configured; otherwise the header or query value must match in
/// constant time.
fn authorize(state: &AppState, params: &SyncParams, headers: &HeaderMap) -> Result<(), AppError> {
    let expected = &state.config.media.sync_token;
    if expected.is_empty() {
        return Ok(());
    }
    let supplied = headers
        .get(SYNC_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .or(params.token.as_deref())
        .unwrap_or("");
    if constant_time_eq(supplied.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(AppError::InvalidSyncToken)
    }
}
