use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::instrument;

use common::text::normalize_name;

use crate::clients::store::FaceRecord;
use crate::error::{AppError, ErrorBody, FailureBody};
use crate::models::webhook::{IgnoredBody, WebhookAccepted, probe_asset};
use crate::state::AppState;
use crate::utils::signature::verify_request;

/// Receive one signed media-host event and ingest its asset.
///
/// The signature is checked against the raw body before any parsing.
/// Deliveries outside the supported shape space (non-image, no
/// resolvable URL, unparseable body) are acknowledged with 202 so the
/// producer doesn't retry them.
#[utoipa::path(
    post,
    path = "/api/v1/webhook",
    tag = "Ingestion",
    operation_id = "receiveWebhook",
    summary = "Ingest one signed media-host upload event",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Asset ingested", body = WebhookAccepted),
        (status = 202, description = "Delivery acknowledged but not ingested", body = IgnoredBody),
        (status = 401, description = "Invalid webhook signature", body = ErrorBody),
        (status = 500, description = "Upstream or configuration failure", body = FailureBody),
    )
)]
#[instrument(skip(state, headers, body))]
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, AppError> {
    if !verify_request(&state.config.webhook, &headers, &body)? {
        return Err(AppError::InvalidSignature);
    }

    let Ok(payload) = serde_json::from_str::<Value>(&body) else {
        return Ok(ignored("invalid_payload", None));
    };
    let event_type = payload
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string);

    let probed = probe_asset(&payload);
    if let Some(kind) = probed.file_type.as_deref()
        && !kind.is_empty()
        && !kind.eq_ignore_ascii_case("image")
    {
        return Ok(ignored("non_image", event_type));
    }
    let Some(asset) = probed.into_descriptor() else {
        return Ok(ignored("missing_image_url", event_type));
    };

    let name = normalize_name(&asset.raw_name, true);
    let title = state.resolver.resolve_title(&name).await;
    let face = FaceRecord::approved(name.clone(), title.clone(), asset.url.clone());
    let result = state.store.upsert(&face).await?;

    Ok((
        StatusCode::OK,
        Json(WebhookAccepted {
            ok: true,
            event_type,
            name,
            title,
            image_url: asset.url,
            result,
        }),
    )
        .into_response())
}

fn ignored(reason: &'static str, event_type: Option<String>) -> Response {
    (
        StatusCode::ACCEPTED,
        Json(IgnoredBody::new(reason, event_type)),
    )
        .into_response()
}
