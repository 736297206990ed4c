//! Request-level webhook authentication: wires the pure verification
//! core to the configuration toggle, the configured secret, and the
//! wall clock.

use axum::http::HeaderMap;
use chrono::Utc;

use common::signature::{decode_secret, verify_at};

use crate::config::WebhookConfig;
use crate::error::AppError;

pub const HEADER_ID: &str = "webhook-id";
pub const HEADER_TIMESTAMP: &str = "webhook-timestamp";
pub const HEADER_SIGNATURE: &str = "webhook-signature";

/// Returns the authenticity verdict for one delivery. Missing or
/// malformed request input is a `false` verdict; a missing secret while
/// verification is enabled is a configuration error.
pub fn verify_request(
    config: &WebhookConfig,
    headers: &HeaderMap,
    body: &str,
) -> Result<bool, AppError> {
    if !config.verify_signature {
        return Ok(true);
    }
    if config.secret.is_empty() {
        return Err(AppError::Config(
            "webhook.secret is required when signature verification is enabled.".into(),
        ));
    }
    let key = decode_secret(&config.secret).map_err(|e| AppError::Config(e.to_string()))?;

    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let (Some(id), Some(timestamp), Some(signature)) = (
        header(HEADER_ID),
        header(HEADER_TIMESTAMP),
        header(HEADER_SIGNATURE),
    ) else {
        return Ok(false);
    };

    Ok(verify_at(
        &key,
        id,
        timestamp,
        signature,
        body,
        Utc::now().timestamp(),
    ))
}
