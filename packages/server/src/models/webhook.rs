//! Webhook payload probing and response DTOs.
//!
//! Producers have moved the asset descriptor around between payload
//! versions, so each field is resolved by probing a fixed priority list
//! of locations and taking the first non-empty value.

use serde::Serialize;
use serde_json::Value;

use common::text::{last_path_segment, strip_query};

use crate::clients::store::UpsertOutcome;
use crate::models::asset::AssetDescriptor;

/// Locations that may hold the asset descriptor, in priority order.
const ASSET_LOCATIONS: &[&[&str]] = &[
    &[],
    &["data"],
    &["data", "asset"],
    &["data", "file"],
    &["file"],
    &["payload"],
];

/// Success echo for a processed delivery.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAccepted {
    pub ok: bool,
    pub event_type: Option<String>,
    pub name: String,
    pub title: String,
    pub image_url: String,
    pub result: UpsertOutcome,
}

/// 202 body for deliveries outside the supported event/shape space.
/// Cheap acknowledgment keeps the producer's retry logic quiet.
#[derive(Serialize, utoipa::ToSchema)]
pub struct IgnoredBody {
    pub ignored: bool,
    pub reason: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

impl IgnoredBody {
    pub fn new(reason: &'static str, event_type: Option<String>) -> Self {
        Self {
            ignored: true,
            reason,
            event_type,
        }
    }
}

/// Field values resolved from the probed locations.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProbedAsset {
    pub url: Option<String>,
    pub name: Option<String>,
    pub file_type: Option<String>,
    pub file_path: Option<String>,
}

/// Probes every known location for each descriptor field.
pub fn probe_asset(payload: &Value) -> ProbedAsset {
    ProbedAsset {
        url: probe_field(payload, "url"),
        name: probe_field(payload, "name"),
        file_type: probe_field(payload, "fileType"),
        file_path: probe_field(payload, "filePath"),
    }
}

impl ProbedAsset {
    /// Builds the ingestion descriptor. `None` when no image URL could
    /// be resolved anywhere in the payload.
    pub fn into_descriptor(self) -> Option<AssetDescriptor> {
        let url = strip_query(self.url.as_deref()?).to_string();
        if url.is_empty() {
            return None;
        }
        let raw_name = self
            .name
            .or_else(|| {
                self.file_path
                    .as_deref()
                    .and_then(last_path_segment)
                    .map(str::to_string)
            })
            .or_else(|| last_path_segment(&url).map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string());

        Some(AssetDescriptor {
            raw_name,
            url,
            file_kind: self.file_type.map(|kind| kind.to_lowercase()),
        })
    }
}

/// First non-empty string value of `field` across the probe locations.
fn probe_field(payload: &Value, field: &str) -> Option<String> {
    ASSET_LOCATIONS
        .iter()
        .filter_map(|path| value_at(payload, path))
        .filter_map(|location| location.get(field))
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn value_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |value, key| value.get(key))
}
