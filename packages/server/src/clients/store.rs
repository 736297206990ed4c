//! Face table client over the store's REST interface (PostgREST
//! dialect). The upsert is a lookup-then-write sequence keyed by the
//! bare image URL; two concurrent ingestions of the same URL can both
//! pass the lookup and insert twice.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::AppError;

/// The only status this pipeline writes: rows arrive pre-approved.
pub const STATUS_APPROVED: &str = "approved";

/// One persisted face row, keyed by `image_url`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FaceRecord {
    pub name: String,
    pub title: String,
    pub image_url: String,
    pub status: String,
}

impl FaceRecord {
    pub fn approved(name: String, title: String, image_url: String) -> Self {
        Self {
            name,
            title,
            image_url,
            status: STATUS_APPROVED.to_string(),
        }
    }
}

/// Outcome of one idempotent write.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum UpsertOutcome {
    /// A new row was created. The id may be absent if the store elides
    /// the representation.
    Inserted { id: Option<i64> },
    /// An existing row with the same `image_url` was overwritten.
    Updated { id: i64 },
}

#[derive(Deserialize)]
struct FaceRow {
    id: i64,
}

#[derive(Clone)]
pub struct FaceStore {
    http: reqwest::Client,
    config: Arc<AppConfig>,
}

impl FaceStore {
    pub fn new(http: reqwest::Client, config: Arc<AppConfig>) -> Self {
        Self { http, config }
    }

    fn credentials(&self) -> Result<(&str, &str), AppError> {
        let store = &self.config.store;
        if store.url.is_empty() || store.service_role_key.is_empty() {
            return Err(AppError::Config(
                "store.url and store.service_role_key are required.".into(),
            ));
        }
        Ok((&store.url, &store.service_role_key))
    }

    fn request(&self, method: reqwest::Method, url: String, key: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", "return=representation")
    }

    /// Creates or overwrites the row for `face.image_url`. Exactly one
    /// write happens per call; a failed lookup writes nothing.
    pub async fn upsert(&self, face: &FaceRecord) -> Result<UpsertOutcome, AppError> {
        let (base, key) = self.credentials()?;

        let lookup_url = format!(
            "{base}/rest/v1/faces?select=id&image_url=eq.{}&limit=1",
            urlencoding::encode(&face.image_url)
        );
        let lookup = self
            .request(reqwest::Method::GET, lookup_url, key)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("faces lookup failed: {e}")))?;
        if !lookup.status().is_success() {
            let text = lookup.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("faces lookup failed: {text}")));
        }
        let existing: Vec<FaceRow> = lookup
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("faces lookup failed: {e}")))?;

        if let Some(row) = existing.first() {
            let patch_url = format!("{base}/rest/v1/faces?id=eq.{}", row.id);
            let patch = self
                .request(reqwest::Method::PATCH, patch_url, key)
                .json(face)
                .send()
                .await
                .map_err(|e| AppError::Upstream(format!("faces patch failed: {e}")))?;
            if !patch.status().is_success() {
                let text = patch.text().await.unwrap_or_default();
                return Err(AppError::Upstream(format!("faces patch failed: {text}")));
            }
            return Ok(UpsertOutcome::Updated { id: row.id });
        }

        let insert = self
            .request(reqwest::Method::POST, format!("{base}/rest/v1/faces"), key)
            .json(face)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("faces insert failed: {e}")))?;
        if !insert.status().is_success() {
            let text = insert.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("faces insert failed: {text}")));
        }
        let inserted: Vec<FaceRow> = insert
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("faces insert failed: {e}")))?;
        Ok(UpsertOutcome::Inserted {
            id: inserted.first().map(|row| row.id),
        })
    }
}
