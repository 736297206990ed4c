//! Media host listing API. Authenticates with HTTP basic auth built
//! from the private key (the key is the username, the password is
//! empty).

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::asset::MediaFile;

/// Page size bounds accepted by the listing endpoint.
const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 1000;

#[derive(Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    config: Arc<AppConfig>,
}

impl MediaClient {
    pub fn new(http: reqwest::Client, config: Arc<AppConfig>) -> Self {
        Self { http, config }
    }

    /// Lists assets under the configured folder. `limit` falls back to
    /// the configured default and is clamped to the API's bounds.
    pub async fn list_files(&self, limit: Option<u32>) -> Result<Vec<MediaFile>, AppError> {
        let media = &self.config.media;
        if media.private_key.is_empty() {
            return Err(AppError::Config("media.private_key is required.".into()));
        }

        let bounded = limit
            .unwrap_or(media.sync_limit)
            .clamp(MIN_LIMIT, MAX_LIMIT);

        let mut query: Vec<(&str, String)> = vec![("limit", bounded.to_string())];
        if !media.folder.is_empty() {
            query.push(("path", media.folder.clone()));
        }

        let response = self
            .http
            .get(format!("{}/files", media.api_base))
            .basic_auth(&media.private_key, Some(""))
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("media files API failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "media files API failed: {status} {text}"
            )));
        }

        response
            .json::<Vec<MediaFile>>()
            .await
            .map_err(|e| AppError::Upstream(format!("media files API returned bad JSON: {e}")))
    }
}
