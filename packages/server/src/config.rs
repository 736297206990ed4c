use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use common::keywords::{
    OccupationKeyword, default_creative_work_markers, default_occupation_keywords,
};

use crate::clients::wiki::WikiBackend;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Face table store (Supabase-style PostgREST endpoint). Both fields are
/// required before the first upsert, not at startup.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StoreConfig {
    pub url: String,
    pub service_role_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    pub api_base: String,
    #[serde(default)]
    pub private_key: String,
    /// Optional folder prefix for batch listings.
    #[serde(default)]
    pub folder: String,
    /// Default page size when the request doesn't ask for one.
    pub sync_limit: u32,
    /// Shared token gating the batch sync endpoint. Empty = open gate.
    #[serde(default)]
    pub sync_token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    #[serde(default)]
    pub secret: String,
    /// Operational bypass switch: disabling this accepts every delivery
    /// unverified. Intended for local development only.
    pub verify_signature: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WikiConfig {
    /// Encyclopedia backends tried in order.
    pub backends: Vec<WikiBackend>,
    /// Occupation keyword table, in match-priority order.
    pub occupations: Vec<OccupationKeyword>,
    /// Summary markers indicating a creative work rather than a person.
    pub creative_work_markers: Vec<String>,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            backends: WikiBackend::defaults(),
            occupations: default_occupation_keywords(),
            creative_work_markers: default_creative_work_markers(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub media: MediaConfig,
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub wiki: WikiConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8787)?
            .set_default("media.api_base", "https://api.imagekit.io/v1")?
            .set_default("media.sync_limit", 100)?
            .set_default("webhook.verify_signature", true)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., FACESYNC__WEBHOOK__SECRET)
            .add_source(Environment::with_prefix("FACESYNC").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
