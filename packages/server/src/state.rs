use std::sync::Arc;

use crate::clients::media::MediaClient;
use crate::clients::store::FaceStore;
use crate::clients::wiki::WikiClient;
use crate::config::AppConfig;
use crate::enrich::BiographyResolver;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub media: MediaClient,
    pub store: FaceStore,
    pub resolver: BiographyResolver,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let config = Arc::new(config);
        let http = reqwest::Client::new();

        let wiki = WikiClient::new(http.clone(), config.wiki.backends.clone());
        Self {
            media: MediaClient::new(http.clone(), config.clone()),
            store: FaceStore::new(http, config.clone()),
            resolver: BiographyResolver::new(
                wiki,
                config.wiki.occupations.clone(),
                config.wiki.creative_work_markers.clone(),
            ),
            config,
        }
    }
}
