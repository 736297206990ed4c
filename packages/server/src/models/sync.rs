//! Batch sync request/response DTOs.

use serde::{Deserialize, Serialize};

/// Query parameters accepted by the sync endpoint.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SyncParams {
    /// Requested page size. Non-numeric input falls back to the
    /// configured default.
    pub limit: Option<String>,
    /// Sync token, alternative to the `x-sync-token` header.
    pub token: Option<String>,
}

impl SyncParams {
    pub fn parsed_limit(&self) -> Option<u32> {
        self.limit.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Summary of one batch run. Per-asset failures are isolated: the
/// batch continues and reports them here.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SyncSummary {
    pub ok: bool,
    /// Total assets returned by the listing.
    pub scanned: usize,
    /// Assets that passed the image filter and had a URL.
    pub processed: usize,
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
    pub folder: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_parses_or_falls_back() {
        let params = SyncParams {
            limit: Some("50".into()),
            token: None,
        };
        assert_eq!(params.parsed_limit(), Some(50));

        let params = SyncParams {
            limit: Some("lots".into()),
            token: None,
        };
        assert_eq!(params.parsed_limit(), None);

        let params = SyncParams {
            limit: None,
            token: None,
        };
        assert_eq!(params.parsed_limit(), None);
    }

    #[test]
    fn empty_error_list_is_omitted_from_json() {
        let summary = SyncSummary {
            ok: true,
            scanned: 1,
            processed: 1,
            inserted: 1,
            updated: 0,
            failed: 0,
            folder: None,
            errors: vec![],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("errors").is_none());
        assert_eq!(json["folder"], serde_json::Value::Null);
    }
}
