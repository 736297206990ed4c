//! Encyclopedia lookups: an opensearch-style title search plus a
//! page-summary fetch, against a fixed-priority list of language
//! backends. Every failure here is recoverable — callers fall through
//! to the next candidate or backend, so both calls return `Option`.

use serde::Deserialize;
use tracing::debug;

/// One language backend: the action API for searches and the REST base
/// for page summaries.
#[derive(Debug, Deserialize, Clone)]
pub struct WikiBackend {
    pub search_api: String,
    pub summary_base: String,
}

impl WikiBackend {
    /// Default backend order: Korean first, English as fallback.
    pub fn defaults() -> Vec<WikiBackend> {
        vec![
            WikiBackend {
                search_api: "https://ko.wikipedia.org/w/api.php".into(),
                summary_base: "https://ko.wikipedia.org/api/rest_v1/page/summary/".into(),
            },
            WikiBackend {
                search_api: "https://en.wikipedia.org/w/api.php".into(),
                summary_base: "https://en.wikipedia.org/api/rest_v1/page/summary/".into(),
            },
        ]
    }
}

#[derive(Deserialize)]
struct SummaryResponse {
    extract: Option<String>,
    description: Option<String>,
}

#[derive(Clone)]
pub struct WikiClient {
    http: reqwest::Client,
    backends: Vec<WikiBackend>,
}

impl WikiClient {
    pub fn new(http: reqwest::Client, backends: Vec<WikiBackend>) -> Self {
        Self { http, backends }
    }

    pub fn backends(&self) -> &[WikiBackend] {
        &self.backends
    }

    /// Searches a backend for up to `limit` candidate page titles.
    /// `None` means the search itself failed; an empty list means no
    /// results.
    pub async fn search_titles(
        &self,
        backend: &WikiBackend,
        name: &str,
        limit: u8,
    ) -> Option<Vec<String>> {
        let response = self
            .http
            .get(&backend.search_api)
            .query(&[
                ("action", "opensearch"),
                ("search", name),
                ("limit", &limit.to_string()),
                ("namespace", "0"),
                ("format", "json"),
            ])
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            debug!(status = %response.status(), "title search failed");
            return None;
        }

        // Opensearch replies [query, [titles], [descriptions], [urls]].
        let body: serde_json::Value = response.json().await.ok()?;
        let titles = body
            .get(1)?
            .as_array()?
            .iter()
            .filter_map(|t| t.as_str().map(str::to_string))
            .collect();
        Some(titles)
    }

    /// Fetches a page summary, preferring the full extract over the
    /// one-line description.
    pub async fn fetch_summary(&self, backend: &WikiBackend, title: &str) -> Option<String> {
        let url = format!("{}{}", backend.summary_base, urlencoding::encode(title));
        let response = self.http.get(&url).send().await.ok()?;
        if !response.status().is_success() {
            debug!(title, status = %response.status(), "summary fetch failed");
            return None;
        }
        let body: SummaryResponse = response.json().await.ok()?;
        body.extract.or(body.description).filter(|s| !s.is_empty())
    }
}
