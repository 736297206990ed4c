//! Biography Resolver: turns a normalized display name into a short
//! title via encyclopedia lookups. Degrades to a generic fallback on
//! any failure — enrichment must never sink an ingestion.

use tracing::debug;

use common::keywords::{FALLBACK_TITLE, OccupationKeyword, is_creative_work, match_occupation};
use common::ranking::rank_candidates;
use common::text::{SUMMARY_CLAMP_CHARS, sentence_clamp};

use crate::clients::wiki::WikiClient;

/// Candidate titles requested per backend search.
const SEARCH_LIMIT: u8 = 5;

#[derive(Clone)]
pub struct BiographyResolver {
    wiki: WikiClient,
    occupations: Vec<OccupationKeyword>,
    creative_work_markers: Vec<String>,
}

impl BiographyResolver {
    pub fn new(
        wiki: WikiClient,
        occupations: Vec<OccupationKeyword>,
        creative_work_markers: Vec<String>,
    ) -> Self {
        Self {
            wiki,
            occupations,
            creative_work_markers,
        }
    }

    /// Resolves a title for `name`. Backends are tried in priority
    /// order; within a backend, candidates are ranked and tried until
    /// one yields a usable summary. Summaries describing creative works
    /// are skipped. A matched occupation keyword becomes the title;
    /// otherwise the clamped summary sentence is used. Total failure
    /// yields [`FALLBACK_TITLE`].
    pub async fn resolve_title(&self, name: &str) -> String {
        for backend in self.wiki.backends() {
            let results = self
                .wiki
                .search_titles(backend, name, SEARCH_LIMIT)
                .await
                .unwrap_or_default();

            for candidate in rank_candidates(name, &results) {
                let Some(summary) = self.wiki.fetch_summary(backend, &candidate).await else {
                    continue;
                };
                if is_creative_work(&summary, &self.creative_work_markers) {
                    debug!(candidate, "skipping creative-work summary");
                    continue;
                }
                if let Some(label) = match_occupation(&summary, &self.occupations) {
                    return label.to_string();
                }
                return sentence_clamp(&summary, SUMMARY_CLAMP_CHARS);
            }
        }

        debug!(name, "no summary found, using fallback title");
        FALLBACK_TITLE.to_string()
    }
}
