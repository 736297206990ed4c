//! Occupation keyword tables for summary classification.
//!
//! The tables are data, not logic: the server loads them from
//! configuration with these defaults, so new occupations or languages
//! can be added without a code change. Matching is first-hit-wins over
//! a fixed order, so broader labels (musician) sit after narrower ones
//! (singer, rapper).

use serde::{Deserialize, Serialize};

/// One occupation entry: the label reported as a face title, plus the
/// keyword variants (per supported language) that select it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupationKeyword {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Title used when no summary could be retrieved at all.
pub const FALLBACK_TITLE: &str = "Public Figure";

/// Finds the first occupation whose keywords appear in the summary.
pub fn match_occupation<'a>(summary: &str, table: &'a [OccupationKeyword]) -> Option<&'a str> {
    let lowered = summary.to_lowercase();
    table
        .iter()
        .find(|entry| {
            entry
                .keywords
                .iter()
                .any(|keyword| lowered.contains(&keyword.to_lowercase()))
        })
        .map(|entry| entry.label.as_str())
}

/// Whether a summary describes a creative work (album, film, ...) or a
/// disambiguation page rather than a person.
pub fn is_creative_work(summary: &str, markers: &[String]) -> bool {
    let lowered = summary.to_lowercase();
    markers
        .iter()
        .any(|marker| lowered.contains(&marker.to_lowercase()))
}

/// Default occupation table, in match-priority order.
pub fn default_occupation_keywords() -> Vec<OccupationKeyword> {
    [
        ("Singer", &["singer", "가수"][..]),
        ("Actor", &["actor", "actress", "배우"]),
        ("Rapper", &["rapper", "래퍼"]),
        ("Model", &["model", "모델"]),
        ("Producer", &["producer", "프로듀서"]),
        ("Songwriter", &["songwriter", "작사가"]),
        ("Composer", &["composer", "작곡가"]),
        ("Dancer", &["dancer", "댄서", "무용가"]),
        ("Comedian", &["comedian", "코미디언", "희극인"]),
        ("Politician", &["politician", "정치인"]),
        ("Athlete", &["athlete", "운동선수"]),
        ("Footballer", &["footballer", "축구 선수"]),
        ("Musician", &["musician", "음악가"]),
    ]
    .into_iter()
    .map(|(label, keywords)| OccupationKeyword {
        label: label.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    })
    .collect()
}

/// Default markers for summaries that describe works, not people.
pub fn default_creative_work_markers() -> Vec<String> {
    // "song" alone would also hit "songwriter", so the English side
    // relies on the release-shaped words instead.
    [
        "album",
        "single",
        "film",
        "series",
        "novel",
        "video game",
        "disambiguation",
        "음반",
        "노래",
        "영화",
        "드라마",
        "소설",
        "게임",
        "동음이의",
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}
