//! String transforms applied to raw asset filenames and encyclopedia
//! summaries. All functions here are total: bad input degrades to a
//! fallback value, never an error.

/// Display name used when a filename normalizes to nothing.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Default character limit for clamped summary sentences.
pub const SUMMARY_CLAMP_CHARS: usize = 120;

/// Derives a clean display name from a raw asset filename.
///
/// Strips a trailing extension, percent-decodes, turns `_`/`-` runs
/// into spaces, optionally drops a trailing auto-generated hash token
/// (the media host appends one to duplicate uploads), and collapses
/// whitespace. An empty result becomes [`UNKNOWN_NAME`].
pub fn normalize_name(raw: &str, strip_hash_suffix: bool) -> String {
    let no_ext = strip_extension(raw);
    let decoded = match urlencoding::decode(no_ext) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => no_ext.to_string(),
    };

    let mut spaced = String::with_capacity(decoded.len());
    let mut in_separator = false;
    for c in decoded.chars() {
        if c == '_' || c == '-' {
            if !in_separator {
                spaced.push(' ');
                in_separator = true;
            }
        } else {
            spaced.push(c);
            in_separator = false;
        }
    }

    let spaced = if strip_hash_suffix {
        strip_hash_tail(&spaced)
    } else {
        spaced
    };

    let normalized = collapse_whitespace(&spaced);
    if normalized.is_empty() {
        UNKNOWN_NAME.to_string()
    } else {
        normalized
    }
}

/// Collapses a summary to one line and clamps it to `max` characters,
/// appending an ellipsis when truncated. Truncation happens on char
/// boundaries so multi-byte text is never split.
pub fn sentence_clamp(text: &str, max: usize) -> String {
    let single_line = collapse_whitespace(text);
    if single_line.chars().count() <= max {
        return single_line;
    }
    let cut: String = single_line.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Drops the query string from a delivery URL. The bare URL (no
/// transformation variant) is the dedup key for face records.
pub fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Last non-empty path segment of a URL or file path.
pub fn last_path_segment(path: &str) -> Option<&str> {
    path.rsplit('/').next().filter(|segment| !segment.is_empty())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Mirrors the trailing-extension rule `.` + non-dot/non-slash at end.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => {
            let tail = &name[pos + 1..];
            if !tail.is_empty() && !tail.contains('/') {
                &name[..pos]
            } else {
                name
            }
        }
        None => name,
    }
}

// Drops a trailing whitespace-separated run of 6+ ASCII alphanumerics,
// treated as an auto-generated duplicate-filename suffix.
fn strip_hash_tail(s: &str) -> String {
    let trimmed = s.trim_end();
    if let Some((idx, c)) = trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
    {
        let tail = &trimmed[idx + c.len_utf8()..];
        if tail.len() >= 6 && tail.chars().all(|c| c.is_ascii_alphanumeric()) {
            return trimmed[..idx].to_string();
        }
    }
    s.to_string()
}
