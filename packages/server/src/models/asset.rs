//! Asset descriptors: the ephemeral unit of ingestion, built either
//! from a batch listing entry or from a probed webhook payload.

use serde::Deserialize;

use common::text::{last_path_segment, strip_query};

/// One entry from the media host's file listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    pub name: Option<String>,
    pub file_path: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub file_type: Option<String>,
}

impl MediaFile {
    /// Media type tag, lowercased; `None` when both fields are empty.
    pub fn file_kind(&self) -> Option<String> {
        self.file_type
            .as_deref()
            .or(self.kind.as_deref())
            .map(str::to_lowercase)
            .filter(|kind| !kind.is_empty())
    }
}

/// Ephemeral descriptor for one ingested file or event. Consumed
/// immediately by the pipeline; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub raw_name: String,
    /// Delivery URL with the query string stripped — the dedup key.
    pub url: String,
    pub file_kind: Option<String>,
}

impl AssetDescriptor {
    /// Builds a descriptor from a listing entry. `None` when the entry
    /// has no URL (nothing to ingest).
    pub fn from_media_file(file: &MediaFile) -> Option<Self> {
        let url = strip_query(file.url.as_deref()?).to_string();
        if url.is_empty() {
            return None;
        }
        let raw_name = file
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| {
                file.file_path
                    .as_deref()
                    .and_then(last_path_segment)
                    .map(str::to_string)
            })
            .or_else(|| last_path_segment(&url).map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string());

        Some(Self {
            raw_name,
            url,
            file_kind: file.file_kind(),
        })
    }

    /// Ingestion proceeds only for images or untagged entries.
    pub fn is_image(&self) -> bool {
        match self.file_kind.as_deref() {
            None | Some("") => true,
            Some(kind) => kind == "image",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(
        name: Option<&str>,
        file_path: Option<&str>,
        url: Option<&str>,
        file_type: Option<&str>,
    ) -> MediaFile {
        MediaFile {
            name: name.map(str::to_string),
            file_path: file_path.map(str::to_string),
            url: url.map(str::to_string),
            kind: None,
            file_type: file_type.map(str::to_string),
        }
    }

    #[test]
    fn descriptor_strips_query_string() {
        let f = file(
            Some("a.jpg"),
            None,
            Some("https://host/a.jpg?tr=w-200"),
            Some("image"),
        );
        let asset = AssetDescriptor::from_media_file(&f).unwrap();
        assert_eq!(asset.url, "https://host/a.jpg");
    }

    #[test]
    fn descriptor_name_falls_back_through_path_then_url() {
        let f = file(None, Some("/faces/b.png"), Some("https://host/c.png"), None);
        assert_eq!(
            AssetDescriptor::from_media_file(&f).unwrap().raw_name,
            "b.png"
        );

        let f = file(None, None, Some("https://host/c.png"), None);
        assert_eq!(
            AssetDescriptor::from_media_file(&f).unwrap().raw_name,
            "c.png"
        );
    }

    #[test]
    fn descriptor_requires_a_url() {
        let f = file(Some("a.jpg"), None, None, None);
        assert!(AssetDescriptor::from_media_file(&f).is_none());
    }

    #[test]
    fn untagged_and_image_kinds_pass_the_filter() {
        let image = file(Some("a"), None, Some("https://h/a"), Some("image"));
        let untagged = file(Some("a"), None, Some("https://h/a"), None);
        let video = file(Some("a"), None, Some("https://h/a"), Some("video"));
        assert!(AssetDescriptor::from_media_file(&image).unwrap().is_image());
        assert!(AssetDescriptor::from_media_file(&untagged).unwrap().is_image());
        assert!(!AssetDescriptor::from_media_file(&video).unwrap().is_image());
    }

    #[test]
    fn kind_is_lowercased_and_falls_back_to_type_field() {
        let f = MediaFile {
            name: None,
            file_path: None,
            url: Some("https://h/a".into()),
            kind: Some("Image".into()),
            file_type: None,
        };
        assert_eq!(f.file_kind().as_deref(), Some("image"));
    }
}
