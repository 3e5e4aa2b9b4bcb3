//! Display-only content components.

use serde::{Deserialize, Serialize};

/// A media reference. Outbound payloads only need `url`; the platform fills
/// in the rest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnfurledMedia {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl UnfurledMedia {
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Markdown text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDisplay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub media: UnfurledMedia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub spoiler: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaGalleryItem {
    pub media: UnfurledMedia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub spoiler: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaGallery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub items: Vec<MediaGalleryItem>,
}

/// An attached file. `name` and `size` are only present inbound.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub file: UnfurledMedia,
    pub spoiler: bool,
    #[serde(skip_serializing)]
    pub name: Option<String>,
    #[serde(skip_serializing)]
    pub size: Option<u64>,
}

impl FileComponent {
    /// Points at an upload attached to the same message.
    #[must_use]
    pub fn attachment(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            file: UnfurledMedia::url(format!("attachment://{name}")),
            name: Some(name),
            ..Self::default()
        }
    }
}
