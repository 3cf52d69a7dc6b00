//! Core gallery and site models

use serde::Serialize;

/// A normalized album. Built fresh on every normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Album {
    pub title: String,
    pub description: String,
    pub cover: Option<String>,
    /// Display and navigation order: photo list, video list, mixed list.
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Photo,
    Video,
}

/// A single album entry. `src` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    Photo { src: String, alt: String },
    Video { src: String },
}

impl Item {
    pub fn photo(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Item::Photo {
            src: src.into(),
            alt: alt.into(),
        }
    }

    pub fn video(src: impl Into<String>) -> Self {
        Item::Video { src: src.into() }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Photo { .. } => ItemKind::Photo,
            Item::Video { .. } => ItemKind::Video,
        }
    }

    pub fn src(&self) -> &str {
        match self {
            Item::Photo { src, .. } | Item::Video { src } => src,
        }
    }

    pub fn alt(&self) -> &str {
        match self {
            Item::Photo { alt, .. } => alt,
            Item::Video { .. } => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub site: SiteMeta,
    pub cdn: CdnConfig,
    pub gallery: GalleryConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMeta {
    pub title: String,
    /// Absolute origin relative image URLs are resolved against.
    pub origin: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnConfig {
    pub host: String,
    pub cloud: String,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            host: "res.cloudinary.com".to_string(),
            cloud: "dqfkwolc8".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    pub thumb_width: u32,
    pub cover_width: u32,
    pub viewer_width: u32,
    pub srcset_widths: Vec<u32>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            thumb_width: 400,
            cover_width: 600,
            viewer_width: 2000,
            srcset_widths: vec![400, 600, 900],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    /// Gallery document path, relative to the site root.
    pub gallery: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            gallery: "data/galeria.json".to_string(),
        }
    }
}
