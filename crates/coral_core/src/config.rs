use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use url::Url;

use crate::model::{CdnConfig, DataConfig, GalleryConfig, SiteConfig, SiteMeta};

const DEFAULT_LANGUAGE: &str = "pt-BR";

#[derive(Debug, Deserialize)]
struct SiteConfigRaw {
    site: SiteMetaRaw,
    cdn: Option<CdnConfigRaw>,
    gallery: Option<GalleryConfigRaw>,
    data: Option<DataConfigRaw>,
}

#[derive(Debug, Deserialize)]
struct SiteMetaRaw {
    title: Option<String>,
    origin: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdnConfigRaw {
    host: Option<String>,
    cloud: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GalleryConfigRaw {
    thumb_width: Option<u32>,
    cover_width: Option<u32>,
    viewer_width: Option<u32>,
    srcset_widths: Option<Vec<u32>>,
}

#[derive(Debug, Deserialize)]
struct DataConfigRaw {
    gallery: Option<String>,
}

pub fn load_site_config(path: &Path) -> Result<SiteConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_site_config(&raw)
        .with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_site_config(raw: &str) -> Result<SiteConfig> {
    let parsed: SiteConfigRaw =
        serde_yaml::from_str(raw).context("failed to parse YAML config")?;

    let origin = required_string(parsed.site.origin, "site.origin")?;
    let origin_url =
        Url::parse(&origin).with_context(|| format!("site.origin '{origin}' is not a URL"))?;
    if origin_url.cannot_be_a_base() {
        bail!("site.origin '{origin}' must be an absolute http(s) URL");
    }

    let site = SiteMeta {
        title: required_string(parsed.site.title, "site.title")?,
        origin,
        language: parsed
            .site
            .language
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
    };

    let defaults = CdnConfig::default();
    let cdn = match parsed.cdn {
        None => defaults,
        Some(raw) => CdnConfig {
            host: non_empty_or(raw.host, "cdn.host", defaults.host)?,
            cloud: non_empty_or(raw.cloud, "cdn.cloud", defaults.cloud)?,
        },
    };

    let defaults = GalleryConfig::default();
    let gallery = match parsed.gallery {
        None => defaults,
        Some(raw) => {
            let srcset_widths = raw.srcset_widths.unwrap_or(defaults.srcset_widths);
            if srcset_widths.iter().any(|width| *width == 0) {
                bail!("gallery.srcset_widths must not contain 0");
            }
            GalleryConfig {
                thumb_width: positive(raw.thumb_width, "gallery.thumb_width", defaults.thumb_width)?,
                cover_width: positive(raw.cover_width, "gallery.cover_width", defaults.cover_width)?,
                viewer_width: positive(
                    raw.viewer_width,
                    "gallery.viewer_width",
                    defaults.viewer_width,
                )?,
                srcset_widths,
            }
        }
    };

    let defaults = DataConfig::default();
    let data = match parsed.data {
        None => defaults,
        Some(raw) => DataConfig {
            gallery: non_empty_or(raw.gallery, "data.gallery", defaults.gallery)?,
        },
    };

    Ok(SiteConfig {
        site,
        cdn,
        gallery,
        data,
    })
}

fn required_string(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("missing required field: {field}"),
    }
}

fn non_empty_or(value: Option<String>, field: &str, default: String) -> Result<String> {
    match value {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => bail!("{field} must not be empty"),
        Some(value) => Ok(value.trim().to_string()),
    }
}

fn positive(value: Option<u32>, field: &str, default: u32) -> Result<u32> {
    match value {
        None => Ok(default),
        Some(0) => bail!("{field} must be greater than 0"),
        Some(value) => Ok(value),
    }
}
