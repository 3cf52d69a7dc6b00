use url::Url;

use crate::model::{CdnConfig, SiteConfig};

const UPLOAD_MARKER: &str = "/upload/";
const TRANSFORM_CODES: &[&str] = &["c_", "w_", "h_", "ar_", "g_", "z_"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crop {
    Fill,
    Fit,
    Limit,
    Pad,
    Scale,
    Thumb,
}

impl Crop {
    pub fn as_str(self) -> &'static str {
        match self {
            Crop::Fill => "fill",
            Crop::Fit => "fit",
            Crop::Limit => "limit",
            Crop::Pad => "pad",
            Crop::Scale => "scale",
            Crop::Thumb => "thumb",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOpts {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop: Option<Crop>,
    pub gravity: Option<String>,
}

impl TransformOpts {
    pub fn fit(width: u32) -> Self {
        Self {
            width: Some(width),
            crop: Some(Crop::Fit),
            ..Self::default()
        }
    }

    pub fn fill(width: u32) -> Self {
        Self {
            width: Some(width),
            crop: Some(Crop::Fill),
            gravity: Some("auto".to_string()),
            ..Self::default()
        }
    }

    pub fn with_width(&self, width: u32) -> Self {
        Self {
            width: Some(width),
            ..self.clone()
        }
    }

    fn directive(&self) -> String {
        let mut parts = vec![
            "f_auto".to_string(),
            "q_auto".to_string(),
            "dpr_auto".to_string(),
        ];
        if let Some(crop) = self.crop {
            parts.push(format!("c_{}", crop.as_str()));
        }
        if let Some(gravity) = self.gravity.as_deref().filter(|g| !g.is_empty()) {
            parts.push(format!("g_{gravity}"));
        }
        if let Some(width) = self.width.filter(|w| *w > 0) {
            parts.push(format!("w_{width}"));
        }
        if let Some(height) = self.height.filter(|h| *h > 0) {
            parts.push(format!("h_{height}"));
        }
        parts.join(",")
    }
}

#[derive(Debug, Clone)]
pub struct CdnTransformer {
    host: String,
    cloud: String,
    origin: Option<Url>,
}

impl CdnTransformer {
    /// Relative sources resolve against the scheme, host and port of
    /// `origin`; its path is ignored.
    pub fn new(cdn: &CdnConfig, origin: &str) -> Self {
        let origin = Url::parse(origin)
            .ok()
            .and_then(|url| Url::parse(&url.origin().ascii_serialization()).ok());
        Self {
            host: cdn.host.trim_matches('/').to_string(),
            cloud: cdn.cloud.trim_matches('/').to_string(),
            origin,
        }
    }

    pub fn from_config(cfg: &SiteConfig) -> Self {
        Self::new(&cfg.cdn, &cfg.site.origin)
    }

    pub fn is_cdn_url(&self, url: &str) -> bool {
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        match rest {
            Some(rest) => rest
                .strip_prefix(self.host.as_str())
                .is_some_and(|tail| tail.starts_with('/')),
            None => false,
        }
    }

    pub fn transform(&self, url: &str, opts: &TransformOpts) -> String {
        if url.is_empty() {
            return String::new();
        }
        if self.is_cdn_url(url) {
            return match url.split_once(UPLOAD_MARKER) {
                Some((head, tail)) => {
                    let first_segment = tail.split('/').next().unwrap_or("");
                    if has_transform_directives(first_segment) {
                        url.to_string()
                    } else {
                        format!("{head}{UPLOAD_MARKER}{}/{tail}", opts.directive())
                    }
                }
                // fetch URL, nowhere to insert
                None => url.to_string(),
            };
        }
        let absolute = self.absolute(url);
        format!(
            "{}{}/{}",
            self.fetch_base(),
            opts.directive(),
            urlencoding::encode(&absolute)
        )
    }

    pub fn build_srcset(&self, url: &str, widths: &[u32], opts: &TransformOpts) -> String {
        if url.is_empty() {
            return String::new();
        }
        widths
            .iter()
            .map(|width| {
                format!(
                    "{} {width}w",
                    self.transform(url, &opts.with_width(*width))
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn fetch_base(&self) -> String {
        format!("https://{}/{}/image/fetch/", self.host, self.cloud)
    }

    fn absolute(&self, url: &str) -> String {
        match self.origin.as_ref() {
            Some(origin) => origin
                .join(url)
                .map(|resolved| resolved.to_string())
                .unwrap_or_else(|_| url.to_string()),
            None => url.to_string(),
        }
    }
}

/// True when a path segment starts any transform code at a word boundary.
fn has_transform_directives(segment: &str) -> bool {
    segment.char_indices().any(|(idx, _)| {
        let at_boundary = segment[..idx]
            .chars()
            .next_back()
            .is_none_or(|prev| !(prev.is_ascii_alphanumeric() || prev == '_'));
        at_boundary
            && TRANSFORM_CODES
                .iter()
                .any(|code| segment[idx..].starts_with(code))
    })
}
