use serde::Serialize;

const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "youtu.be"];
const YOUTUBE_ID_MARKERS: &[&str] = &["v=", "be/", "shorts/"];
const YOUTUBE_MIN_ID_LEN: usize = 6;
const VIMEO_MARKER: &str = "vimeo.com/";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    YouTube,
    Vimeo,
    File,
}

/// How a video URL should be played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoEmbed {
    /// `id` may be empty when the link carries none; the embed is still built.
    YouTube { id: String },
    Vimeo { id: String },
    /// Direct `.mp4` link for a native player.
    File,
    Unrecognized,
}

impl VideoEmbed {
    pub fn provider(&self) -> Option<VideoProvider> {
        match self {
            VideoEmbed::YouTube { .. } => Some(VideoProvider::YouTube),
            VideoEmbed::Vimeo { .. } => Some(VideoProvider::Vimeo),
            VideoEmbed::File => Some(VideoProvider::File),
            VideoEmbed::Unrecognized => None,
        }
    }

    pub fn embed_url(&self) -> Option<String> {
        match self {
            VideoEmbed::YouTube { id } => Some(format!("https://www.youtube.com/embed/{id}")),
            VideoEmbed::Vimeo { id } => Some(format!("https://player.vimeo.com/video/{id}")),
            VideoEmbed::File | VideoEmbed::Unrecognized => None,
        }
    }
}

pub fn classify_video(url: &str) -> VideoEmbed {
    let lower = url.to_ascii_lowercase();
    if YOUTUBE_HOSTS.iter().any(|host| lower.contains(host)) {
        return VideoEmbed::YouTube {
            id: youtube_id(url).unwrap_or_default(),
        };
    }
    if lower.contains("vimeo.com") {
        return VideoEmbed::Vimeo {
            id: vimeo_id(&lower).unwrap_or_default(),
        };
    }
    if is_mp4(&lower) {
        return VideoEmbed::File;
    }
    VideoEmbed::Unrecognized
}

/// Loose check used to flag entries that look like video links.
pub fn is_video_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    YOUTUBE_HOSTS.iter().any(|host| lower.contains(host))
        || lower.contains("vimeo.com")
        || is_mp4(&lower)
}

fn youtube_id(url: &str) -> Option<String> {
    for (idx, _) in url.char_indices() {
        let rest = &url[idx..];
        for marker in YOUTUBE_ID_MARKERS {
            let Some(after) = rest.strip_prefix(marker) else {
                continue;
            };
            let id: String = after
                .chars()
                .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_')
                .collect();
            if id.len() >= YOUTUBE_MIN_ID_LEN {
                return Some(id);
            }
        }
    }
    None
}

fn vimeo_id(lower: &str) -> Option<String> {
    lower.match_indices(VIMEO_MARKER).find_map(|(idx, _)| {
        let digits: String = lower[idx + VIMEO_MARKER.len()..]
            .chars()
            .take_while(|ch| ch.is_ascii_digit())
            .collect();
        (!digits.is_empty()).then_some(digits)
    })
}

fn is_mp4(lower: &str) -> bool {
    lower.match_indices(".mp4").any(|(idx, marker)| {
        let after = &lower[idx + marker.len()..];
        after.is_empty() || after.starts_with('?')
    })
}
