//! Dump of the normalized gallery, for checking a data file by eye.

use anyhow::{Context, Result, bail};
use coral_core::model::{Album, Item};
use coral_core::video::is_video_url;
use tracing::warn;

/// A photo entry whose URL points at a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misfiled {
    pub album: usize,
    pub item: usize,
    pub src: String,
}

pub fn misfiled_photos(albums: &[Album]) -> Vec<Misfiled> {
    let mut found = Vec::new();
    for (album_index, album) in albums.iter().enumerate() {
        for (item_index, item) in album.items.iter().enumerate() {
            if let Item::Photo { src, .. } = item {
                if is_video_url(src) {
                    found.push(Misfiled {
                        album: album_index,
                        item: item_index,
                        src: src.clone(),
                    });
                }
            }
        }
    }
    found
}

pub fn render_inspection(albums: &[Album], album: Option<usize>) -> Result<String> {
    for entry in misfiled_photos(albums) {
        warn!(
            album = entry.album,
            item = entry.item,
            "photo entry looks like a video: {}",
            entry.src
        );
    }
    match album {
        Some(index) => {
            let Some(album) = albums.get(index) else {
                bail!("album {index} not found ({} albums)", albums.len());
            };
            serde_json::to_string_pretty(album).context("failed to serialize album")
        }
        None => serde_json::to_string_pretty(albums).context("failed to serialize albums"),
    }
}
