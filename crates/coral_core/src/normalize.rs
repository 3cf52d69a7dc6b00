//! Raw CMS records to the uniform album model.
//!
//! Every function here is total: unknown shapes fall back to defaults and
//! entries without a usable URL are dropped.

use serde_json::Value;
use tracing::debug;

use crate::fields::{self, flat_list, is_truthy, pick, pick_text, scalar_text};
use crate::model::{Album, Item};

/// Photo URL from a bare string or an object carrying one of the photo URL
/// fields.
pub fn normalize_photo_item(raw: &Value) -> Option<String> {
    resolve_url(raw, fields::PHOTO_URL)
}

pub fn normalize_video_item(raw: &Value) -> Option<String> {
    resolve_url(raw, fields::VIDEO_URL)
}

fn resolve_url(raw: &Value, keys: &[&str]) -> Option<String> {
    match raw {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Object(_) => pick_text(raw, keys).map(str::to_string),
        _ => None,
    }
}

fn caption(raw: &Value) -> String {
    pick_text(raw, fields::CAPTION)
        .map(str::to_string)
        .unwrap_or_default()
}

fn is_video_entry(raw: &Value) -> bool {
    pick_text(raw, fields::ITEM_TYPE).is_some_and(|kind| {
        let kind = kind.to_lowercase();
        fields::VIDEO_TYPE_NAMES.contains(&kind.as_str())
    })
}

/// Returns `None` only when `raw` is `null`.
pub fn normalize_album(raw: &Value) -> Option<Album> {
    if raw.is_null() {
        return None;
    }

    let title = pick(raw, fields::TITLE).map(scalar_text).unwrap_or_default();
    let description = pick(raw, fields::DESCRIPTION)
        .map(scalar_text)
        .unwrap_or_default();
    let cover = pick(raw, fields::COVER).and_then(normalize_photo_item);

    let photos = flat_list(pick(raw, fields::PHOTO_LIST));
    let videos = flat_list(pick(raw, fields::VIDEO_LIST));
    let mixed = flat_list(pick(raw, fields::MIXED_LIST));

    let mut items = Vec::with_capacity(photos.len() + videos.len() + mixed.len());

    for entry in photos {
        match normalize_photo_item(entry) {
            Some(src) => items.push(Item::photo(src, caption(entry))),
            None => debug!(?entry, "dropping photo without a URL"),
        }
    }

    for entry in videos {
        match normalize_video_item(entry) {
            Some(src) => items.push(Item::video(src)),
            None => debug!(?entry, "dropping video without a URL"),
        }
    }

    for entry in mixed {
        if !is_truthy(entry) {
            continue;
        }
        let item = if is_video_entry(entry) {
            normalize_video_item(entry).map(Item::video)
        } else {
            normalize_photo_item(entry).map(|src| Item::photo(src, caption(entry)))
        };
        match item {
            Some(item) => items.push(item),
            None => debug!(?entry, "dropping mixed entry without a URL"),
        }
    }

    Some(Album {
        title,
        description,
        cover,
        items,
    })
}

/// Albums listed in a gallery document, either at the top level or inside a
/// `galeria` wrapper. A missing document yields no albums.
pub fn normalize_gallery(doc: &Value) -> Vec<Album> {
    let top = pick(doc, fields::ALBUM_LIST).filter(|value| is_truthy(value));
    let raw_albums = top.or_else(|| {
        pick(doc, fields::GALLERY_WRAPPER)
            .and_then(|wrapper| pick(wrapper, fields::ALBUM_LIST))
            .filter(|value| is_truthy(value))
    });

    let entries: Vec<&Value> = match raw_albums {
        Some(Value::Array(entries)) => entries.iter().collect(),
        Some(other) => vec![other],
        None => Vec::new(),
    };
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let album = normalize_album(entry);
            if album.is_none() {
                debug!(index, "skipping null album");
            }
            album
        })
        .collect()
}
