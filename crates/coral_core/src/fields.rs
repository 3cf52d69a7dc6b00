//! Accepted field names in CMS documents. First match wins.

use serde_json::Value;

pub const ALBUM_LIST: &[&str] = &["albuns", "álbuns", "albums", "lista"];
pub const GALLERY_WRAPPER: &[&str] = &["galeria"];

pub const TITLE: &[&str] = &["titulo", "title", "nome"];
pub const DESCRIPTION: &[&str] = &["descricao", "descrição", "description"];
pub const COVER: &[&str] = &["capa", "cover", "thumb", "thumbnail", "imagem"];

pub const PHOTO_LIST: &[&str] = &[
    "fotos",
    "fotos_multi",
    "fotos_multiplas",
    "fotos_multipla",
    "imagens",
    "images",
    "photos",
];
pub const VIDEO_LIST: &[&str] = &["videos", "vídeos", "clips"];
pub const MIXED_LIST: &[&str] = &["itens", "items"];

pub const PHOTO_URL: &[&str] = &["src", "url", "imagem", "image", "foto", "path"];
pub const VIDEO_URL: &[&str] = &["src", "url", "video"];
pub const CAPTION: &[&str] = &["alt", "legenda", "caption"];
pub const ITEM_TYPE: &[&str] = &["tipo", "type"];

pub const VIDEO_TYPE_NAMES: &[&str] = &["video", "vídeo"];

/// First key that exists on `obj`, including keys holding `null`.
pub fn pick<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = obj.as_object()?;
    keys.iter().find_map(|key| map.get(*key))
}

pub fn pick_text<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a str> {
    let map = obj.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find_map(|value| value.as_str().filter(|text| !text.is_empty()))
}

/// Loose truthiness of a JSON value: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Flattened one level. A single truthy value is a one-entry list.
pub fn flat_list(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(entries)) => entries
            .iter()
            .flat_map(|entry| match entry {
                Value::Array(inner) => inner.iter().collect::<Vec<_>>(),
                other => vec![other],
            })
            .collect(),
        Some(other) if is_truthy(other) => vec![other],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{flat_list, is_truthy, pick, pick_text};
    use serde_json::json;

    #[test]
    fn pick_stops_at_null_valued_key() {
        let raw = json!({"titulo": null, "title": "Later"});
        assert_eq!(pick(&raw, &["titulo", "title"]), Some(&json!(null)));
    }

    #[test]
    fn pick_text_skips_empty_strings() {
        let raw = json!({"src": "", "url": "b.jpg"});
        assert_eq!(pick_text(&raw, &["src", "url"]), Some("b.jpg"));
    }

    #[test]
    fn flat_list_spreads_one_level_only() {
        let raw = json!([["a.jpg", ["deep.jpg"]], "b.jpg"]);
        let flat = flat_list(Some(&raw));
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0], &json!("a.jpg"));
        assert_eq!(flat[1], &json!(["deep.jpg"]));
        assert_eq!(flat[2], &json!("b.jpg"));
    }

    #[test]
    fn empty_array_is_truthy() {
        assert!(is_truthy(&json!([])));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
    }
}
