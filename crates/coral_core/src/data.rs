//! Content document loading.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::error::DataError;
use crate::model::Album;
use crate::normalize::normalize_gallery;

pub fn read_json_document(path: &Path) -> Result<Value, DataError> {
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// A missing or broken document is logged and treated as `null`, so the
/// gallery renders empty instead of failing the page.
pub fn load_json_document(path: &Path) -> Value {
    match read_json_document(path) {
        Ok(value) => value,
        Err(err) => {
            warn!("{err}");
            Value::Null
        }
    }
}

pub fn load_gallery(path: &Path) -> Vec<Album> {
    normalize_gallery(&load_json_document(path))
}
