//! JSON exchange format.
//!
//! Import requires an array of objects each carrying string `id`, `title`,
//! `url` and numeric `createdAt`; any item failing that shape rejects the
//! whole file. Export is the pretty-printed full collection.

use serde_json::Value;

use crate::types::errors::ImportError;
use crate::types::Bookmark;

/// Parses and validates a JSON bookmark list.
pub fn parse(content: &str) -> Result<Vec<Bookmark>, ImportError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| ImportError::Parse(e.to_string()))?;

    let items = value.as_array().ok_or_else(|| {
        ImportError::InvalidShape("the JSON data must be an array of bookmarks".to_string())
    })?;

    let mut bookmarks = Vec::with_capacity(items.len());
    for item in items {
        bookmarks.push(parse_item(item)?);
    }
    Ok(bookmarks)
}

fn parse_item(item: &Value) -> Result<Bookmark, ImportError> {
    let shape_error = || {
        ImportError::InvalidShape(
            "each bookmark must have id, title, url and createdAt properties with correct types"
                .to_string(),
        )
    };

    let obj = item.as_object().ok_or_else(shape_error)?;
    let id = obj.get("id").and_then(Value::as_str).ok_or_else(shape_error)?;
    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(shape_error)?;
    let url = obj
        .get("url")
        .and_then(Value::as_str)
        .ok_or_else(shape_error)?;
    let created_at = obj
        .get("createdAt")
        .and_then(number_as_millis)
        .ok_or_else(shape_error)?;

    // folderId is optional; an empty string collapses to None during merge.
    let folder_id = obj
        .get("folderId")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from);

    Ok(Bookmark {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        created_at,
        folder_id,
    })
}

fn number_as_millis(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}

/// Serializes the full bookmark collection as pretty-printed JSON.
pub fn export(bookmarks: &[Bookmark]) -> String {
    // Plain string/integer records; serialization cannot fail in practice.
    serde_json::to_string_pretty(bookmarks).unwrap_or_else(|_| "[]".to_string())
}
