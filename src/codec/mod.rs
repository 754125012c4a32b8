//! Import/export codec for the bookmark collection.
//!
//! Two exchange formats: a structured JSON list and the Netscape
//! bookmark-file markup emitted by browsers. Import is all-or-nothing for
//! JSON (one malformed item rejects the file) and best-effort for markup
//! (links missing a url or title are dropped).

pub mod json;
pub mod netscape;

use crate::types::errors::ImportError;
use crate::types::Bookmark;

/// Parses an import payload, dispatching on the file name's extension.
///
/// Returns [`ImportError::Empty`] when the file parsed but yielded no
/// bookmarks, so a caller never merges an empty import silently.
pub fn import(file_name: &str, content: &str) -> Result<Vec<Bookmark>, ImportError> {
    let lower = file_name.to_ascii_lowercase();
    let bookmarks = if lower.ends_with(".json") {
        json::parse(content)?
    } else if lower.ends_with(".html") || lower.ends_with(".htm") {
        netscape::parse(content)
    } else {
        return Err(ImportError::UnsupportedFormat(file_name.to_string()));
    };

    if bookmarks.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(bookmarks)
}
