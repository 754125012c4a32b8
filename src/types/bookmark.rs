use serde::{Deserialize, Serialize};

/// A saved bookmark.
///
/// `created_at` is milliseconds since the UNIX epoch. `folder_id` is a plain
/// reference with no integrity enforcement; a dangling id resolves to
/// "Uncategorized" at view time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub created_at: i64,
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// A folder for organizing bookmarks.
///
/// `parent_id` is stored but never traversed; there is no nesting semantics
/// beyond the flat pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub created_at: i64,
}
