use serde::{Deserialize, Serialize};

use super::bookmark::{Bookmark, Folder};
use super::group::Group;

/// The full persisted state at a point in time: the unit of persistence for
/// both the local blob store and the remote file.
///
/// Every field defaults to empty so that older files missing a collection
/// (or an empty file) still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty() && self.folders.is_empty() && self.groups.is_empty()
    }
}
