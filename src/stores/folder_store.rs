//! Folder collection store.
//!
//! Folders are kept name-sorted. `parent_id` is stored but never traversed.

use crate::types::Folder;

use super::{fresh_id, now_millis};

/// In-memory owner of the folder collection.
#[derive(Debug, Default)]
pub struct FolderStore {
    items: Vec<Folder>,
}

impl FolderStore {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Atomically replaces the entire collection.
    pub fn replace_all(&mut self, items: Vec<Folder>) {
        self.items = items;
    }

    /// Adds a new folder, keeping the collection sorted by name, and returns
    /// the new folder's id.
    pub fn add(&mut self, name: &str, parent_id: Option<String>) -> String {
        let folder = Folder {
            id: fresh_id(),
            name: name.trim().to_string(),
            parent_id,
            created_at: now_millis(),
        };
        let id = folder.id.clone();
        self.items.push(folder);
        self.items.sort_by(|a, b| a.name.cmp(&b.name));
        id
    }

    /// Replaces the record matching `updated.id`, then restores name order.
    /// A no-op when no record matches.
    pub fn update(&mut self, updated: Folder) {
        if let Some(existing) = self.items.iter_mut().find(|f| f.id == updated.id) {
            *existing = updated;
            self.items.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    /// Removes the folder with the given id, if present. Bookmarks pointing
    /// at the removed folder keep their dangling reference; views resolve it
    /// to "Uncategorized".
    pub fn delete(&mut self, id: &str) {
        self.items.retain(|f| f.id != id);
    }

    /// Name lookup for labeling views. `None` for unknown ids.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.name.as_str())
    }

    pub fn all(&self) -> &[Folder] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
