//! Bookmark collection store.
//!
//! Owns the full bookmark list in memory. New bookmarks are prepended;
//! import merges reconcile by id (incoming wins) and re-sort the collection
//! newest-first by creation time.

use std::collections::{HashMap, HashSet};

use crate::types::Bookmark;

use super::{fresh_id, now_millis};

/// In-memory owner of the bookmark collection.
#[derive(Debug, Default)]
pub struct BookmarkStore {
    items: Vec<Bookmark>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Atomically replaces the entire collection. Used for initial hydration
    /// and for discarding state on sign-out.
    pub fn replace_all(&mut self, items: Vec<Bookmark>) {
        self.items = items;
    }

    /// Adds a new bookmark at the front of the collection and returns its id.
    ///
    /// The url is normalized to carry a scheme; a bare host gets `https://`.
    pub fn add(&mut self, title: &str, url: &str, folder_id: Option<String>) -> String {
        let bookmark = Bookmark {
            id: fresh_id(),
            title: title.trim().to_string(),
            url: ensure_scheme(url),
            created_at: now_millis(),
            folder_id,
        };
        let id = bookmark.id.clone();
        self.items.insert(0, bookmark);
        id
    }

    /// Replaces the record matching `updated.id`, re-normalizing the url.
    /// A no-op when no record matches.
    pub fn update(&mut self, mut updated: Bookmark) {
        updated.url = ensure_scheme(&updated.url);
        if let Some(existing) = self.items.iter_mut().find(|b| b.id == updated.id) {
            *existing = updated;
        }
    }

    /// Removes the bookmark with the given id, if present.
    pub fn delete(&mut self, id: &str) {
        self.items.retain(|b| b.id != id);
    }

    /// Removes every bookmark whose id is in `ids`. A no-op for ids that
    /// match nothing.
    pub fn delete_many(&mut self, ids: &[String]) {
        let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();
        self.items.retain(|b| !ids.contains(b.id.as_str()));
    }

    /// Sets `folder_id` on every bookmark whose id is in `ids`, leaving the
    /// rest untouched.
    pub fn move_many(&mut self, ids: &[String], folder_id: Option<String>) {
        let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();
        for bookmark in self.items.iter_mut() {
            if ids.contains(bookmark.id.as_str()) {
                bookmark.folder_id = folder_id.clone();
            }
        }
    }

    /// Merges an imported list into the collection.
    ///
    /// Reconciliation is by id: an incoming record with a matching id
    /// unconditionally overwrites the existing one, and unmatched records are
    /// inserted. Incoming records without an id are dropped; an empty
    /// `folder_id` collapses to `None`. The merged collection is sorted by
    /// `created_at` descending (stable, so equal timestamps keep their
    /// pre-sort order).
    pub fn import_merge(&mut self, incoming: Vec<Bookmark>) {
        let mut merged = std::mem::take(&mut self.items);
        let mut index: HashMap<String, usize> = merged
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id.clone(), i))
            .collect();

        for mut bookmark in incoming {
            if bookmark.id.is_empty() {
                continue;
            }
            if bookmark.folder_id.as_deref() == Some("") {
                bookmark.folder_id = None;
            }
            match index.get(&bookmark.id) {
                Some(&slot) => merged[slot] = bookmark,
                None => {
                    index.insert(bookmark.id.clone(), merged.len());
                    merged.push(bookmark);
                }
            }
        }

        merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.items = merged;
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.items.iter().find(|b| b.id == id)
    }

    pub fn all(&self) -> &[Bookmark] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Prepends `https://` when the url carries no `http://`/`https://` scheme.
pub fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
