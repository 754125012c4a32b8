//! Selection and pagination over the bookmark collection.
//!
//! The controller never re-sorts the collection: it windows whatever order
//! the store hands it. The selected-id set is independent of the current
//! page, so selections survive navigation.

use std::collections::HashSet;

use crate::stores::FolderStore;
use crate::types::Bookmark;

/// Label used for bookmarks with no folder or a dangling folder reference.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One folder bucket of the current page, labeled for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderGroup {
    pub label: String,
    pub bookmarks: Vec<Bookmark>,
}

/// Pagination state plus the cross-page selection set.
#[derive(Debug)]
pub struct BookmarkView {
    current_page: usize,
    page_size: usize,
    selected: HashSet<String>,
}

impl BookmarkView {
    /// Creates a view with the given fixed page size (minimum 1). Pages are
    /// 1-based.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            selected: HashSet::new(),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for a collection of `total_items`; never less than 1.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size).max(1)
    }

    /// Navigates to `page` when it is within bounds; out-of-range requests
    /// are ignored.
    pub fn go_to_page(&mut self, page: usize, total_items: usize) {
        if page >= 1 && page <= self.total_pages(total_items) {
            self.current_page = page;
        }
    }

    /// Pulls the current page back to the last page when the collection
    /// shrank underneath it (e.g. after a bulk delete).
    pub fn clamp_page(&mut self, total_items: usize) {
        let last = self.total_pages(total_items);
        if self.current_page > last {
            self.current_page = last;
        }
    }

    /// The contiguous window of `items` for the current page.
    pub fn page_slice<'a>(&self, items: &'a [Bookmark]) -> &'a [Bookmark] {
        let start = (self.current_page - 1) * self.page_size;
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    /// Partitions the current page by folder, labeling each bucket with the
    /// folder's name. Bookmarks with no folder or a dangling reference land
    /// under [`UNCATEGORIZED`]. Buckets are ordered alphabetically by label
    /// with the uncategorized bucket always last.
    pub fn grouped_by_folder(&self, items: &[Bookmark], folders: &FolderStore) -> Vec<FolderGroup> {
        let mut groups: Vec<FolderGroup> = Vec::new();
        for bookmark in self.page_slice(items) {
            let label = bookmark
                .folder_id
                .as_deref()
                .and_then(|id| folders.name_of(id))
                .unwrap_or(UNCATEGORIZED);
            match groups.iter_mut().find(|g| g.label == label) {
                Some(group) => group.bookmarks.push(bookmark.clone()),
                None => groups.push(FolderGroup {
                    label: label.to_string(),
                    bookmarks: vec![bookmark.clone()],
                }),
            }
        }
        groups.sort_by(|a, b| {
            match (a.label == UNCATEGORIZED, b.label == UNCATEGORIZED) {
                (true, false) => std::cmp::Ordering::Greater,
                (false, true) => std::cmp::Ordering::Less,
                _ => a.label.cmp(&b.label),
            }
        });
        groups
    }

    // --- Selection ---

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    /// Adds the id to the selection, or removes it when already present.
    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Whether every bookmark on the current page is selected. False for an
    /// empty page.
    pub fn all_on_page_selected(&self, items: &[Bookmark]) -> bool {
        let page = self.page_slice(items);
        !page.is_empty() && page.iter().all(|b| self.selected.contains(&b.id))
    }

    /// Selects every id on the current page, or deselects exactly those ids
    /// when all of them are already selected. Off-page selections are left
    /// untouched either way.
    pub fn toggle_select_page(&mut self, items: &[Bookmark]) {
        let all_selected = self.all_on_page_selected(items);
        for bookmark in self.page_slice(items) {
            if all_selected {
                self.selected.remove(&bookmark.id);
            } else {
                self.selected.insert(bookmark.id.clone());
            }
        }
    }

    /// Replaces the selection with every id in the full collection.
    pub fn select_all(&mut self, items: &[Bookmark]) {
        self.selected = items.iter().map(|b| b.id.clone()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Drops selected ids that no longer exist in the collection.
    pub fn retain_existing(&mut self, items: &[Bookmark]) {
        let live: HashSet<&str> = items.iter().map(|b| b.id.as_str()).collect();
        self.selected.retain(|id| live.contains(id.as_str()));
    }
}

impl Default for BookmarkView {
    fn default() -> Self {
        Self::new(6)
    }
}
