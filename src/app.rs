//! Vault: the composition root.
//!
//! Constructs the three collection stores, the persistence backends and the
//! sync session once, with explicit wiring and no process-wide state. Every
//! mutating method applies the change in memory synchronously, then
//! schedules a write-through save of the current snapshot on the local
//! queue and, while signed in, on the session's remote queue.

use std::sync::Arc;

use crate::codec;
use crate::persistence::{BlobStore, LocalStore, PersistencePort, RemoteStore, SaveQueue};
use crate::services::drive_client::DriveClient;
use crate::services::share::{share_bookmark_as_doc, ShareReport};
use crate::services::sync_session::{SyncSession, TokenProvider};
use crate::stores::{BookmarkStore, FolderStore, GroupStore};
use crate::types::errors::{ImportError, SessionError, ShareError};
use crate::types::{Bookmark, Folder, Group, Snapshot};
use crate::view::{BookmarkView, FolderGroup};

/// Fixed page size of the bookmark view.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Application instance: stores, view state, persistence and session.
pub struct Vault {
    bookmarks: BookmarkStore,
    folders: FolderStore,
    groups: GroupStore,
    view: BookmarkView,
    local_queue: SaveQueue,
    remote_store: Arc<RemoteStore>,
    drive: Arc<DriveClient>,
    session: SyncSession,
}

impl Vault {
    /// Builds a vault over the given local blob store, identity provider and
    /// remote client, hydrating the collections from the local cache.
    pub async fn new(
        blob: Arc<dyn BlobStore>,
        provider: Arc<dyn TokenProvider>,
        drive: DriveClient,
    ) -> Self {
        let drive = Arc::new(drive);
        let token = drive.token_slot().clone();

        let local_store = Arc::new(LocalStore::new(blob));
        let initial = local_store.load().await;

        let mut bookmarks = BookmarkStore::new();
        bookmarks.replace_all(initial.bookmarks);
        let mut folders = FolderStore::new();
        folders.replace_all(initial.folders);
        let mut groups = GroupStore::new();
        groups.replace_all(initial.groups);

        let remote_store = Arc::new(RemoteStore::new(drive.clone()));
        let session = SyncSession::new(
            provider,
            remote_store.clone() as Arc<dyn PersistencePort>,
            token,
        );

        Self {
            bookmarks,
            folders,
            groups,
            view: BookmarkView::new(DEFAULT_PAGE_SIZE),
            local_queue: SaveQueue::new(local_store),
            remote_store,
            drive,
            session,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            bookmarks: self.bookmarks.all().to_vec(),
            folders: self.folders.all().to_vec(),
            groups: self.groups.all().to_vec(),
        }
    }

    /// Schedules a write-through save of the current state. Local always;
    /// remote only while a session queue exists.
    fn persist(&self) {
        let snapshot = self.snapshot();
        if let Some(remote_queue) = self.session.remote_queue() {
            remote_queue.schedule(snapshot.clone());
        }
        self.local_queue.schedule(snapshot);
    }

    // --- Bookmarks ---

    pub fn add_bookmark(&mut self, title: &str, url: &str, folder_id: Option<String>) -> String {
        let id = self.bookmarks.add(title, url, folder_id);
        self.persist();
        id
    }

    pub fn update_bookmark(&mut self, bookmark: Bookmark) {
        self.bookmarks.update(bookmark);
        self.persist();
    }

    pub fn delete_bookmark(&mut self, id: &str) {
        self.bookmarks.delete(id);
        self.view.retain_existing(self.bookmarks.all());
        self.view.clamp_page(self.bookmarks.len());
        self.persist();
    }

    /// Deletes every selected bookmark, clears the selection and pulls the
    /// current page back into range.
    pub fn delete_selected(&mut self) {
        let ids = self.view.selected_ids();
        self.bookmarks.delete_many(&ids);
        self.view.clear_selection();
        self.view.clamp_page(self.bookmarks.len());
        self.persist();
    }

    /// Moves every selected bookmark into `folder_id` and clears the
    /// selection.
    pub fn move_selected(&mut self, folder_id: Option<String>) {
        let ids = self.view.selected_ids();
        self.bookmarks.move_many(&ids, folder_id);
        self.view.clear_selection();
        self.persist();
    }

    /// Parses an import payload and merges it into the collection.
    /// Returns the number of imported entries. A parse or validation error
    /// leaves the collection untouched.
    pub fn import_bookmarks(
        &mut self,
        file_name: &str,
        content: &str,
    ) -> Result<usize, ImportError> {
        let incoming = codec::import(file_name, content)?;
        let count = incoming.len();
        self.bookmarks.import_merge(incoming);
        self.view.clamp_page(self.bookmarks.len());
        self.persist();
        Ok(count)
    }

    /// The full collection as pretty-printed JSON.
    pub fn export_json(&self) -> String {
        codec::json::export(self.bookmarks.all())
    }

    /// The full collection as a Netscape bookmark-file document.
    pub fn export_netscape(&self) -> String {
        codec::netscape::export(self.bookmarks.all())
    }

    // --- Folders ---

    pub fn add_folder(&mut self, name: &str, parent_id: Option<String>) -> String {
        let id = self.folders.add(name, parent_id);
        self.persist();
        id
    }

    pub fn update_folder(&mut self, folder: Folder) {
        self.folders.update(folder);
        self.persist();
    }

    /// Deletes a folder. Bookmarks keep their (now dangling) reference and
    /// surface under "Uncategorized" in folder views.
    pub fn delete_folder(&mut self, id: &str) {
        self.folders.delete(id);
        self.persist();
    }

    // --- Groups ---

    pub fn add_group(&mut self, name: &str, emails: &[String]) -> String {
        let id = self.groups.add(name, emails);
        self.persist();
        id
    }

    pub fn update_group(&mut self, group: Group) {
        self.groups.update(group);
        self.persist();
    }

    pub fn delete_group(&mut self, id: &str) {
        self.groups.delete(id);
        self.persist();
    }

    // --- Session ---

    /// Signs in and, unless a sign-out superseded the in-flight load,
    /// replaces all three collections with the remote snapshot.
    pub async fn sign_in(&mut self) -> Result<(), SessionError> {
        if let Some(snapshot) = self.session.sign_in().await? {
            self.bookmarks.replace_all(snapshot.bookmarks);
            self.folders.replace_all(snapshot.folders);
            self.groups.replace_all(snapshot.groups);
            self.view.clear_selection();
            self.view.clamp_page(self.bookmarks.len());
            self.persist();
        }
        Ok(())
    }

    /// Signs out, discards the cached remote destination and clears the
    /// local copies of all three collections.
    pub async fn sign_out(&mut self) {
        self.session.sign_out().await;
        self.remote_store.reset();
        self.bookmarks.replace_all(Vec::new());
        self.folders.replace_all(Vec::new());
        self.groups.replace_all(Vec::new());
        self.view.clear_selection();
        self.view.clamp_page(0);
        self.persist();
    }

    /// Marks the session as failed to initialize (identity client
    /// unreachable or misconfigured). Sign-in stays blocked until an
    /// external retry rebuilds the vault.
    pub fn mark_session_init_failed(&mut self, message: impl Into<String>) {
        self.session.mark_init_failed(message);
    }

    /// Shares a bookmark with a group as a generated document. Best-effort
    /// per recipient; see [`ShareReport`].
    pub async fn share_bookmark(
        &self,
        bookmark_id: &str,
        group_id: &str,
    ) -> Result<ShareReport, ShareError> {
        let bookmark = self
            .bookmarks
            .get(bookmark_id)
            .ok_or_else(|| ShareError::NotFound(format!("bookmark {}", bookmark_id)))?;
        let group = self
            .groups
            .get(group_id)
            .ok_or_else(|| ShareError::NotFound(format!("group {}", group_id)))?;
        share_bookmark_as_doc(&self.drive, bookmark, group).await
    }

    // --- Views and accessors ---

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn folders(&self) -> &FolderStore {
        &self.folders
    }

    pub fn groups(&self) -> &GroupStore {
        &self.groups
    }

    pub fn session(&self) -> &SyncSession {
        &self.session
    }

    pub fn view(&self) -> &BookmarkView {
        &self.view
    }

    /// The current page of the bookmark collection, in store order.
    pub fn page(&self) -> &[Bookmark] {
        self.view.page_slice(self.bookmarks.all())
    }

    /// The current page partitioned into labeled folder buckets.
    pub fn grouped_page(&self) -> Vec<FolderGroup> {
        self.view.grouped_by_folder(self.bookmarks.all(), &self.folders)
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.view.go_to_page(page, self.bookmarks.len());
    }

    pub fn toggle_selection(&mut self, id: &str) {
        self.view.toggle(id);
    }

    pub fn toggle_select_page(&mut self) {
        self.view.toggle_select_page(self.bookmarks.all());
    }

    pub fn select_all(&mut self) {
        self.view.select_all(self.bookmarks.all());
    }

    pub fn clear_selection(&mut self) {
        self.view.clear_selection();
    }

    /// Flushes and closes both save queues. Call before dropping the vault
    /// when pending writes must land.
    pub async fn shutdown(mut self) {
        self.session.shutdown().await;
        self.local_queue.shutdown().await;
    }
}
