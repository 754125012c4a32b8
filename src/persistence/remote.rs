//! Remote persistence: one JSON file in the drive-style store.
//!
//! The destination file is resolved once per session (found by exact name
//! among non-trashed root files, created when absent) and the resolved id
//! is cached until [`RemoteStore::reset`] is called on sign-out.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::services::drive_client::DriveClient;
use crate::types::errors::PersistenceError;
use crate::types::Snapshot;

use super::PersistencePort;

/// Name of the snapshot file in the remote store's root scope.
pub const DATA_FILE_NAME: &str = "bookvault-data.json";

/// The remote file operations the store needs, as [`DriveClient`] provides
/// them. A seam so the store can be exercised against a fake backend.
#[async_trait]
pub trait RemoteFileApi: Send + Sync {
    /// Finds a file by exact name, returning its id when present.
    async fn find_file(&self, name: &str) -> Result<Option<String>, PersistenceError>;

    /// Creates an empty file with the given name and returns its id.
    async fn create_file(&self, name: &str) -> Result<String, PersistenceError>;

    /// Downloads a file's raw content.
    async fn download(&self, file_id: &str) -> Result<String, PersistenceError>;

    /// Overwrites an existing file's name and content.
    async fn upload(
        &self,
        file_id: &str,
        name: &str,
        content_json: &str,
    ) -> Result<(), PersistenceError>;
}

#[async_trait]
impl RemoteFileApi for DriveClient {
    async fn find_file(&self, name: &str) -> Result<Option<String>, PersistenceError> {
        DriveClient::find_file(self, name).await
    }

    async fn create_file(&self, name: &str) -> Result<String, PersistenceError> {
        DriveClient::create_file(self, name).await
    }

    async fn download(&self, file_id: &str) -> Result<String, PersistenceError> {
        DriveClient::download(self, file_id).await
    }

    async fn upload(
        &self,
        file_id: &str,
        name: &str,
        content_json: &str,
    ) -> Result<(), PersistenceError> {
        self.upload_multipart(file_id, name, content_json).await
    }
}

/// Persistence backend over the remote file API.
pub struct RemoteStore {
    api: Arc<dyn RemoteFileApi>,
    file_id: Mutex<Option<String>>,
}

impl RemoteStore {
    pub fn new(api: Arc<dyn RemoteFileApi>) -> Self {
        Self {
            api,
            file_id: Mutex::new(None),
        }
    }

    /// Forgets the cached destination file id. Called on sign-out so a later
    /// session resolves its own destination.
    pub fn reset(&self) {
        if let Ok(mut cached) = self.file_id.try_lock() {
            *cached = None;
        }
    }

    /// Resolves (and caches) the destination file id: find by exact name,
    /// create when absent.
    async fn destination(&self) -> Result<String, PersistenceError> {
        let mut cached = self.file_id.lock().await;
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }
        let id = match self.api.find_file(DATA_FILE_NAME).await? {
            Some(id) => id,
            None => self.api.create_file(DATA_FILE_NAME).await?,
        };
        *cached = Some(id.clone());
        Ok(id)
    }

    async fn try_load(&self) -> Result<Snapshot, PersistenceError> {
        let file_id = self.destination().await?;
        let raw = self.api.download(&file_id).await?;
        if raw.trim().is_empty() {
            // A freshly created destination has no content yet.
            return Ok(Snapshot::default());
        }
        serde_json::from_str(&raw).map_err(|e| PersistenceError::Encode(e.to_string()))
    }
}

#[async_trait]
impl PersistencePort for RemoteStore {
    async fn load(&self) -> Snapshot {
        match self.try_load().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "remote snapshot load failed; starting empty");
                Snapshot::default()
            }
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let file_id = self.destination().await?;
        let content =
            serde_json::to_string(snapshot).map_err(|e| PersistenceError::Encode(e.to_string()))?;
        self.api.upload(&file_id, DATA_FILE_NAME, &content).await
    }
}
