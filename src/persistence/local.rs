//! Local persistence: a JSON snapshot under a fixed key in a blob store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::types::errors::PersistenceError;
use crate::types::Snapshot;

use super::blob::BlobStore;
use super::PersistencePort;

/// Key under which the snapshot lives in the blob store.
pub const DATA_KEY: &str = "bookvault-data";

/// Write-through cache backend over the synchronous local blob store.
pub struct LocalStore {
    blob: Arc<dyn BlobStore>,
}

impl LocalStore {
    pub fn new(blob: Arc<dyn BlobStore>) -> Self {
        Self { blob }
    }
}

#[async_trait]
impl PersistencePort for LocalStore {
    async fn load(&self) -> Snapshot {
        let raw = match self.blob.get(DATA_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Snapshot::default(),
            Err(e) => {
                warn!(error = %e, "local snapshot read failed; starting empty");
                return Snapshot::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "local snapshot undecodable; starting empty");
                Snapshot::default()
            }
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let encoded =
            serde_json::to_string(snapshot).map_err(|e| PersistenceError::Encode(e.to_string()))?;
        self.blob.set(DATA_KEY, &encoded)
    }
}
