//! Persistence layer: the load/save boundary and its two backends.
//!
//! The [`PersistencePort`] trait hides whether a snapshot lands in the local
//! blob store or the remote file store. `load` is fail-soft: absence or a
//! decode error yields an empty snapshot, never an error. `save` is
//! best-effort and reported to the caller only so the save queue can log it.

pub mod blob;
pub mod local;
pub mod remote;
pub mod save_queue;

pub use blob::{BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use local::LocalStore;
pub use remote::{RemoteFileApi, RemoteStore};
pub use save_queue::SaveQueue;

use async_trait::async_trait;

use crate::types::errors::PersistenceError;
use crate::types::Snapshot;

/// Abstract load/save boundary behind which local and remote backends are
/// interchangeable.
#[async_trait]
pub trait PersistencePort: Send + Sync {
    /// Loads the persisted snapshot. Never fails visibly: missing or
    /// undecodable data comes back as empty collections.
    async fn load(&self) -> Snapshot;

    /// Writes the snapshot. Best-effort; a failure must not be treated as
    /// fatal by callers (in-memory state stays authoritative).
    async fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError>;
}
