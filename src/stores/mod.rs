//! In-memory collection stores.
//!
//! Each store exclusively owns one entity collection and exposes CRUD and
//! bulk operations. Mutations are synchronous, infallible on well-formed
//! input, and purely in-memory; persisting the result is scheduled by the
//! owning [`Vault`](crate::app::Vault) through its save queues.

pub mod bookmark_store;
pub mod folder_store;
pub mod group_store;

pub use bookmark_store::BookmarkStore;
pub use folder_store::FolderStore;
pub use group_store::GroupStore;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current UNIX timestamp in milliseconds.
pub(crate) fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Generates a fresh opaque unique id.
pub(crate) fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
