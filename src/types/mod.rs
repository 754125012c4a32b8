//! Shared type definitions for BookVault.

pub mod bookmark;
pub mod errors;
pub mod group;
pub mod session;
pub mod snapshot;

pub use bookmark::{Bookmark, Folder};
pub use group::Group;
pub use session::SessionState;
pub use snapshot::Snapshot;
