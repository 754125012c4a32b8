//! Remote-facing services: the drive-style file API client, the sync
//! session state machine and best-effort bookmark sharing.

pub mod drive_client;
pub mod share;
pub mod sync_session;

pub use drive_client::{DriveClient, TokenSlot};
pub use share::{share_bookmark_as_doc, ShareReport};
pub use sync_session::{SyncSession, TokenProvider};
