//! Sharing a bookmark with a group as a generated document.
//!
//! The document is created once and then offered to every group member.
//! Per-recipient permission failures (typically an invalid address) are
//! collected and logged without aborting the share.

use tracing::warn;

use crate::types::errors::ShareError;
use crate::types::{Bookmark, Group};

use super::drive_client::DriveClient;

/// One recipient the share could not reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareFailure {
    pub email: String,
    pub reason: String,
}

/// Outcome of a best-effort share operation.
#[derive(Debug, Clone)]
pub struct ShareReport {
    pub document_id: String,
    pub shared_with: Vec<String>,
    pub failed: Vec<ShareFailure>,
}

/// Creates a document describing the bookmark and grants read access to
/// every email in the group.
///
/// Document creation failures abort the share; permission failures do not.
pub async fn share_bookmark_as_doc(
    client: &DriveClient,
    bookmark: &Bookmark,
    group: &Group,
) -> Result<ShareReport, ShareError> {
    let document_id = client
        .create_document(&format!("Shared Bookmark: {}", bookmark.title))
        .await?;

    client
        .insert_document_text(
            &document_id,
            &format!(
                "Shared via Bookmark Manager\n\nTitle: {}\nURL: {}\n",
                bookmark.title, bookmark.url
            ),
        )
        .await?;

    let mut shared_with = Vec::new();
    let mut failed = Vec::new();
    for email in &group.emails {
        match client.grant_reader(&document_id, email).await {
            Ok(()) => shared_with.push(email.clone()),
            Err(e) => {
                warn!(email = %email, error = %e, "could not share document with recipient");
                failed.push(ShareFailure {
                    email: email.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(ShareReport {
        document_id,
        shared_with,
        failed,
    })
}
