//! HTTP client for the remote key-file store.
//!
//! The remote backend is treated as an opaque drive-style API: files are
//! found by exact name in the non-trashed root scope, created when absent,
//! downloaded as raw media and overwritten through a multipart PATCH. A
//! small document surface (create, insert text, grant read permission)
//! backs bookmark sharing.

use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::types::errors::{PersistenceError, ShareError};

const FILES_BASE: &str = "https://www.googleapis.com/drive/v3";
const UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";
const DOCS_BASE: &str = "https://docs.googleapis.com/v1";

/// Fixed boundary for the multipart/related upload body.
pub const MULTIPART_BOUNDARY: &str = "-------314159265358979323846";

/// Shared slot for the session's bearer token.
///
/// The sync session writes it on sign-in and clears it on sign-out; the
/// client reads it per request.
#[derive(Clone, Default)]
pub struct TokenSlot {
    inner: Arc<Mutex<Option<String>>>,
}

impl TokenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: String) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some(token);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = None;
        }
    }

    pub fn get(&self) -> Option<String> {
        self.inner.lock().ok().and_then(|slot| slot.clone())
    }
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileRef>,
}

#[derive(Deserialize)]
struct FileRef {
    id: String,
}

#[derive(Deserialize)]
struct DocRef {
    #[serde(rename = "documentId")]
    document_id: String,
}

/// Thin async client over the drive-style remote store.
pub struct DriveClient {
    http: reqwest::Client,
    token: TokenSlot,
    files_base: String,
    upload_base: String,
    docs_base: String,
}

impl DriveClient {
    pub fn new(token: TokenSlot) -> Self {
        Self::with_base_urls(token, FILES_BASE, UPLOAD_BASE, DOCS_BASE)
    }

    /// Client with overridden endpoints, for pointing at a stand-in server.
    pub fn with_base_urls(
        token: TokenSlot,
        files_base: impl Into<String>,
        upload_base: impl Into<String>,
        docs_base: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            files_base: files_base.into(),
            upload_base: upload_base.into(),
            docs_base: docs_base.into(),
        }
    }

    pub fn token_slot(&self) -> &TokenSlot {
        &self.token
    }

    fn bearer(&self) -> Result<String, PersistenceError> {
        self.token.get().ok_or(PersistenceError::NotAuthenticated)
    }

    /// Finds a file by exact name among non-trashed files in the root scope.
    pub async fn find_file(&self, name: &str) -> Result<Option<String>, PersistenceError> {
        let token = self.bearer()?;
        let query = format!(
            "name='{}' and trashed=false and 'root' in parents",
            name.replace('\'', "\\'")
        );
        let response = self
            .http
            .get(format!("{}/files", self.files_base))
            .query(&[
                ("q", query.as_str()),
                ("spaces", "drive"),
                ("fields", "files(id, name)"),
            ])
            .bearer_auth(&token)
            .send()
            .await
            .map_err(network)?;
        let listing: FileList = expect_success(response).await?.json().await.map_err(network)?;
        Ok(listing.files.into_iter().next().map(|f| f.id))
    }

    /// Creates an empty JSON file with the given name and returns its id.
    pub async fn create_file(&self, name: &str) -> Result<String, PersistenceError> {
        let token = self.bearer()?;
        let response = self
            .http
            .post(format!("{}/files", self.files_base))
            .query(&[("fields", "id")])
            .bearer_auth(&token)
            .json(&serde_json::json!({
                "name": name,
                "mimeType": "application/json",
            }))
            .send()
            .await
            .map_err(network)?;
        let file: FileRef = expect_success(response).await?.json().await.map_err(network)?;
        Ok(file.id)
    }

    /// Downloads a file's raw content.
    pub async fn download(&self, file_id: &str) -> Result<String, PersistenceError> {
        let token = self.bearer()?;
        let response = self
            .http
            .get(format!("{}/files/{}", self.files_base, file_id))
            .query(&[("alt", "media")])
            .bearer_auth(&token)
            .send()
            .await
            .map_err(network)?;
        expect_success(response).await?.text().await.map_err(network)
    }

    /// Overwrites an existing file's name and content in one multipart
    /// PATCH request.
    pub async fn upload_multipart(
        &self,
        file_id: &str,
        name: &str,
        content_json: &str,
    ) -> Result<(), PersistenceError> {
        let token = self.bearer()?;
        let metadata = serde_json::json!({
            "name": name,
            "mimeType": "application/json",
        })
        .to_string();
        let body = multipart_related_body(&metadata, content_json);
        let response = self
            .http
            .patch(format!("{}/files/{}", self.upload_base, file_id))
            .query(&[("uploadType", "multipart")])
            .bearer_auth(&token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary=\"{}\"", MULTIPART_BOUNDARY),
            )
            .body(body)
            .send()
            .await
            .map_err(network)?;
        expect_success(response).await?;
        Ok(())
    }

    // --- Document sharing surface ---

    /// Creates a document with the given title and returns its id.
    pub async fn create_document(&self, title: &str) -> Result<String, ShareError> {
        let token = self
            .bearer()
            .map_err(|e| ShareError::DocumentCreation(e.to_string()))?;
        let response = self
            .http
            .post(format!("{}/documents", self.docs_base))
            .bearer_auth(&token)
            .json(&serde_json::json!({ "title": title }))
            .send()
            .await
            .map_err(|e| ShareError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ShareError::DocumentCreation(format!(
                "status {}",
                response.status()
            )));
        }
        let doc: DocRef = response
            .json()
            .await
            .map_err(|e| ShareError::Network(e.to_string()))?;
        Ok(doc.document_id)
    }

    /// Inserts text at the top of a document.
    pub async fn insert_document_text(&self, doc_id: &str, text: &str) -> Result<(), ShareError> {
        let token = self
            .bearer()
            .map_err(|e| ShareError::DocumentCreation(e.to_string()))?;
        let response = self
            .http
            .post(format!("{}/documents/{}:batchUpdate", self.docs_base, doc_id))
            .bearer_auth(&token)
            .json(&serde_json::json!({
                "requests": [{
                    "insertText": {
                        "location": { "index": 1 },
                        "text": text,
                    }
                }]
            }))
            .send()
            .await
            .map_err(|e| ShareError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ShareError::DocumentCreation(format!(
                "status {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Grants read access on a file to one email address, with notification.
    /// Failures here are per-recipient and collected by the caller.
    pub async fn grant_reader(&self, file_id: &str, email: &str) -> Result<(), ShareError> {
        let token = self
            .bearer()
            .map_err(|e| ShareError::DocumentCreation(e.to_string()))?;
        let response = self
            .http
            .post(format!("{}/files/{}/permissions", self.files_base, file_id))
            .query(&[("sendNotificationEmail", "true")])
            .bearer_auth(&token)
            .json(&serde_json::json!({
                "type": "user",
                "role": "reader",
                "emailAddress": email,
            }))
            .send()
            .await
            .map_err(|e| ShareError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ShareError::Network(format!("status {}", response.status())));
        }
        Ok(())
    }
}

/// Builds the two-part multipart/related body used for content uploads:
/// a JSON metadata part followed by a JSON content part, joined by the
/// fixed boundary.
pub fn multipart_related_body(metadata_json: &str, content_json: &str) -> String {
    let delimiter = format!("\r\n--{}\r\n", MULTIPART_BOUNDARY);
    let close_delimiter = format!("\r\n--{}--", MULTIPART_BOUNDARY);
    format!(
        "{delimiter}Content-Type: application/json\r\n\r\n{metadata_json}\
         {delimiter}Content-Type: application/json\r\n\r\n{content_json}\
         {close_delimiter}"
    )
}

fn network(e: reqwest::Error) -> PersistenceError {
    PersistenceError::Network(e.to_string())
}

async fn expect_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, PersistenceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(PersistenceError::Remote(format!("status {}", status)))
    }
}
