//! Unit tests for the persistence layer: blob stores, the fail-soft local
//! backend, the multipart upload body and the versioned save queue.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bookvault::persistence::{
    BlobStore, LocalStore, MemoryBlobStore, PersistencePort, RemoteFileApi, RemoteStore,
    SaveQueue, SqliteBlobStore,
};
use bookvault::persistence::local::DATA_KEY;
use bookvault::persistence::remote::DATA_FILE_NAME;
use bookvault::services::drive_client::{multipart_related_body, MULTIPART_BOUNDARY};
use bookvault::types::errors::PersistenceError;
use bookvault::types::{Bookmark, Snapshot};

fn sample_snapshot(marker: &str) -> Snapshot {
    Snapshot {
        bookmarks: vec![Bookmark {
            id: marker.to_string(),
            title: marker.to_string(),
            url: format!("https://{}.example", marker),
            created_at: 1,
            folder_id: None,
        }],
        folders: Vec::new(),
        groups: Vec::new(),
    }
}

// === Blob stores ===

#[test]
fn sqlite_blob_store_set_get_overwrite() {
    let store = SqliteBlobStore::open_in_memory().expect("in-memory db opens");

    assert_eq!(store.get("missing").unwrap(), None);

    store.set("k", "v1").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v1"));

    store.set("k", "v2").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
}

#[test]
fn sqlite_blob_store_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("vault.db");

    {
        let store = SqliteBlobStore::open(&path).expect("db opens");
        store.set("k", "persisted").unwrap();
    }

    let reopened = SqliteBlobStore::open(&path).expect("db reopens");
    assert_eq!(reopened.get("k").unwrap().as_deref(), Some("persisted"));
}

// === LocalStore ===

#[tokio::test]
async fn local_load_returns_empty_when_nothing_stored() {
    let local = LocalStore::new(Arc::new(MemoryBlobStore::new()));
    assert_eq!(local.load().await, Snapshot::default());
}

#[tokio::test]
async fn local_load_is_fail_soft_on_undecodable_data() {
    let blob = Arc::new(MemoryBlobStore::new());
    blob.set(DATA_KEY, "{not json").unwrap();

    let local = LocalStore::new(blob);
    assert_eq!(local.load().await, Snapshot::default());
}

#[tokio::test]
async fn local_load_defaults_missing_collections() {
    // An older two-collection file still decodes; folders default to empty.
    let blob = Arc::new(MemoryBlobStore::new());
    blob.set(DATA_KEY, r#"{"bookmarks":[],"groups":[]}"#).unwrap();

    let local = LocalStore::new(blob);
    let snapshot = local.load().await;
    assert!(snapshot.folders.is_empty());
}

#[tokio::test]
async fn local_save_then_load_roundtrips() {
    let local = LocalStore::new(Arc::new(MemoryBlobStore::new()));
    let snapshot = sample_snapshot("roundtrip");

    local.save(&snapshot).await.expect("save succeeds");
    assert_eq!(local.load().await, snapshot);
}

// === RemoteStore ===

/// File backend with one optional pre-existing file, counting API calls.
struct FakeFileApi {
    file: Mutex<Option<(String, String)>>,
    finds: AtomicUsize,
    creates: AtomicUsize,
    uploads: Mutex<Vec<String>>,
}

impl FakeFileApi {
    fn new(existing: Option<&str>) -> Self {
        Self {
            file: Mutex::new(existing.map(|id| (id.to_string(), String::new()))),
            finds: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            uploads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RemoteFileApi for FakeFileApi {
    async fn find_file(&self, name: &str) -> Result<Option<String>, PersistenceError> {
        assert_eq!(name, DATA_FILE_NAME);
        self.finds.fetch_add(1, Ordering::SeqCst);
        Ok(self.file.lock().unwrap().as_ref().map(|(id, _)| id.clone()))
    }

    async fn create_file(&self, _name: &str) -> Result<String, PersistenceError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let id = "created-1".to_string();
        *self.file.lock().unwrap() = Some((id.clone(), String::new()));
        Ok(id)
    }

    async fn download(&self, file_id: &str) -> Result<String, PersistenceError> {
        match self.file.lock().unwrap().as_ref() {
            Some((id, content)) if id == file_id => Ok(content.clone()),
            _ => Err(PersistenceError::Remote("status 404".to_string())),
        }
    }

    async fn upload(
        &self,
        file_id: &str,
        _name: &str,
        content_json: &str,
    ) -> Result<(), PersistenceError> {
        self.uploads.lock().unwrap().push(file_id.to_string());
        match self.file.lock().unwrap().as_mut() {
            Some((id, content)) if id == file_id => {
                *content = content_json.to_string();
                Ok(())
            }
            _ => Err(PersistenceError::Remote("status 404".to_string())),
        }
    }
}

#[tokio::test]
async fn remote_store_resolves_the_destination_once() {
    let api = Arc::new(FakeFileApi::new(Some("file-1")));
    let store = RemoteStore::new(api.clone());

    store.save(&sample_snapshot("a")).await.unwrap();
    store.save(&sample_snapshot("b")).await.unwrap();

    assert_eq!(api.finds.load(Ordering::SeqCst), 1);
    assert_eq!(api.creates.load(Ordering::SeqCst), 0);
    assert_eq!(
        api.uploads.lock().unwrap().as_slice(),
        ["file-1".to_string(), "file-1".to_string()]
    );
}

#[tokio::test]
async fn remote_store_creates_the_file_when_absent() {
    let api = Arc::new(FakeFileApi::new(None));
    let store = RemoteStore::new(api.clone());

    store.save(&sample_snapshot("a")).await.unwrap();
    store.save(&sample_snapshot("b")).await.unwrap();

    assert_eq!(api.finds.load(Ordering::SeqCst), 1);
    assert_eq!(api.creates.load(Ordering::SeqCst), 1);
    assert_eq!(
        api.uploads.lock().unwrap().as_slice(),
        ["created-1".to_string(), "created-1".to_string()]
    );
}

#[tokio::test]
async fn reset_forces_a_fresh_destination_resolution() {
    let api = Arc::new(FakeFileApi::new(Some("file-1")));
    let store = RemoteStore::new(api.clone());

    store.save(&sample_snapshot("a")).await.unwrap();
    store.reset();
    store.save(&sample_snapshot("b")).await.unwrap();

    assert_eq!(api.finds.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn remote_save_then_load_roundtrips() {
    let api = Arc::new(FakeFileApi::new(None));
    let store = RemoteStore::new(api);
    let snapshot = sample_snapshot("remote");

    store.save(&snapshot).await.unwrap();
    assert_eq!(store.load().await, snapshot);
}

#[tokio::test]
async fn remote_load_of_a_fresh_file_is_an_empty_snapshot() {
    // A just-created destination has no content yet.
    let store = RemoteStore::new(Arc::new(FakeFileApi::new(None)));
    assert!(store.load().await.is_empty());
}

// === Multipart upload body ===

#[test]
fn multipart_body_has_two_json_parts_and_closing_boundary() {
    let body = multipart_related_body(r#"{"name":"f.json"}"#, r#"{"bookmarks":[]}"#);

    let delimiter = format!("\r\n--{}\r\n", MULTIPART_BOUNDARY);
    assert_eq!(body.matches(&delimiter).count(), 2);
    assert!(body.ends_with(&format!("\r\n--{}--", MULTIPART_BOUNDARY)));
    assert_eq!(body.matches("Content-Type: application/json\r\n\r\n").count(), 2);
    assert!(body.contains(r#"{"name":"f.json"}"#));
    assert!(body.contains(r#"{"bookmarks":[]}"#));
}

// === SaveQueue ===

/// Port that records every snapshot it is asked to save.
struct RecordingPort {
    saved: Mutex<Vec<Snapshot>>,
    fail: bool,
}

impl RecordingPort {
    fn new(fail: bool) -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            fail,
        }
    }
}

#[async_trait]
impl PersistencePort for RecordingPort {
    async fn load(&self) -> Snapshot {
        Snapshot::default()
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        self.saved.lock().unwrap().push(snapshot.clone());
        if self.fail {
            Err(PersistenceError::Blob("full".to_string()))
        } else {
            Ok(())
        }
    }
}

#[tokio::test]
async fn save_queue_last_scheduled_snapshot_wins() {
    let port = Arc::new(RecordingPort::new(false));
    let queue = SaveQueue::new(port.clone());

    for i in 0..25 {
        queue.schedule(sample_snapshot(&format!("v{}", i)));
    }
    queue.shutdown().await;

    let saved = port.saved.lock().unwrap();
    assert!(!saved.is_empty());
    // Saves may be coalesced, but the final write is always the newest
    // snapshot and no save count exceeds what was scheduled.
    assert!(saved.len() <= 25);
    assert_eq!(saved.last().unwrap().bookmarks[0].id, "v24");
}

#[tokio::test]
async fn save_queue_survives_backend_failures() {
    let port = Arc::new(RecordingPort::new(true));
    let queue = SaveQueue::new(port.clone());

    queue.schedule(sample_snapshot("a"));
    queue.schedule(sample_snapshot("b"));
    queue.shutdown().await;

    // Failures are logged and dropped; the worker keeps consuming.
    let saved = port.saved.lock().unwrap();
    assert_eq!(saved.last().unwrap().bookmarks[0].id, "b");
}

#[tokio::test]
async fn save_queue_counts_scheduled_versions() {
    let queue = SaveQueue::new(Arc::new(RecordingPort::new(false)));
    assert_eq!(queue.scheduled(), 0);
    queue.schedule(Snapshot::default());
    queue.schedule(Snapshot::default());
    assert_eq!(queue.scheduled(), 2);
    queue.shutdown().await;
}
