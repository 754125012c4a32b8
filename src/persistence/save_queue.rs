//! Write-behind save queue with versioned overwrite.
//!
//! Every mutation schedules a save of the then-current snapshot. Because the
//! backend is asynchronous, two naive saves could complete out of order and
//! leave older content as the last write. The queue prevents that: snapshots
//! carry a monotonically increasing version, a single worker performs saves
//! one at a time per destination, and queued versions older than the newest
//! pending one are discarded before the write starts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::types::Snapshot;

use super::PersistencePort;

/// Serialized, coalescing writer for one persistence destination.
pub struct SaveQueue {
    tx: Option<mpsc::UnboundedSender<(u64, Snapshot)>>,
    version: AtomicU64,
    worker: Option<JoinHandle<()>>,
}

impl SaveQueue {
    /// Starts the queue's worker task on the current tokio runtime.
    pub fn new(port: Arc<dyn PersistencePort>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<(u64, Snapshot)>();
        let worker = tokio::spawn(async move {
            let mut last_saved = 0u64;
            while let Some((mut version, mut snapshot)) = rx.recv().await {
                // Coalesce everything already queued down to the newest
                // snapshot; intermediate versions are idempotent overwrites
                // and carry no information the newest one lacks.
                while let Ok((v, s)) = rx.try_recv() {
                    if v > version {
                        version = v;
                        snapshot = s;
                    }
                }
                if version <= last_saved {
                    continue;
                }
                match port.save(&snapshot).await {
                    Ok(()) => debug!(version, "snapshot saved"),
                    Err(e) => {
                        // In-memory state stays authoritative; the next
                        // mutation schedules a fresh write.
                        warn!(version, error = %e, "snapshot save failed");
                    }
                }
                last_saved = version;
            }
        });
        Self {
            tx: Some(tx),
            version: AtomicU64::new(0),
            worker: Some(worker),
        }
    }

    /// Enqueues a snapshot for saving and returns immediately. The caller's
    /// mutation is considered successful regardless of the eventual write.
    pub fn schedule(&self, snapshot: Snapshot) {
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(tx) = &self.tx {
            // A closed channel means the worker is gone; nothing to roll back.
            let _ = tx.send((version, snapshot));
        }
    }

    /// Number of saves scheduled so far.
    pub fn scheduled(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Closes the queue and waits for every pending save to finish.
    pub async fn shutdown(mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
    }
}
