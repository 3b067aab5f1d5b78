//! Versioned, copy-on-publish progress snapshots

use super::types::ImportSnapshot;
use std::sync::Arc;
use tokio::sync::watch;

/// The single writer of [`ImportSnapshot`]s
#[derive(Debug)]
pub struct ProgressPublisher {
    tx: watch::Sender<Arc<ImportSnapshot>>,
}

impl Default for ProgressPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressPublisher {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(ImportSnapshot::default()));
        Self { tx }
    }

    /// Publish a new snapshot derived from the current one.
    ///
    /// `update` works on a private copy; observers see either the old or the
    /// new snapshot in full.
    pub fn publish<F>(&self, update: F) -> Arc<ImportSnapshot>
    where
        F: FnOnce(&mut ImportSnapshot),
    {
        let mut next = ImportSnapshot::clone(&self.tx.borrow());
        let version = next.version + 1;
        update(&mut next);
        next.version = version;

        let next = Arc::new(next);
        self.tx.send_replace(Arc::clone(&next));
        next
    }

    pub fn current(&self) -> Arc<ImportSnapshot> {
        Arc::clone(&self.tx.borrow())
    }

    pub fn subscribe(&self) -> ProgressObserver {
        ProgressObserver {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live observers
    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Read side of the progress channel
#[derive(Debug, Clone)]
pub struct ProgressObserver {
    rx: watch::Receiver<Arc<ImportSnapshot>>,
}

impl ProgressObserver {
    pub fn current(&self) -> Arc<ImportSnapshot> {
        Arc::clone(&self.rx.borrow())
    }

    /// Wait for the next snapshot. `None` once the publisher is gone.
    ///
    /// Intermediate snapshots may be skipped when the writer is faster than
    /// the reader; the latest one is always delivered.
    pub async fn changed(&mut self) -> Option<Arc<ImportSnapshot>> {
        self.rx.changed().await.ok()?;
        Some(Arc::clone(&self.rx.borrow_and_update()))
    }

    /// Wait until the job reaches a terminal phase
    pub async fn wait_for_terminal(&mut self) -> Option<Arc<ImportSnapshot>> {
        self.rx
            .wait_for(|snapshot| snapshot.is_terminal())
            .await
            .ok()
            .map(|snapshot| Arc::clone(&snapshot))
    }
}
