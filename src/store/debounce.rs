use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::store::{PersistedState, StateStore, StoreError};

/// Debounced writer: coalesces rapid state changes into one store write.
///
/// Holds at most one scheduled write. Scheduling while a write is pending
/// cancels it and restarts the quiet interval, so the store only ever
/// observes the latest snapshot, and never two concurrent timers.
pub struct DebouncedSaver {
    store: Arc<dyn StateStore>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DebouncedSaver {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    pub fn new(store: Arc<dyn StateStore>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: None,
        }
    }

    pub fn with_default_delay(store: Arc<dyn StateStore>) -> Self {
        Self::new(store, Self::DEFAULT_DELAY)
    }

    /// Schedule `snapshot` to be written after the quiet interval, replacing
    /// any write already scheduled. Requires a Tokio runtime.
    pub fn schedule(&mut self, snapshot: PersistedState) {
        self.cancel();
        let store = Arc::clone(&self.store);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = store.save(&snapshot) {
                tracing::warn!("debounced state save failed: {err}");
            }
        }));
    }

    /// Cancel any pending write and persist `snapshot` immediately.
    pub fn flush(&mut self, snapshot: &PersistedState) -> Result<(), StoreError> {
        self.cancel();
        self.store.save(snapshot)
    }

    /// Release the timer without writing. Nothing fires after this.
    pub fn shutdown(&mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for DebouncedSaver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
