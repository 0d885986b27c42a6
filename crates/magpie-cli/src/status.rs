//! Ingestion status state machine.
//!
//! `Idle -> Uploading -> Succeeded | Failed`, with both terminal states
//! auto-reverting to `Idle` after a fixed delay so the operator can retry
//! without a manual reset. The reset is a scheduled tokio task whose handle
//! is kept so it can be aborted when a new transition (or teardown) happens
//! before the delay elapses.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delay before a terminal state reverts to [`UploadState::Idle`].
pub const RESET_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Uploading,
    Succeeded(String),
    Failed(String),
}

pub struct UploadTracker {
    state: Arc<Mutex<UploadState>>,
    reset: Mutex<Option<JoinHandle<()>>>,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(UploadState::Idle)),
            reset: Mutex::new(None),
        }
    }

    pub fn state(&self) -> UploadState {
        self.state.lock().unwrap().clone()
    }

    /// Marks an upload as in flight and cancels any pending reset.
    pub fn begin(&self) {
        self.cancel_reset();
        *self.state.lock().unwrap() = UploadState::Uploading;
    }

    pub fn succeed(&self, message: impl Into<String>) {
        self.settle(UploadState::Succeeded(message.into()));
    }

    pub fn fail(&self, message: impl Into<String>) {
        self.settle(UploadState::Failed(message.into()));
    }

    fn settle(&self, terminal: UploadState) {
        *self.state.lock().unwrap() = terminal;
        self.cancel_reset();

        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(RESET_DELAY).await;
            *state.lock().unwrap() = UploadState::Idle;
        });
        *self.reset.lock().unwrap() = Some(handle);
    }

    fn cancel_reset(&self) {
        if let Some(handle) = self.reset.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl Default for UploadTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for UploadTracker {
    fn drop(&mut self) {
        self.cancel_reset();
    }
}
