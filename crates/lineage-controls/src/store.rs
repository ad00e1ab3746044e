//! Snapshot publication
//!
//! [`SnapshotStore`] hands every state change to subscribers as an immutable,
//! shared [`ControlsSnapshot`]. Subscribers only ever see the latest one.

use crate::state::{ControlsSnapshot, ControlsState};
use std::sync::Arc;
use tokio::sync::watch;

/// Publisher of immutable state snapshots
#[derive(Debug)]
pub struct SnapshotStore {
    sender: watch::Sender<Arc<ControlsSnapshot>>,
    revision: u64,
}

impl SnapshotStore {
    /// Create store seeded with the initial state (revision 0)
    #[must_use]
    pub fn new(state: &ControlsState) -> Self {
        let (sender, _) = watch::channel(Arc::new(state.snapshot(0)));
        Self {
            sender,
            revision: 0,
        }
    }

    /// Publish the current state as the next revision
    pub fn publish(&mut self, state: &ControlsState) -> Arc<ControlsSnapshot> {
        self.revision += 1;
        let snapshot = Arc::new(state.snapshot(self.revision));
        self.sender.send_replace(Arc::clone(&snapshot));
        snapshot
    }

    /// Subscribe to future snapshots
    #[inline]
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<ControlsSnapshot>> {
        self.sender.subscribe()
    }

    /// Latest snapshot
    #[inline]
    #[must_use]
    pub fn latest(&self) -> Arc<ControlsSnapshot> {
        Arc::clone(&*self.sender.borrow())
    }

    /// Revision of the latest snapshot
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
