//! Toolbar session loop
//!
//! All mutations go through one event loop:
//!
//! ```text
//! SessionHandle::send ──▶ mpsc ──▶ ┌────────────┐ ──▶ SnapshotStore ──▶ subscribers
//!                                  │  run loop  │
//! ViewportChanged ──▶ Debouncer ──▶└────────────┘
//! ```
//!
//! Viewport zoom events are debounced before they reach the state; every
//! other action is applied in arrival order.

use crate::config::ControlsConfig;
use crate::debounce::ZoomDebouncer;
use crate::error::{ControlsError, ControlsResult};
use crate::state::{ControlAction, ControlsSnapshot, ControlsState, Effect};
use crate::store::SnapshotStore;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Capacity of the action queue
pub const ACTION_QUEUE_CAPACITY: usize = 256;

/// Entry point for running a toolbar session
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlsSession;

impl ControlsSession {
    /// Spawn the session loop on the current runtime
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn spawn(state: ControlsState, config: &ControlsConfig) -> SessionHandle {
        let (actions_tx, actions_rx) = mpsc::channel(ACTION_QUEUE_CAPACITY);
        let (effects_tx, effects_rx) = mpsc::unbounded_channel();
        let store = SnapshotStore::new(&state);
        let snapshots = store.subscribe();
        let debouncer = ZoomDebouncer::spawn(state.zoom(), config.debounce());

        tracing::info!(
            "Starting lineage controls session (debounce {}ms)",
            config.debounce_ms
        );
        let task = tokio::spawn(run(state, actions_rx, effects_tx, store, debouncer));

        SessionHandle {
            actions: actions_tx,
            snapshots,
            effects: effects_rx,
            task,
        }
    }
}

/// Handle to a running session
#[derive(Debug)]
pub struct SessionHandle {
    actions: mpsc::Sender<ControlAction>,
    snapshots: watch::Receiver<Arc<ControlsSnapshot>>,
    effects: mpsc::UnboundedReceiver<Effect>,
    task: JoinHandle<ControlsState>,
}

impl SessionHandle {
    /// Queue an action
    ///
    /// # Errors
    /// [`ControlsError::SessionClosed`] when the loop has stopped.
    pub async fn send(&self, action: ControlAction) -> ControlsResult<()> {
        self.actions
            .send(action)
            .await
            .map_err(|_| ControlsError::SessionClosed)
    }

    /// Latest published snapshot
    #[must_use]
    pub fn snapshot(&self) -> Arc<ControlsSnapshot> {
        Arc::clone(&*self.snapshots.borrow())
    }

    /// Subscribe to snapshots
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<ControlsSnapshot>> {
        self.snapshots.clone()
    }

    /// Next effect for collaborators, `None` once the session stopped
    pub async fn next_effect(&mut self) -> Option<Effect> {
        self.effects.recv().await
    }

    /// Effects already produced, without waiting
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        let mut drained = Vec::new();
        while let Ok(effect) = self.effects.try_recv() {
            drained.push(effect);
        }
        drained
    }

    /// Stop the loop and return the final state
    ///
    /// Actions queued before the call are applied first. A debounced zoom
    /// still waiting for its quiet window is discarded.
    ///
    /// # Errors
    /// [`ControlsError::SessionClosed`] when the loop task failed.
    pub async fn shutdown(self) -> ControlsResult<ControlsState> {
        // The loop may already have stopped; joining reports that.
        let _ = self.actions.send(ControlAction::Shutdown).await;
        self.task.await.map_err(|e| {
            tracing::error!("Session task failed: {}", e);
            ControlsError::SessionClosed
        })
    }
}

async fn run(
    mut state: ControlsState,
    mut actions: mpsc::Receiver<ControlAction>,
    effects: mpsc::UnboundedSender<Effect>,
    mut store: SnapshotStore,
    debouncer: ZoomDebouncer,
) -> ControlsState {
    let mut committed = debouncer.subscribe();

    loop {
        tokio::select! {
            action = actions.recv() => {
                let Some(action) = action else { break };
                match action {
                    ControlAction::Shutdown => break,
                    ControlAction::ViewportChanged { zoom } => {
                        debouncer.push(zoom);
                        continue;
                    }
                    action => match state.apply(action) {
                        Ok(Effect::None) => {}
                        Ok(effect) => {
                            // Nobody listening is fine.
                            let _ = effects.send(effect);
                        }
                        Err(e) => {
                            tracing::warn!("Action refused: {}", e);
                            state.record_error(&e);
                        }
                    },
                }
            }
            changed = committed.changed() => {
                if changed.is_err() {
                    break;
                }
                let zoom = *committed.borrow_and_update();
                if !state.sync_zoom(zoom) {
                    continue;
                }
            }
        }
        store.publish(&state);
    }

    tracing::info!(
        "Lineage controls session stopped after {} revisions",
        store.revision()
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_filter::{FilterCatalog, FilterOption, TIER_KEY};
    use std::time::Duration;

    fn spawn() -> SessionHandle {
        let config = ControlsConfig::default();
        let state = ControlsState::new(FilterCatalog::assets_default(), &config);
        ControlsSession::spawn(state, &config)
    }

    #[tokio::test]
    async fn actions_apply_in_order() {
        let handle = spawn();
        handle
            .send(ControlAction::ActivateFilter { key: TIER_KEY.into() })
            .await
            .unwrap();
        handle
            .send(ControlAction::SetFilterValues {
                key: TIER_KEY.into(),
                values: vec![FilterOption::keyed("Tier.Tier1")],
            })
            .await
            .unwrap();

        let state = handle.shutdown().await.unwrap();
        assert!(state.filters().query().is_some());
    }

    #[tokio::test]
    async fn effects_forwarded() {
        let mut handle = spawn();
        handle.send(ControlAction::ZoomIn).await.unwrap();

        let effect = handle.next_effect().await.unwrap();
        assert!(matches!(effect, Effect::Zoom { .. }));
    }

    #[tokio::test]
    async fn refused_action_recorded_in_snapshot() {
        let handle = spawn();
        let mut rx = handle.subscribe();

        handle.send(ControlAction::ToggleEditMode).await.unwrap();
        rx.changed().await.unwrap();

        let snap = rx.borrow_and_update().clone();
        assert!(!snap.edit_mode);
        assert!(snap.last_error.as_deref().unwrap().contains("edit not permitted"));
    }

    #[tokio::test(start_paused = true)]
    async fn viewport_burst_commits_last_zoom() {
        let handle = spawn();

        for zoom in [1.0, 1.2, 1.5] {
            handle
                .send(ControlAction::ViewportChanged { zoom })
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!((handle.snapshot().zoom - 0.65).abs() < 1e-9);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!((handle.snapshot().zoom - 1.5).abs() < 1e-9);
        assert_eq!(handle.snapshot().revision, 1);
    }

    #[tokio::test]
    async fn send_after_shutdown_fails() {
        let handle = spawn();
        let actions = handle.actions.clone();
        handle.shutdown().await.unwrap();

        assert!(actions.send(ControlAction::ZoomIn).await.is_err());
    }
}
