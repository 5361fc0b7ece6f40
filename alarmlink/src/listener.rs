//! Listener registry and fire-and-forget dispatch

use std::sync::Arc;

use alarmlink_types::{Entity, EntityId, StateChange};
use bytes::Bytes;
use parking_lot::RwLock;
use tracing::trace;

/// Callback for entity state changes
pub type StateListener = Arc<dyn Fn(EntityId, Entity) + Send + Sync>;

/// Callback for replies that are not status frames
pub type RawDataListener = Arc<dyn Fn(Bytes) + Send + Sync>;

/// Registered callbacks, in registration order
#[derive(Default)]
pub(crate) struct Listeners {
    state: RwLock<Vec<StateListener>>,
    raw: RwLock<Vec<RawDataListener>>,
}

impl Listeners {
    pub(crate) fn add_state(&self, listener: StateListener) {
        self.state.write().push(listener);
    }

    pub(crate) fn add_raw(&self, listener: RawDataListener) {
        self.raw.write().push(listener);
    }

    /// Spawn one task per listener per change and return without waiting
    pub(crate) fn dispatch_changes(&self, changes: Vec<StateChange>) {
        if changes.is_empty() {
            return;
        }
        let listeners = self.state.read().clone();
        trace!(changes = changes.len(), listeners = listeners.len(), "Dispatching changes");

        for change in changes {
            for listener in &listeners {
                let listener = Arc::clone(listener);
                tokio::spawn(async move { listener(change.id, change.entity) });
            }
        }
    }

    pub(crate) fn dispatch_raw(&self, data: Bytes) {
        let listeners = self.raw.read().clone();
        trace!(len = data.len(), listeners = listeners.len(), "Dispatching raw data");

        for listener in listeners {
            let data = data.clone();
            tokio::spawn(async move { listener(data) });
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("state", &self.state.read().len())
            .field("raw", &self.raw.read().len())
            .finish()
    }
}
