//! Panel state store
//!
//! Holds the one [`ControlPanel`] a client reports on and turns decoded
//! updates into change events, emitting only for fields whose value moved.

use alarmlink_types::{ControlPanel, EntityId, StateChange};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::decode::{self, FieldValue, Update};
use crate::status::StatusFields;

/// Owner of the current panel snapshot
///
/// All mutation goes through [`apply`](Self::apply) or
/// [`apply_status`](Self::apply_status), which hold the lock for the whole
/// batch, so concurrent status decodes never interleave.
#[derive(Debug)]
pub struct StateStore {
    panel: Mutex<ControlPanel>,
}

impl StateStore {
    pub fn new(panel: ControlPanel) -> Self {
        Self {
            panel: Mutex::new(panel),
        }
    }

    /// Clone of the current panel
    pub fn snapshot(&self) -> ControlPanel {
        self.panel.lock().clone()
    }

    /// Read the current panel without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&ControlPanel) -> R) -> R {
        f(&*self.panel.lock())
    }

    /// Apply updates, returning one change per field that actually changed
    ///
    /// Applying the same updates twice yields no changes the second time.
    pub fn apply(&self, updates: &[Update]) -> Vec<StateChange> {
        let mut panel = self.panel.lock();
        apply_to(&mut panel, updates)
    }

    /// Decode status fields against the current panel and apply the result
    /// under a single lock
    pub fn apply_status(&self, fields: &StatusFields) -> Vec<StateChange> {
        let mut panel = self.panel.lock();
        let updates = decode::translate(fields, &panel);
        apply_to(&mut panel, &updates)
    }
}

fn apply_to(panel: &mut ControlPanel, updates: &[Update]) -> Vec<StateChange> {
    let mut changes = Vec::new();

    for update in updates {
        if !apply_one(panel, update) {
            continue;
        }
        match panel.entity(update.id) {
            Some(entity) => {
                debug!(id = %update.id, value = ?update.value, "State changed");
                changes.push(StateChange {
                    id: update.id,
                    entity,
                });
            }
            None => warn!(id = %update.id, "Changed entity vanished from panel"),
        }
    }

    changes
}

/// Write one field; returns whether the stored value differed
fn apply_one(panel: &mut ControlPanel, update: &Update) -> bool {
    fn set<T: PartialEq>(slot: &mut T, value: T) -> bool {
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    match (update.id, update.value) {
        (EntityId::Zone(id), FieldValue::Triggered(v)) => {
            panel.zone_mut(id).is_some_and(|z| set(&mut z.triggered, v))
        }
        (EntityId::Zone(id), FieldValue::Enabled(v)) => {
            panel.zone_mut(id).is_some_and(|z| set(&mut z.enabled, v))
        }
        (EntityId::Area(id), FieldValue::Mode(v)) => {
            panel.area_mut(id).is_some_and(|a| set(&mut a.mode, v))
        }
        (EntityId::Output(id), FieldValue::On(v)) => {
            panel.output_mut(id).is_some_and(|o| set(&mut o.on, v))
        }
        (EntityId::Siren, FieldValue::On(v)) => set(&mut panel.siren_mut().on, v),
        (EntityId::Time, FieldValue::Time(v)) => set(panel.time_mut(), v),
        (id, value) => {
            warn!(%id, ?value, "Update does not fit entity, ignoring");
            false
        }
    }
}
