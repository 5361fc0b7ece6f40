//! Bitfield decoding of status fields into per-entity updates
//!
//! Translation is pure: it reads a [`StatusFields`] and the previous
//! [`ControlPanel`] and produces one [`Update`] per entity field. It does not
//! diff against the previous values; that is the state store's job.

use alarmlink_types::{AreaMode, ControlPanel, EntityId, PanelTime};
use tracing::warn;

use crate::status::StatusFields;

/// New value for one field of one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// Zone triggered
    Triggered(bool),
    /// Zone enabled
    Enabled(bool),
    /// Area mode
    Mode(AreaMode),
    /// Output or siren state
    On(bool),
    Time(PanelTime),
}

/// A decoded field value addressed to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Update {
    pub id: EntityId,
    pub value: FieldValue,
}

impl Update {
    pub fn new(id: EntityId, value: FieldValue) -> Self {
        Self { id, value }
    }
}

/// Test bit `index` of a little-endian bitfield (bit `i % 8` of byte `i / 8`)
fn bit_forward(field: &[u8], index: usize) -> bool {
    field
        .get(index / 8)
        .is_some_and(|byte| byte & (1 << (index % 8)) != 0)
}

/// Test bit `index` of a bitfield stored last byte first
fn bit_reversed(field: &[u8], index: usize) -> bool {
    let Some(byte_index) = field.len().checked_sub(1 + index / 8) else {
        return false;
    };
    field[byte_index] & (1 << (index % 8)) != 0
}

/// Resolve the mode of one area from the area byte
///
/// Returns `None` when both the away and stay bits are set.
pub fn area_mode(area_byte: u8, index: usize) -> Option<AreaMode> {
    let away = area_byte & (1 << (index % 4)) != 0;
    let stay = area_byte & (1 << (index % 4 + 4)) != 0;
    match (away, stay) {
        (false, false) => Some(AreaMode::Disarmed),
        (true, false) => Some(AreaMode::ArmedAway),
        (false, true) => Some(AreaMode::ArmedStay),
        (true, true) => None,
    }
}

/// Whether zone `index` is enabled under `mode`
///
/// Away arms every zone and disarmed arms none; only stay mode consults
/// the enabled bitfield.
pub fn zone_enabled(mode: AreaMode, enabled_field: &[u8], index: usize) -> bool {
    match mode {
        AreaMode::ArmedAway => true,
        AreaMode::Disarmed => false,
        AreaMode::ArmedStay => bit_forward(enabled_field, index),
    }
}

/// Translate decoded status fields into updates for every entity of `previous`
///
/// Areas are resolved first. The mode of area 1 after this frame then gates
/// how zone "enabled" bits are read.
pub fn translate(fields: &StatusFields, previous: &ControlPanel) -> Vec<Update> {
    let mut updates = Vec::new();

    let mut gate = AreaMode::Disarmed;
    for area in previous.areas() {
        let index = usize::from(area.id - 1);
        let mode = match area_mode(fields.area, index) {
            Some(mode) => mode,
            None => {
                warn!(
                    area = area.id,
                    area_byte = fields.area,
                    "Away and stay both set, keeping previous mode {}",
                    area.mode
                );
                area.mode
            }
        };
        if area.id == 1 {
            gate = mode;
        }
        updates.push(Update::new(EntityId::Area(area.id), FieldValue::Mode(mode)));
    }

    for zone in previous.zones() {
        let index = usize::from(zone.id - 1);
        let id = EntityId::Zone(zone.id);
        let triggered = bit_forward(&fields.zones_triggered, index);
        let enabled = zone_enabled(gate, &fields.zones_enabled, index);
        updates.push(Update::new(id, FieldValue::Triggered(triggered)));
        updates.push(Update::new(id, FieldValue::Enabled(enabled)));
    }

    for output in previous.outputs() {
        let index = usize::from(output.id - 1);
        let on = bit_reversed(&fields.outputs, index);
        updates.push(Update::new(EntityId::Output(output.id), FieldValue::On(on)));
    }

    updates.push(Update::new(EntityId::Siren, FieldValue::On(fields.siren_on())));

    match PanelTime::new(fields.hour(), fields.minute()) {
        Ok(time) => updates.push(Update::new(EntityId::Time, FieldValue::Time(time))),
        Err(e) => warn!("Ignoring panel clock: {}", e),
    }

    updates
}
