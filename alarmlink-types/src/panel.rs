//! Control panel aggregate

use std::collections::BTreeMap;

use crate::entity::{Area, Entity, EntityId, Output, PanelTime, Siren, Zone};
use crate::error::{Error, Result};

/// Current view of every entity on the panel
///
/// Built once with a fixed set of ids. Entities can be read and mutated in
/// place but never added or removed, so the shape stays the same for the
/// lifetime of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanel {
    siren: Siren,
    outputs: BTreeMap<u8, Output>,
    areas: BTreeMap<u8, Area>,
    zones: BTreeMap<u8, Zone>,
    time: PanelTime,
}

impl ControlPanel {
    /// Zones addressable by the two-byte zone bitfields
    pub const MAX_ZONES: u8 = 16;

    /// Areas addressable by the area byte (away nibble + stay nibble)
    pub const MAX_AREAS: u8 = 4;

    /// Outputs addressable by the two-byte output bitfield
    pub const MAX_OUTPUTS: u8 = 16;

    /// Create a panel with `zones`, `areas` and `outputs` entities, all in
    /// their default state
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when a count is zero or above the
    /// protocol maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use alarmlink_types::ControlPanel;
    ///
    /// let panel = ControlPanel::new(16, 1, 8).unwrap();
    /// assert_eq!(panel.zones().count(), 16);
    /// assert!(ControlPanel::new(17, 1, 8).is_err());
    /// ```
    pub fn new(zones: u8, areas: u8, outputs: u8) -> Result<Self> {
        check_count("zones", zones, Self::MAX_ZONES)?;
        check_count("areas", areas, Self::MAX_AREAS)?;
        check_count("outputs", outputs, Self::MAX_OUTPUTS)?;

        Ok(Self {
            siren: Siren::default(),
            outputs: (1..=outputs).map(|id| (id, Output::new(id))).collect(),
            areas: (1..=areas).map(|id| (id, Area::new(id))).collect(),
            zones: (1..=zones).map(|id| (id, Zone::new(id))).collect(),
            time: PanelTime::default(),
        })
    }

    pub fn zone(&self, id: u8) -> Option<&Zone> {
        self.zones.get(&id)
    }

    pub fn zone_mut(&mut self, id: u8) -> Option<&mut Zone> {
        self.zones.get_mut(&id)
    }

    /// Zones in ascending id order
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    pub fn area(&self, id: u8) -> Option<&Area> {
        self.areas.get(&id)
    }

    pub fn area_mut(&mut self, id: u8) -> Option<&mut Area> {
        self.areas.get_mut(&id)
    }

    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    pub fn output(&self, id: u8) -> Option<&Output> {
        self.outputs.get(&id)
    }

    pub fn output_mut(&mut self, id: u8) -> Option<&mut Output> {
        self.outputs.get_mut(&id)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Output> {
        self.outputs.values()
    }

    pub fn siren(&self) -> &Siren {
        &self.siren
    }

    pub fn siren_mut(&mut self) -> &mut Siren {
        &mut self.siren
    }

    pub fn time(&self) -> &PanelTime {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut PanelTime {
        &mut self.time
    }

    pub fn zone_count(&self) -> u8 {
        self.zones.len() as u8
    }

    pub fn area_count(&self) -> u8 {
        self.areas.len() as u8
    }

    pub fn output_count(&self) -> u8 {
        self.outputs.len() as u8
    }

    /// Look up the current value of any entity
    pub fn entity(&self, id: EntityId) -> Option<Entity> {
        match id {
            EntityId::Zone(n) => self.zone(n).copied().map(Entity::Zone),
            EntityId::Area(n) => self.area(n).copied().map(Entity::Area),
            EntityId::Output(n) => self.output(n).copied().map(Entity::Output),
            EntityId::Siren => Some(Entity::Siren(self.siren)),
            EntityId::Time => Some(Entity::Time(self.time)),
        }
    }
}

fn check_count(what: &str, count: u8, max: u8) -> Result<()> {
    if count == 0 || count > max {
        return Err(Error::Validation(format!(
            "{} count must be between 1 and {}, got {}",
            what, max, count
        )));
    }
    Ok(())
}
