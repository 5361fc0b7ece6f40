//! Panel entity records

use std::fmt;

use chrono::NaiveTime;

use crate::error::{Error, Result};

/// One physical sensor input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    /// Zone number (1-based)
    pub id: u8,

    /// Sensor is currently tripped
    pub triggered: bool,

    /// Zone participates in the current arming mode
    pub enabled: bool,
}

impl Zone {
    pub fn new(id: u8) -> Self {
        Self {
            id,
            triggered: false,
            enabled: false,
        }
    }
}

/// Arming mode of an area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AreaMode {
    #[default]
    Disarmed,
    ArmedAway,
    ArmedStay,
}

impl AreaMode {
    /// Any armed mode
    pub fn is_armed(self) -> bool {
        !matches!(self, Self::Disarmed)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Disarmed => "disarmed",
            Self::ArmedAway => "armed_away",
            Self::ArmedStay => "armed_stay",
        }
    }
}

impl fmt::Display for AreaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One arming partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub id: u8,
    pub mode: AreaMode,
}

impl Area {
    pub fn new(id: u8) -> Self {
        Self {
            id,
            mode: AreaMode::Disarmed,
        }
    }
}

/// A switchable output (relay or open-collector)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    pub id: u8,
    pub on: bool,
}

impl Output {
    pub fn new(id: u8) -> Self {
        Self { id, on: false }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Siren {
    pub on: bool,
}

/// Time of day as kept by the panel's own clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct PanelTime {
    pub hour: u8,
    pub minute: u8,
}

impl PanelTime {
    /// Create a panel time, rejecting hours above 23 and minutes above 59
    ///
    /// # Examples
    ///
    /// ```
    /// use alarmlink_types::PanelTime;
    ///
    /// assert!(PanelTime::new(23, 59).is_ok());
    /// assert!(PanelTime::new(24, 0).is_err());
    /// ```
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 {
            return Err(Error::Validation(format!("hour out of range: {}", hour)));
        }
        if minute > 59 {
            return Err(Error::Validation(format!("minute out of range: {}", minute)));
        }
        Ok(Self { hour, minute })
    }

    /// Convert to a chrono time (seconds are always zero)
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour.into(), self.minute.into(), 0)
    }
}

impl fmt::Display for PanelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Identifies one entity inside a [`ControlPanel`](crate::ControlPanel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    Zone(u8),
    Area(u8),
    Output(u8),
    Siren,
    Time,
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zone(id) => write!(f, "zone {}", id),
            Self::Area(id) => write!(f, "area {}", id),
            Self::Output(id) => write!(f, "output {}", id),
            Self::Siren => f.write_str("siren"),
            Self::Time => f.write_str("time"),
        }
    }
}

/// Snapshot of a single entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Zone(Zone),
    Area(Area),
    Output(Output),
    Siren(Siren),
    Time(PanelTime),
}

/// A field of the panel that changed, with the entity as it now stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub id: EntityId,
    pub entity: Entity,
}
