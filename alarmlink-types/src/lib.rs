//! Type definitions for alarmlink
//!
//! Plain records for the entities a control panel reports, plus the
//! [`ControlPanel`] aggregate that owns one of each for the life of a client.

pub mod entity;
pub mod error;
pub mod panel;

pub use entity::{Area, AreaMode, Entity, EntityId, Output, PanelTime, Siren, StateChange, Zone};
pub use error::{Error, Result};
pub use panel::ControlPanel;
