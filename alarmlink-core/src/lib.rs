//! # alarmlink-core
//!
//! Core protocol implementation for multi-zone security control panels.
//!
//! This crate provides the synchronous protocol primitives:
//! - Outbound frame encoding and the checksum tables
//! - Command definitions
//! - Status frame decoding and bitfield translation
//! - The panel state store that diffs decoded frames into change events

pub mod checksum;
pub mod command;
pub mod constants;
pub mod decode;
pub mod error;
pub mod frame;
pub mod state;
pub mod status;

pub use command::{Command, Key};
pub use decode::{FieldValue, Update};
pub use error::{Error, Result};
pub use frame::Frame;
pub use state::StateStore;
pub use status::StatusFields;

/// Default panel port
pub const DEFAULT_PORT: u16 = 10001;
