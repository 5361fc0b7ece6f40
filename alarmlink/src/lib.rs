//! # alarmlink
//!
//! Async client for multi-zone security control panels that speak a
//! fixed-frame binary protocol over TCP.
//!
//! ## Features
//!
//! - Keypad, output, arming and siren commands
//! - Periodic status polling with change events per entity
//! - Serialized exchanges with retry and reconnect on link failures
//! - Async/await API using Tokio
//!
//! ## Quick Start
//!
//! ```no_run
//! use alarmlink::{Panel, PanelConfig};
//!
//! #[tokio::main]
//! async fn main() -> alarmlink::Result<()> {
//!     let panel = Panel::new(PanelConfig::new("192.168.1.50", 10001))?;
//!
//!     panel.add_state_listener(|id, entity| {
//!         println!("{id} changed: {entity:?}");
//!     });
//!
//!     panel.start().await?;
//!     panel.set_arming(1, true).await;
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(30)).await;
//!     panel.stop();
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod listener;
mod poller;

// Re-exports
pub use client::Panel;
pub use config::PanelConfig;
pub use error::{Error, Result};
pub use listener::{RawDataListener, StateListener};

// Re-export types
pub use alarmlink_core::{Command, Frame, Key};
pub use alarmlink_transport::{TcpTransport, Transport};
pub use alarmlink_types::{
    Area, AreaMode, ControlPanel, Entity, EntityId, Output, PanelTime, Siren, StateChange, Zone,
};
