//! Transport layer for alarmlink
//!
//! Provides the byte-stream link to the panel, the session that serializes
//! request/response exchanges over it, and the retry policy layered on top.

pub mod error;
pub mod retry;
pub mod session;
pub mod tcp;

pub use error::{Error, Result};
pub use retry::RetryPolicy;
pub use session::{Session, SessionState};
pub use tcp::TcpTransport;

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for the link to a panel
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Connect to panel
    async fn connect(&mut self) -> Result<()>;

    /// Disconnect from panel
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Drop any bytes already received but not yet read
    async fn clear_input(&mut self) -> Result<()>;

    /// Send raw bytes and flush
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive up to `max_len` bytes, waiting at most `timeout`
    async fn receive(&mut self, max_len: usize, timeout: Duration) -> Result<BytesMut>;

    /// Get remote address
    fn remote_addr(&self) -> String;
}
