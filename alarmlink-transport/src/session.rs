//! Transport session
//!
//! A session owns the link to the panel and exposes one primitive,
//! [`Session::exchange`]: write a frame, then read the reply. The link sits
//! behind an async mutex held for the whole write-then-read, so exchanges from
//! different callers (and from the poller) queue up and never interleave
//! their bytes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alarmlink_core::constants::{DEFAULT_READ_TIMEOUT, MAX_REPLY_LEN};
use bytes::BytesMut;
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};

use crate::error::{Error, Result};
use crate::Transport;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Never opened, or the link dropped
    Disconnected,

    /// Link open and usable for exchanges
    Connected,
}

/// Serialized request/response channel to the panel
///
/// Thread-safe and can be cloned cheaply (Arc internally).
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    transport: Mutex<Box<dyn Transport>>,

    state: parking_lot::RwLock<SessionState>,

    read_timeout: Duration,

    /// Completed exchanges, for diagnostics
    exchanges: AtomicU64,
}

impl Session {
    /// Wrap a transport; nothing is opened until [`open`](Self::open)
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self::with_read_timeout(transport, DEFAULT_READ_TIMEOUT)
    }

    pub fn with_read_timeout(transport: Box<dyn Transport>, read_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                transport: Mutex::new(transport),
                state: parking_lot::RwLock::new(SessionState::Disconnected),
                read_timeout,
                exchanges: AtomicU64::new(0),
            }),
        }
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        *self.inner.state.read()
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state(), SessionState::Connected)
    }

    /// Number of exchanges that got a reply
    pub fn exchange_count(&self) -> u64 {
        self.inner.exchanges.load(Ordering::Acquire)
    }

    /// Open the link, closing any previous one first
    ///
    /// Waits for an in-flight exchange to finish before replacing the link.
    pub async fn open(&self) -> Result<()> {
        let mut transport = self.inner.transport.lock().await;

        if transport.is_connected() {
            debug!("Closing previous link to {}", transport.remote_addr());
            if let Err(e) = transport.disconnect().await {
                warn!("Failed to close previous link: {}", e);
            }
            *self.inner.state.write() = SessionState::Disconnected;
        }

        info!("Opening link to {}", transport.remote_addr());
        transport.connect().await?;
        *self.inner.state.write() = SessionState::Connected;

        Ok(())
    }

    /// Write `frame` and wait for the reply
    ///
    /// Holds the link for the whole exchange. Stale input is discarded before
    /// writing; the reply is at most 32 bytes and must arrive within the read
    /// timeout. Errors are returned as-is, never retried here.
    pub async fn exchange(&self, frame: &[u8]) -> Result<BytesMut> {
        let mut transport = self.inner.transport.lock().await;

        trace!(frame = %hex::encode(frame), "Exchange start");

        let result = write_then_read(&mut transport, frame, self.inner.read_timeout).await;

        match &result {
            Ok(reply) => {
                self.inner.exchanges.fetch_add(1, Ordering::AcqRel);
                *self.inner.state.write() = SessionState::Connected;
                debug!(reply = %hex::encode(reply), "Exchange complete");
            }
            Err(Error::ConnectionReset | Error::ConnectionClosed | Error::NotConnected) => {
                *self.inner.state.write() = SessionState::Disconnected;
            }
            Err(_) => {}
        }

        result
    }
}

async fn write_then_read(
    transport: &mut Box<dyn Transport>,
    frame: &[u8],
    read_timeout: Duration,
) -> Result<BytesMut> {
    transport.clear_input().await?;
    transport.send(frame).await?;
    transport.receive(MAX_REPLY_LEN, read_timeout).await
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .field("read_timeout", &self.inner.read_timeout)
            .field("exchanges", &self.exchange_count())
            .finish()
    }
}
