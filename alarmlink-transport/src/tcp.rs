//! TCP transport

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use alarmlink_core::constants::DEFAULT_CONNECT_TIMEOUT;
use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace, warn};

use crate::{error::*, Transport};

/// Raw TCP link to a panel; no TLS, no handshake
pub struct TcpTransport {
    addr: String,
    port: u16,
    socket_addr: Option<SocketAddr>,
    stream: Option<TcpStream>,
    connect_timeout: Duration,
}

impl TcpTransport {
    /// Create new TCP transport
    pub fn new(addr: impl Into<String>, port: u16) -> Self {
        Self {
            addr: addr.into(),
            port,
            socket_addr: None,
            stream: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Resolve address to SocketAddr
    async fn resolve_addr(&mut self) -> Result<SocketAddr> {
        if let Some(addr) = self.socket_addr {
            return Ok(addr);
        }

        let addr_str = format!("{}:{}", self.addr, self.port);

        let addrs: Vec<SocketAddr> = tokio::net::lookup_host(&addr_str)
            .await
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", addr_str, e)))?
            .collect();

        let addr = addrs
            .first()
            .ok_or_else(|| Error::InvalidAddress(format!("No addresses found for {}", addr_str)))?;

        self.socket_addr = Some(*addr);
        Ok(*addr)
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn connect(&mut self) -> Result<()> {
        if let Some(mut old) = self.stream.take() {
            debug!("Dropping previous connection to {}", self.remote_addr());
            let _ = old.shutdown().await;
        }

        let addr = self.resolve_addr().await?;

        debug!("Connecting to {}...", addr);

        let stream = timeout(self.connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| Error::ConnectionTimeout)?
            .map_err(Error::Io)?;

        // Frames are tiny; do not let Nagle hold them back
        stream.set_nodelay(true)?;

        debug!("Connected to {}", addr);

        self.stream = Some(stream);
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            debug!("Disconnecting from {}...", self.remote_addr());

            let _ = stream.shutdown().await;
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn clear_input(&mut self) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        let mut scratch = [0u8; 64];
        let mut dropped = 0usize;
        loop {
            match stream.try_read(&mut scratch) {
                Ok(0) => return Err(Error::ConnectionClosed),
                Ok(n) => dropped += n,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => return Err(Error::from_io(e)),
            }
        }

        if dropped > 0 {
            trace!("Discarded {} stale bytes", dropped);
        }
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        trace!("Sending {} bytes: {}", data.len(), hex::encode(data));

        stream.write_all(data).await.map_err(Error::from_io)?;
        stream.flush().await.map_err(Error::from_io)?;

        Ok(())
    }

    async fn receive(&mut self, max_len: usize, timeout_duration: Duration) -> Result<BytesMut> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        let mut buf = vec![0u8; max_len];

        let n = timeout(timeout_duration, stream.read(&mut buf))
            .await
            .map_err(|_| Error::ReadTimeout)?
            .map_err(Error::from_io)?;

        if n == 0 {
            warn!("Connection to {} closed by panel", self.remote_addr());
            return Err(Error::ConnectionClosed);
        }

        trace!("Received {} bytes: {}", n, hex::encode(&buf[..n]));

        Ok(BytesMut::from(&buf[..n]))
    }

    fn remote_addr(&self) -> String {
        self.socket_addr
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| format!("{}:{}", self.addr, self.port))
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        if self.is_connected() {
            debug!("TCP transport to {} dropped while connected", self.remote_addr());
        }
    }
}
