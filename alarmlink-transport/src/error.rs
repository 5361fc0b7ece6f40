//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not connected")]
    NotConnected,

    #[error("Connection timeout")]
    ConnectionTimeout,

    #[error("Read timeout")]
    ReadTimeout,

    #[error("Connection reset by remote")]
    ConnectionReset,

    #[error("Connection closed by remote")]
    ConnectionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

impl Error {
    /// Link-level failure that a retry after reconnecting may clear
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ReadTimeout | Self::ConnectionReset | Self::ConnectionClosed | Self::NotConnected
        )
    }

    /// Classify an I/O error, folding resets into [`Error::ConnectionReset`]
    pub fn from_io(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe => Self::ConnectionReset,
            io::ErrorKind::UnexpectedEof => Self::ConnectionClosed,
            io::ErrorKind::TimedOut => Self::ReadTimeout,
            _ => Self::Io(e),
        }
    }
}
