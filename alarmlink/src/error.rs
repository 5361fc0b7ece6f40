//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] alarmlink_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] alarmlink_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] alarmlink_types::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Bad key or output id, rejected before any I/O
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_encoding())
    }
}
