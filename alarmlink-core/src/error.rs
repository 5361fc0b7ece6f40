//! Error types for alarmlink-core

/// Result type alias for alarmlink codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Codec errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Keypad character outside `0-9 * #`
    #[error("Unsupported key: {0:?}")]
    UnsupportedKey(char),

    /// Output id that cannot be driven by command
    #[error("Unsupported output: {0} (only outputs 1-5 are controllable)")]
    UnsupportedOutput(u8),

    /// Status frame with the wrong length
    #[error("Malformed status frame: expected {expected} bytes, got {actual} bytes")]
    MalformedFrame {
        expected: usize,
        actual: usize,
    },

    /// Frame does not start with the status marker
    #[error("Not a status frame: marker 0x{0:02X}")]
    UnexpectedMarker(u8),

    /// Zero-length reply
    #[error("Empty frame")]
    EmptyFrame,
}

impl Error {
    /// Raised while building an outbound frame, before any I/O
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::UnsupportedKey(_) | Self::UnsupportedOutput(_))
    }
}
