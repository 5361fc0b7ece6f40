//! Protocol constants

use std::time::Duration;

/// Length of every outbound frame
pub const FRAME_LEN: usize = 11;

/// Length of an inbound status frame
pub const STATUS_FRAME_LEN: usize = 13;

/// First byte of an inbound status frame
pub const STATUS_MARKER: u8 = 0x04;

/// Largest reply read in one exchange
pub const MAX_REPLY_LEN: usize = 32;

/// How long to wait for a reply
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(3);

/// Default connection timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Pause between a transient failure and the next attempt
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Transient failures tolerated per exchange before giving up
pub const MAX_RETRIES: u32 = 2;

/// Consecutive failures after which the link is reopened before retrying
pub const RECONNECT_AFTER: u32 = 2;

/// Default status polling period
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// First byte of a keypad frame
pub const KEY_HEADER: u8 = 0x0C;

/// First byte of an arm, disarm, output or siren frame
pub const COMMAND_HEADER: u8 = 0x0E;

/// The status request is a fixed frame; the panel answers with a status frame
pub const STATUS_REQUEST: [u8; FRAME_LEN] =
    [0x01, 0x00, 0x00, 0x00, 0x91, 0x30, 0x19, 0x0F, 0x00, 0x00, 0xF1];

/// Key codes (byte 1 of a keypad frame); digits are sent as their value
pub mod keys {
    /// `#` key
    pub const HASH: u8 = 0x1A;

    /// `*` key
    pub const STAR: u8 = 0x1B;
}

/// Actions (byte 1 of a command frame)
pub mod actions {
    pub const ARM: u8 = 0x01;
    pub const DISARM: u8 = 0x02;

    /// Switch an output on
    pub const OUTPUT_ENABLE: u8 = 0x03;

    /// Switch an output off
    pub const OUTPUT_DISABLE: u8 = 0x04;

    pub const SIREN_ON: u8 = 0x05;
    pub const SIREN_OFF: u8 = 0x06;
}

/// Byte offsets inside an outbound frame
pub mod frame_offsets {
    pub const HEADER: usize = 0;

    /// Key code or action
    pub const CODE: usize = 1;

    /// Zero-based output index, command frames only
    pub const OUTPUT_INDEX: usize = 2;

    /// Keypad frames only
    pub const ZONE: usize = 8;

    /// Keypad frames only
    pub const KEY_COUNT: usize = 9;

    pub const CHECKSUM: usize = 10;
}

/// Byte offsets inside an inbound status frame
pub mod status_offsets {
    use std::ops::Range;

    pub const MARKER: usize = 0;
    pub const OUTPUTS: Range<usize> = 1..3;
    pub const ZONES_TRIGGERED: Range<usize> = 3..5;
    pub const ZONES_ENABLED: Range<usize> = 5..7;
    pub const AREA: usize = 9;
    pub const CLOCK: usize = 10;
    pub const MINUTE: usize = 11;
}
