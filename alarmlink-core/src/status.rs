//! Inbound status frame decoding

use bitflags::bitflags;
use bytes::Buf;
use tracing::trace;

use crate::constants::{status_offsets, STATUS_FRAME_LEN, STATUS_MARKER};
use crate::error::{Error, Result};

bitflags! {
    /// Flag bits sharing the clock byte with the hour
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClockFlags: u8 {
        /// Siren sounding
        const SIREN = 1 << 6;
    }
}

const HOUR_MASK: u8 = 0x1F;
const MINUTE_MASK: u8 = 0x3F;

/// Raw fields of a status frame, sliced out by position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFields {
    /// Output bitfield, high byte first on the wire
    pub outputs: [u8; 2],
    pub zones_triggered: [u8; 2],
    pub zones_enabled: [u8; 2],
    /// Low nibble away bits, high nibble stay bits
    pub area: u8,
    /// Siren flag plus hour
    pub clock: u8,
    pub minute: u8,
}

impl StatusFields {
    pub fn clock_flags(&self) -> ClockFlags {
        ClockFlags::from_bits_truncate(self.clock)
    }

    pub fn siren_on(&self) -> bool {
        self.clock_flags().contains(ClockFlags::SIREN)
    }

    /// Hour bits (0-31, only 0-23 are meaningful)
    pub fn hour(&self) -> u8 {
        self.clock & HOUR_MASK
    }

    /// Minute bits (0-63, only 0-59 are meaningful)
    pub fn minute(&self) -> u8 {
        self.minute & MINUTE_MASK
    }
}

/// Whether a reply carries the status marker
///
/// Replies that do not are opaque data and are never decoded.
pub fn is_status_frame(buf: &[u8]) -> bool {
    buf.first() == Some(&STATUS_MARKER)
}

/// Decode a status frame
///
/// # Errors
///
/// - [`Error::EmptyFrame`] for a zero-length buffer
/// - [`Error::UnexpectedMarker`] if byte 0 is not the status marker
/// - [`Error::MalformedFrame`] if the marker is right but the length is not
///   exactly 13; the frame is never truncated or padded
///
/// # Examples
///
/// ```
/// use alarmlink_core::status::decode_status_frame;
///
/// let mut frame = [0u8; 13];
/// frame[0] = 0x04;
/// frame[9] = 0x01;
/// let fields = decode_status_frame(&frame).unwrap();
/// assert_eq!(fields.area, 0x01);
///
/// assert!(decode_status_frame(&frame[..12]).is_err());
/// ```
pub fn decode_status_frame(buf: &[u8]) -> Result<StatusFields> {
    let marker = *buf.first().ok_or(Error::EmptyFrame)?;
    if marker != STATUS_MARKER {
        return Err(Error::UnexpectedMarker(marker));
    }
    if buf.len() != STATUS_FRAME_LEN {
        return Err(Error::MalformedFrame {
            expected: STATUS_FRAME_LEN,
            actual: buf.len(),
        });
    }

    let pair = |range: std::ops::Range<usize>| {
        let mut slice = &buf[range];
        [slice.get_u8(), slice.get_u8()]
    };

    let fields = StatusFields {
        outputs: pair(status_offsets::OUTPUTS),
        zones_triggered: pair(status_offsets::ZONES_TRIGGERED),
        zones_enabled: pair(status_offsets::ZONES_ENABLED),
        area: buf[status_offsets::AREA],
        clock: buf[status_offsets::CLOCK],
        minute: buf[status_offsets::MINUTE],
    };

    trace!(frame = %hex::encode(buf), ?fields, "Decoded status frame");

    Ok(fields)
}
