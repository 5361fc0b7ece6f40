//! Frame checksums
//!
//! The panel does not compute a CRC. It accepts one fixed trailing byte per
//! frame kind, so every checksum here is a table lookup: keypad frames are
//! keyed by the key code, command frames by their action, and output frames
//! by output id.

use tracing::trace;

use crate::constants::{actions, keys};

/// Look up the checksum for a keypad frame carrying `key`
///
/// Key codes missing from the table get checksum `0x00`.
///
/// # Examples
///
/// ```
/// use alarmlink_core::checksum;
///
/// assert_eq!(checksum::key(0x05), 0x1B);
/// assert_eq!(checksum::key(0xEE), 0x00);
/// ```
pub fn key(key: u8) -> u8 {
    let checksum = match key {
        0x00 | 0x01 => 0x16,
        0x02 => 0x17,
        0x03 | 0x04 => 0x19,
        0x05 => 0x1B,
        0x06 | 0x07 => 0x1C,
        0x08 => 0x1D,
        0x09 => 0x1F,
        keys::HASH => 0x2F,
        keys::STAR => 0x31,
        _ => 0x00,
    };

    trace!(key = key, checksum = checksum, "Looked up key checksum");

    checksum
}

/// Checksum for an arm, disarm or siren frame
///
/// Output actions are not keyed here (see [`output`]); they and unknown
/// actions get `0x00`.
pub fn command(action: u8) -> u8 {
    match action {
        actions::ARM => 0x17,
        actions::DISARM => 0x18,
        actions::SIREN_ON => 0x1C,
        actions::SIREN_OFF => 0x1D,
        _ => 0x00,
    }
}

/// Trailing checksum for a controllable output
///
/// Outputs share checksums in three hardware groups: `{1, 2}`, `{3}` and
/// `{4, 5}`. The same byte is sent for on and off. Returns `None` for any
/// other id.
pub fn output(id: u8) -> Option<u8> {
    match id {
        1 | 2 => Some(0x1A),
        3 => Some(0x1B),
        4 | 5 => Some(0x1D),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_digits() {
        let expected = [0x16, 0x16, 0x17, 0x19, 0x19, 0x1B, 0x1C, 0x1C, 0x1D, 0x1F];
        for (digit, checksum) in (0u8..=9).zip(expected) {
            assert_eq!(key(digit), checksum, "digit {digit}");
        }
    }

    #[test]
    fn test_key_special_keys() {
        assert_eq!(key(keys::STAR), 0x31);
        assert_eq!(key(keys::HASH), 0x2F);
    }

    #[test]
    fn test_key_unmapped_is_zero() {
        assert_eq!(key(0x0A), 0x00);
        assert_eq!(key(0xFF), 0x00);
    }

    #[test]
    fn test_command_table() {
        assert_eq!(command(actions::ARM), 0x17);
        assert_eq!(command(actions::DISARM), 0x18);
        assert_eq!(command(actions::SIREN_ON), 0x1C);
        assert_eq!(command(actions::SIREN_OFF), 0x1D);
        assert_eq!(command(actions::OUTPUT_ENABLE), 0x00);
    }

    #[test]
    fn test_output_groups() {
        assert_eq!(output(1), output(2));
        assert_eq!(output(4), output(5));
        assert_eq!(output(3), Some(0x1B));
        assert_ne!(output(1), output(3));
        assert_ne!(output(3), output(5));
    }

    #[test]
    fn test_output_out_of_range() {
        assert!(output(0).is_none());
        assert!(output(6).is_none());
    }
}
