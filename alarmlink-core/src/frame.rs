//! Outbound frame encoding

use bytes::Bytes;
use std::fmt;

use crate::{
    checksum,
    command::{Command, Key},
    constants::{actions, frame_offsets, COMMAND_HEADER, FRAME_LEN, KEY_HEADER, STATUS_REQUEST},
    error::{Error, Result},
};

/// An outbound frame
///
/// # Frame Structure
///
/// Keypad frames:
///
/// ```text
/// ┌────────┬──────┬─────────┬──────┬───────────┬──────────┐
/// │  0x0C  │ Key  │  Zeros  │ Zone │ Key count │ Checksum │
/// │ 1 byte │  1   │ 6 bytes │ 0x01 │   0x01    │    1     │
/// └────────┴──────┴─────────┴──────┴───────────┴──────────┘
/// ```
///
/// Command frames (arm, disarm, outputs, siren):
///
/// ```text
/// ┌────────┬────────┬──────────────┬─────────┬──────────┐
/// │  0x0E  │ Action │ Output index │  Zeros  │ Checksum │
/// │ 1 byte │   1    │      1       │ 7 bytes │    1     │
/// └────────┴────────┴──────────────┴─────────┴──────────┘
/// ```
///
/// The status request is a fixed frame. Always 11 bytes; there is no length
/// prefix.
///
/// # Examples
///
/// ```
/// use alarmlink_core::frame;
///
/// let frames = frame::encode_keys("1*").unwrap();
/// assert_eq!(frames.len(), 2);
/// assert_eq!(
///     frames[0].as_bytes(),
///     &[0x0C, 0x01, 0, 0, 0, 0, 0, 0, 0x01, 0x01, 0x16]
/// );
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    fn keypad(code: u8) -> Self {
        let mut buf = [0u8; FRAME_LEN];
        buf[frame_offsets::HEADER] = KEY_HEADER;
        buf[frame_offsets::CODE] = code;
        buf[frame_offsets::ZONE] = 0x01;
        buf[frame_offsets::KEY_COUNT] = 0x01;
        buf[frame_offsets::CHECKSUM] = checksum::key(code);
        Self(buf)
    }

    fn command(action: u8, output_index: u8, checksum: u8) -> Self {
        let mut buf = [0u8; FRAME_LEN];
        buf[frame_offsets::HEADER] = COMMAND_HEADER;
        buf[frame_offsets::CODE] = action;
        buf[frame_offsets::OUTPUT_INDEX] = output_index;
        buf[frame_offsets::CHECKSUM] = checksum;
        Self(buf)
    }

    /// Command frame whose checksum comes from the action table
    fn fixed(action: u8) -> Self {
        Self::command(action, 0, checksum::command(action))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Frame kind: keypad, command, or `0x01` for the status request
    pub fn header(&self) -> u8 {
        self.0[frame_offsets::HEADER]
    }

    /// Key code of a keypad frame, action of a command frame
    pub fn code(&self) -> u8 {
        self.0[frame_offsets::CODE]
    }

    pub fn checksum(&self) -> u8 {
        self.0[frame_offsets::CHECKSUM]
    }

    /// Copy into an owned buffer
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.0)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Frame").field(&hex::encode(self.0)).finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Encode one key press
pub fn encode_key(key: Key) -> Frame {
    Frame::keypad(key.code())
}

/// Encode a key sequence, one frame per key, in order
///
/// # Errors
///
/// Returns [`Error::UnsupportedKey`] for any character outside `0-9 * #`;
/// nothing is encoded in that case.
pub fn encode_keys(keys: &str) -> Result<Vec<Frame>> {
    Command::keys(keys)?.into_iter().map(Command::encode).collect()
}

/// Encode an output switch
///
/// # Errors
///
/// Returns [`Error::UnsupportedOutput`] for ids outside `1..=5`.
pub fn encode_output(id: u8, on: bool) -> Result<Frame> {
    let checksum = checksum::output(id).ok_or(Error::UnsupportedOutput(id))?;
    let action = if on {
        actions::OUTPUT_ENABLE
    } else {
        actions::OUTPUT_DISABLE
    };
    Ok(Frame::command(action, id - 1, checksum))
}

pub fn encode_arm() -> Frame {
    Frame::fixed(actions::ARM)
}

pub fn encode_disarm() -> Frame {
    Frame::fixed(actions::DISARM)
}

pub fn encode_siren_on() -> Frame {
    Frame::fixed(actions::SIREN_ON)
}

pub fn encode_siren_off() -> Frame {
    Frame::fixed(actions::SIREN_OFF)
}

pub fn encode_status_request() -> Frame {
    Frame(STATUS_REQUEST)
}

impl Command {
    /// Encode this command into its frame
    pub fn encode(self) -> Result<Frame> {
        match self {
            Self::Key(key) => Ok(encode_key(key)),
            Self::Output { id, on } => encode_output(id, on),
            Self::Arm => Ok(encode_arm()),
            Self::Disarm => Ok(encode_disarm()),
            Self::SirenOn => Ok(encode_siren_on()),
            Self::SirenOff => Ok(encode_siren_off()),
            Self::StatusRequest => Ok(encode_status_request()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_encode_key_layout() {
        let frames = encode_keys("5").unwrap();
        assert_eq!(
            frames[0].as_bytes(),
            &[0x0C, 0x05, 0, 0, 0, 0, 0, 0, 0x01, 0x01, 0x1B]
        );
    }

    #[test]
    fn test_encode_star_and_hash() {
        let frames = encode_keys("*#").unwrap();
        assert_eq!(
            frames[0].as_bytes(),
            &[0x0C, 0x1B, 0, 0, 0, 0, 0, 0, 0x01, 0x01, 0x31]
        );
        assert_eq!(
            frames[1].as_bytes(),
            &[0x0C, 0x1A, 0, 0, 0, 0, 0, 0, 0x01, 0x01, 0x2F]
        );
    }

    #[test]
    fn test_encode_keys_rejects_bad_char() {
        let result = encode_keys("12a");
        assert!(matches!(result, Err(Error::UnsupportedKey('a'))));
    }

    #[test]
    fn test_encode_output_layout() {
        assert_eq!(
            encode_output(1, true).unwrap().as_bytes(),
            &[0x0E, 0x03, 0x00, 0, 0, 0, 0, 0, 0, 0, 0x1A]
        );
        assert_eq!(
            encode_output(3, false).unwrap().as_bytes(),
            &[0x0E, 0x04, 0x02, 0, 0, 0, 0, 0, 0, 0, 0x1B]
        );
        assert_eq!(
            encode_output(5, true).unwrap().as_bytes(),
            &[0x0E, 0x03, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x1D]
        );
    }

    #[test]
    fn test_encode_output_groups() {
        assert_eq!(encode_output(1, true).unwrap().checksum(), 0x1A);
        assert_eq!(encode_output(2, true).unwrap().checksum(), 0x1A);
        assert_eq!(encode_output(3, true).unwrap().checksum(), 0x1B);
        assert_eq!(encode_output(4, false).unwrap().checksum(), 0x1D);
        assert_eq!(encode_output(5, false).unwrap().checksum(), 0x1D);
    }

    #[test]
    fn test_encode_output_out_of_range() {
        assert!(matches!(encode_output(0, true), Err(Error::UnsupportedOutput(0))));
        assert!(matches!(encode_output(6, true), Err(Error::UnsupportedOutput(6))));
    }

    #[test]
    fn test_fixed_command_frames() {
        let zeros = [0u8; 8];
        for (frame, action, checksum) in [
            (encode_arm(), 0x01, 0x17),
            (encode_disarm(), 0x02, 0x18),
            (encode_siren_on(), 0x05, 0x1C),
            (encode_siren_off(), 0x06, 0x1D),
        ] {
            let bytes = frame.as_bytes();
            assert_eq!(bytes[0], 0x0E);
            assert_eq!(bytes[1], action);
            assert_eq!(&bytes[2..10], &zeros);
            assert_eq!(bytes[10], checksum);
        }
    }

    #[test]
    fn test_encode_status_request() {
        assert_eq!(
            encode_status_request().as_bytes(),
            &[0x01, 0x00, 0x00, 0x00, 0x91, 0x30, 0x19, 0x0F, 0x00, 0x00, 0xF1]
        );
    }

    #[test]
    fn test_command_encode_matches_helpers() {
        assert_eq!(Command::Arm.encode().unwrap(), encode_arm());
        assert_eq!(Command::StatusRequest.encode().unwrap(), encode_status_request());
        assert_eq!(
            Command::Output { id: 2, on: true }.encode().unwrap(),
            encode_output(2, true).unwrap()
        );
    }

    #[test]
    fn test_frame_display_is_hex() {
        assert_eq!(encode_arm().to_string(), "0e01000000000000000017");
    }

    proptest! {
        #[test]
        fn prop_one_frame_per_key(keys in "[0-9*#]{0,24}") {
            let frames = encode_keys(&keys).unwrap();
            prop_assert_eq!(frames.len(), keys.chars().count());
            for frame in &frames {
                prop_assert_eq!(frame.as_bytes().len(), FRAME_LEN);
                prop_assert_eq!(frame.header(), KEY_HEADER);
                prop_assert_eq!(frame.checksum(), checksum::key(frame.code()));
            }
        }

        #[test]
        fn prop_keys_preserve_order(keys in "[0-9*#]{1,24}") {
            let frames = encode_keys(&keys).unwrap();
            for (frame, c) in frames.iter().zip(keys.chars()) {
                prop_assert_eq!(frame.code(), Key::try_from(c).unwrap().code());
            }
        }
    }
}
