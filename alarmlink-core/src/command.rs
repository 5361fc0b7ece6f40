//! Panel command definitions

use std::fmt;

use crate::constants;
use crate::error::{Error, Result};

/// A keypad key
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Key(u8);

impl Key {
    /// Wire byte sent for this key
    pub fn code(self) -> u8 {
        self.0
    }

    /// Keypad character for this key
    pub fn as_char(self) -> char {
        match self.0 {
            constants::keys::STAR => '*',
            constants::keys::HASH => '#',
            digit => char::from(b'0' + digit),
        }
    }
}

impl TryFrom<char> for Key {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        match c {
            '0'..='9' => Ok(Self(c as u8 - b'0')),
            '*' => Ok(Self(constants::keys::STAR)),
            '#' => Ok(Self(constants::keys::HASH)),
            _ => Err(Error::UnsupportedKey(c)),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Everything the client can ask the panel to do
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Press one keypad key
    Key(Key),

    /// Switch a controllable output
    Output { id: u8, on: bool },

    Arm,
    Disarm,
    SirenOn,
    SirenOff,

    /// Ask for a status frame
    StatusRequest,
}

impl Command {
    /// Parse a key sequence into one command per key
    ///
    /// Fails on the first character outside `0-9 * #`.
    pub fn keys(keys: &str) -> Result<Vec<Self>> {
        keys.chars()
            .map(|c| Key::try_from(c).map(Self::Key))
            .collect()
    }

    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::Key(_) => "KEY",
            Self::Output { on: true, .. } => "OUTPUT_ON",
            Self::Output { on: false, .. } => "OUTPUT_OFF",
            Self::Arm => "ARM",
            Self::Disarm => "DISARM",
            Self::SirenOn => "SIREN_ON",
            Self::SirenOff => "SIREN_OFF",
            Self::StatusRequest => "STATUS_REQUEST",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{}({})", self.name(), key),
            Self::Output { id, .. } => write!(f, "{}({})", self.name(), id),
            _ => f.write_str(self.name()),
        }
    }
}
