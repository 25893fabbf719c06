use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Terminal the emulator behaves as.
///
/// The VT52 submode is not a level of its own; it is a transient state any
/// level can enter through DECANM and leave through `ESC <`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EmulationLevel {
    Vt100,
    Vt102,
    #[default]
    Vt220,
}

impl EmulationLevel {
    /// The 7-bit terminals mask the top bit of every incoming byte before
    /// dispatch.
    #[inline]
    pub fn strips_high_bit(self) -> bool {
        !matches!(self, Self::Vt220)
    }

    /// Primary device attributes response, without the CSI introducer.
    pub(crate) fn primary_attributes(self) -> &'static str {
        match self {
            Self::Vt100 => "?1;2c",
            Self::Vt102 => "?6c",
            Self::Vt220 => "?62;1;6c",
        }
    }
}

impl fmt::Display for EmulationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vt100 => "vt100",
            Self::Vt102 => "vt102",
            Self::Vt220 => "vt220",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown emulation level: {0:?} (expected vt100, vt102 or vt220)")]
pub struct ParseLevelError(String);

impl FromStr for EmulationLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vt100" => Ok(Self::Vt100),
            "vt102" => Ok(Self::Vt102),
            "vt220" => Ok(Self::Vt220),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names() {
        assert_eq!("vt100".parse(), Ok(EmulationLevel::Vt100));
        assert_eq!("VT102".parse(), Ok(EmulationLevel::Vt102));
        assert_eq!("Vt220".parse(), Ok(EmulationLevel::Vt220));
        assert!("vt320".parse::<EmulationLevel>().is_err());
    }

    #[test]
    fn only_eight_bit_terminal_keeps_high_bit() {
        assert!(EmulationLevel::Vt100.strips_high_bit());
        assert!(EmulationLevel::Vt102.strips_high_bit());
        assert!(!EmulationLevel::Vt220.strips_high_bit());
    }
}
