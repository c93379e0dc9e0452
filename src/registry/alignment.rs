//! Byte alignment markers
//!
//! Exactly one marker prefixes every layout descriptor. Only native
//! alignment (`@`) inserts padding between fields.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{LayoutError, LayoutResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum Alignment {
    /// `=`: native byte order, standard sizes, no padding
    #[default]
    Standard,
    /// `@`: native byte order with native alignment padding
    Native,
    /// `<`
    LittleEndian,
    /// `>`
    BigEndian,
    /// `!`
    Network,
}

impl Alignment {
    pub fn from_marker(marker: char) -> LayoutResult<Self> {
        match marker {
            '=' => Ok(Alignment::Standard),
            '@' => Ok(Alignment::Native),
            '<' => Ok(Alignment::LittleEndian),
            '>' => Ok(Alignment::BigEndian),
            '!' => Ok(Alignment::Network),
            other => Err(LayoutError::InvalidAlignment(other)),
        }
    }

    /// Parses a marker given as a string; it must be exactly one character.
    pub fn from_str_marker(marker: &str) -> LayoutResult<Self> {
        let mut chars = marker.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_marker(c),
            (Some(c), Some(_)) => Err(LayoutError::InvalidAlignment(c)),
            (None, _) => Err(LayoutError::InvalidAlignment(' ')),
        }
    }

    pub fn marker(&self) -> char {
        match self {
            Alignment::Standard => '=',
            Alignment::Native => '@',
            Alignment::LittleEndian => '<',
            Alignment::BigEndian => '>',
            Alignment::Network => '!',
        }
    }

    /// Whether fields are padded to their natural alignment
    pub fn pads_fields(&self) -> bool {
        matches!(self, Alignment::Native)
    }
}

impl TryFrom<char> for Alignment {
    type Error = LayoutError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Alignment::from_marker(value)
    }
}

impl From<Alignment> for char {
    fn from(value: Alignment) -> Self {
        value.marker()
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard() {
        assert_eq!(Alignment::default().marker(), '=');
    }

    #[test]
    fn test_markers_round_trip() {
        for marker in ['=', '@', '<', '>', '!'] {
            assert_eq!(Alignment::from_marker(marker).unwrap().marker(), marker);
        }
    }

    #[test]
    fn test_unknown_marker_rejected() {
        let err = Alignment::from_marker('x').unwrap_err();
        assert_eq!(err, LayoutError::InvalidAlignment('x'));
        assert!(Alignment::from_str_marker("==").is_err());
        assert!(Alignment::from_str_marker("").is_err());
    }

    #[test]
    fn test_serde_as_char() {
        let align: Alignment = serde_json::from_str("\"@\"").unwrap();
        assert_eq!(align, Alignment::Native);
        assert_eq!(serde_json::to_string(&Alignment::BigEndian).unwrap(), "\">\"");
        assert!(serde_json::from_str::<Alignment>("\"?\"").is_err());
    }
}
