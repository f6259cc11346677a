//! Codec configuration

use std::fmt;

use super::DEFAULT_MAX_ELEMENTS;

/// Byte order applied to every multi-byte value on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endianness {
    /// Network byte order
    #[default]
    Big,
    /// Little-endian
    Little,
}

impl Endianness {
    /// Check if little-endian
    #[must_use]
    pub const fn is_little(self) -> bool {
        matches!(self, Self::Little)
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Big => write!(f, "big-endian"),
            Self::Little => write!(f, "little-endian"),
        }
    }
}

/// Configurable parameters for encoding and decoding.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodecConfig {
    /// Byte order for scalars, string lengths and container counts.
    pub endianness: Endianness,
    /// Largest array or map count accepted on decode.
    pub max_elements: u32,
    /// Reject frames with unread bytes after the last field.
    pub strict_length: bool,
}

impl CodecConfig {
    /// Default configuration with a different byte order.
    #[must_use]
    pub fn with_endianness(endianness: Endianness) -> Self {
        Self {
            endianness,
            ..Self::default()
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            endianness: Endianness::Big,
            max_elements: DEFAULT_MAX_ELEMENTS,
            strict_length: false,
        }
    }
}
