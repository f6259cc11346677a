//! Command header shared by every wire message
//!
//! The header is two `i32` command codes registered ahead of any other
//! field, so they always occupy the first 8 bytes of a frame.

use std::sync::{Arc, LazyLock};

use super::descriptor::FieldDescriptor;
use super::{Endianness, Error, FieldKind, HEADER_SIZE, ScalarKind, Schema};

/// Wire key of the primary command code
pub const MAIN_CMD_KEY: &str = "mainCmd";
/// Wire key of the secondary command code
pub const SUB_CMD_KEY: &str = "subCmd";
/// Storage name of the primary command code
pub const MAIN_CMD: &str = "main_cmd";
/// Storage name of the secondary command code
pub const SUB_CMD: &str = "sub_cmd";

static ENVELOPE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Arc::new(Schema::from_parts(
        "BinaryStreamMessage",
        vec![
            FieldDescriptor::new(MAIN_CMD_KEY, MAIN_CMD, FieldKind::scalar(ScalarKind::I32)),
            FieldDescriptor::new(SUB_CMD_KEY, SUB_CMD, FieldKind::scalar(ScalarKind::I32)),
        ],
    ))
});

/// Base table every message schema extends
#[must_use]
pub fn envelope() -> &'static Arc<Schema> {
    &ENVELOPE
}

/// Command codes of a frame
///
/// # Wire Format
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                    Main Command (i32)                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                    Sub Command (i32)                          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                    Message fields ...                         |
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageHeader {
    main_cmd: i32,
    sub_cmd: i32,
}

impl MessageHeader {
    /// Create a new header
    #[must_use]
    pub const fn new(main_cmd: i32, sub_cmd: i32) -> Self {
        Self { main_cmd, sub_cmd }
    }

    /// Get primary command code
    #[must_use]
    pub const fn main_cmd(&self) -> i32 {
        self.main_cmd
    }

    /// Get secondary command code
    #[must_use]
    pub const fn sub_cmd(&self) -> i32 {
        self.sub_cmd
    }

    /// Routing key for dispatching a decoded message
    #[must_use]
    pub const fn route(&self) -> (i32, i32) {
        (self.main_cmd, self.sub_cmd)
    }

    /// Convert to bytes
    #[must_use]
    pub fn to_bytes(&self, endianness: Endianness) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        match endianness {
            Endianness::Big => {
                bytes[0..4].copy_from_slice(&self.main_cmd.to_be_bytes());
                bytes[4..8].copy_from_slice(&self.sub_cmd.to_be_bytes());
            }
            Endianness::Little => {
                bytes[0..4].copy_from_slice(&self.main_cmd.to_le_bytes());
                bytes[4..8].copy_from_slice(&self.sub_cmd.to_le_bytes());
            }
        }
        bytes
    }

    /// Read the command codes from the front of a frame without decoding
    /// the rest, so the receiver can pick a schema.
    pub fn peek(bytes: &[u8], endianness: Endianness) -> super::Result<Self> {
        let (Some(main), Some(sub)) = (
            bytes.get(0..4).and_then(|b| <[u8; 4]>::try_from(b).ok()),
            bytes.get(4..8).and_then(|b| <[u8; 4]>::try_from(b).ok()),
        ) else {
            return Err(Error::BufferOverrun {
                offset: 0,
                needed: HEADER_SIZE,
                available: bytes.len(),
            });
        };

        Ok(match endianness {
            Endianness::Big => Self::new(i32::from_be_bytes(main), i32::from_be_bytes(sub)),
            Endianness::Little => Self::new(i32::from_le_bytes(main), i32::from_le_bytes(sub)),
        })
    }
}
