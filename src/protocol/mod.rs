//! Binary stream protocol core
//!
//! This module provides the field descriptor tables, value model and codec
//! for schema-driven binary messages.

mod codec;
mod config;
mod cursor;
mod descriptor;
mod error;
mod header;
mod message;
pub mod metrics;
mod scalar;
mod string;
mod types;
mod value;

pub use codec::{Codec, decode, encode};
pub use config::{CodecConfig, Endianness};
pub use descriptor::{FieldDescriptor, Schema, SchemaBuilder};
pub use error::{Error, Result};
pub use header::{MAIN_CMD, MAIN_CMD_KEY, MessageHeader, SUB_CMD, SUB_CMD_KEY, envelope};
pub use message::Message;
pub use types::{ElementKind, FieldKind, MapKeyKind, ScalarKind};
pub use value::{MapKey, StreamMap, Value};

/// Command header size in bytes (main + sub command codes)
pub const HEADER_SIZE: usize = 8;

/// Size of the `u32` prefix in front of strings, arrays and maps
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Default upper bound for a decoded array or map count
pub const DEFAULT_MAX_ELEMENTS: u32 = 1 << 20;
